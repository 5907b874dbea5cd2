use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::jwt::SecretSource;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and JWT generation.
#[derive(Debug)]
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
}

/// Result of successful authentication.
#[derive(Debug, Clone)]
pub struct AuthenticationResult {
    /// JWT access token
    pub access_token: String,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator from its parts.
    pub fn new(password_hasher: PasswordHasher, jwt_handler: JwtHandler) -> Self {
        Self {
            password_hasher,
            jwt_handler,
        }
    }

    /// Create an authenticator with the default hashing cost.
    ///
    /// # Arguments
    /// * `secret` - Source of the JWT signing secret
    pub fn with_secret(secret: impl SecretSource) -> Self {
        Self::new(PasswordHasher::new(), JwtHandler::new(secret))
    }

    /// Confirm a signing secret is available.
    ///
    /// # Errors
    /// * `MissingSecret` - The secret source is unset or empty
    pub fn ensure_signing_secret(&self) -> Result<(), JwtError> {
        self.jwt_handler.signing_secret().map(|_| ())
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a plaintext password against a stored hash.
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> bool {
        self.password_hasher.verify(password, stored_hash)
    }

    /// Reject a login for which no account exists, after the same hashing
    /// work a real password check would do.
    pub fn reject_unknown(&self, password: &str) -> AuthenticationError {
        let _ = self.password_hasher.verify_decoy(password);
        AuthenticationError::InvalidCredentials
    }

    /// Verify credentials and generate JWT token.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `claims` - JWT claims to encode in token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match or hash is unreadable
    /// * `JwtError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        claims: &Claims,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        if !self.password_hasher.verify(password, stored_hash) {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let access_token = self.jwt_handler.encode(claims)?;

        Ok(AuthenticationResult { access_token })
    }

    /// Generate JWT token without password verification.
    ///
    /// Used right after registration, where the caller just supplied the password.
    ///
    /// # Errors
    /// * `JwtError` - Token generation failed
    pub fn issue_token(&self, claims: &Claims) -> Result<String, JwtError> {
        self.jwt_handler.encode(claims)
    }

    /// Validate and decode JWT token.
    ///
    /// # Errors
    /// * `JwtError` - Token validation or decoding failed
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        self.jwt_handler.decode(token)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::jwt::StaticSecret;

    fn authenticator() -> Authenticator {
        Authenticator::with_secret(StaticSecret::new("test_secret_key_at_least_32_bytes!"))
    }

    #[test]
    fn test_authenticate_success() {
        let authenticator = authenticator();

        let password = "my_password";
        let hash = authenticator
            .hash_password(password)
            .expect("Failed to hash password");

        let claims = Claims::for_account(123, None, Duration::days(15));
        let result = authenticator
            .authenticate(password, &hash, &claims)
            .expect("Authentication failed");

        assert!(!result.access_token.is_empty());

        let decoded = authenticator
            .validate_token(&result.access_token)
            .expect("Token validation failed");
        assert_eq!(decoded.sub, "123");
    }

    #[test]
    fn test_authenticate_invalid_password() {
        let authenticator = authenticator();

        let hash = authenticator
            .hash_password("my_password")
            .expect("Failed to hash password");
        let claims = Claims::for_account(123, None, Duration::days(15));

        let result = authenticator.authenticate("wrong_password", &hash, &claims);
        assert!(matches!(
            result,
            Err(AuthenticationError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_reject_unknown_matches_wrong_password() {
        let authenticator = authenticator();
        let hash = authenticator
            .hash_password("my_password")
            .expect("Failed to hash password");
        let claims = Claims::for_account(123, None, Duration::days(15));

        let wrong_password = authenticator
            .authenticate("wrong_password", &hash, &claims)
            .unwrap_err();
        let unknown = authenticator.reject_unknown("my_password");

        assert!(matches!(unknown, AuthenticationError::InvalidCredentials));
        assert_eq!(unknown.to_string(), wrong_password.to_string());
    }

    #[test]
    fn test_authenticate_malformed_hash_is_invalid_credentials() {
        let authenticator = authenticator();
        let claims = Claims::for_account(123, None, Duration::days(15));

        let result = authenticator.authenticate("my_password", "not-a-hash", &claims);
        assert!(matches!(
            result,
            Err(AuthenticationError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_authenticate_without_secret_fails_with_jwt_error() {
        let authenticator = Authenticator::with_secret(StaticSecret::new(""));
        let hash = authenticator.hash_password("my_password").unwrap();
        let claims = Claims::for_account(123, None, Duration::days(15));

        let result = authenticator.authenticate("my_password", &hash, &claims);
        assert!(matches!(
            result,
            Err(AuthenticationError::JwtError(JwtError::MissingSecret))
        ));
        assert_eq!(
            authenticator.ensure_signing_secret(),
            Err(JwtError::MissingSecret)
        );
    }

    #[test]
    fn test_issue_and_validate_token() {
        let authenticator = authenticator();

        let claims = Claims::for_account(5, Some("e@example.com".to_string()), Duration::days(15));
        let token = authenticator
            .issue_token(&claims)
            .expect("Failed to generate token");

        let decoded = authenticator
            .validate_token(&token)
            .expect("Failed to validate token");

        assert_eq!(decoded.sub, "5");
        assert_eq!(decoded.email.as_deref(), Some("e@example.com"));
    }

    #[test]
    fn test_validate_invalid_token() {
        let result = authenticator().validate_token("invalid.token.here");
        assert!(result.is_err());
    }
}
