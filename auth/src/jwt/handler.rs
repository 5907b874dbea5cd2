use std::fmt;

use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::JwtError;
use super::secret::SecretSource;

/// JWT token handler for encoding and decoding account tokens.
///
/// Signs with HS256 and accepts nothing else. The secret is fetched from the
/// [`SecretSource`] on each call rather than cached in keys.
pub struct JwtHandler {
    secret: Box<dyn SecretSource>,
    algorithm: Algorithm,
}

impl JwtHandler {
    /// Create a new JWT handler.
    ///
    /// # Arguments
    /// * `secret` - Source of the signing secret
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: impl SecretSource) -> Self {
        Self {
            secret: Box::new(secret),
            algorithm: Algorithm::HS256,
        }
    }

    /// The only algorithm this handler signs with or accepts.
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Current signing secret.
    ///
    /// # Errors
    /// * `MissingSecret` - Source yields no secret or an empty one
    pub fn signing_secret(&self) -> Result<String, JwtError> {
        self.secret.current().ok_or(JwtError::MissingSecret)
    }

    /// Encode claims into a signed JWT token.
    ///
    /// # Errors
    /// * `MissingSecret` - No signing secret is configured
    /// * `EncodingFailed` - Token encoding failed
    pub fn encode(&self, claims: &Claims) -> Result<String, JwtError> {
        let secret = self.signing_secret()?;
        let header = Header::new(self.algorithm);

        encode(&header, claims, &EncodingKey::from_secret(secret.as_bytes()))
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Decode and validate a JWT token.
    ///
    /// Expiry is checked without leeway; `exp` and a non-empty `sub` are
    /// required.
    ///
    /// # Errors
    /// * `MissingSecret` - No signing secret is configured
    /// * `Malformed` - Token or header cannot be parsed
    /// * `InvalidSignature` - Signature does not match the secret
    /// * `DisallowedAlgorithm` - Header names an algorithm other than HS256
    /// * `TokenExpired` - Expiry is in the past
    /// * `MissingClaim` - `exp` or `sub` is absent or empty
    pub fn decode(&self, token: &str) -> Result<Claims, JwtError> {
        let secret = self.signing_secret()?;

        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &validation,
        )?;

        if token_data.claims.sub.trim().is_empty() {
            return Err(JwtError::MissingClaim("sub".to_string()));
        }

        Ok(token_data.claims)
    }
}

impl fmt::Debug for JwtHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtHandler")
            .field("algorithm", &self.algorithm)
            .finish_non_exhaustive()
    }
}
