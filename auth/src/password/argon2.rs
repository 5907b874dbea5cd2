use std::sync::OnceLock;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Algorithm;
use argon2::Argon2;
use argon2::Params;
use argon2::Version;

use super::errors::PasswordError;

/// Password hashing implementation.
///
/// Produces salted Argon2id hashes in PHC string format. The cost parameters
/// only affect new hashes; verification reads them back from the stored hash.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    params: Params,
    decoy: OnceLock<Option<String>>,
}

const DECOY_PASSWORD: &str = "decoy-password-never-assigned";

impl PasswordHasher {
    /// Create a password hasher with the `argon2` crate's default cost.
    pub fn new() -> Self {
        Self::from_params(Params::default())
    }

    /// Create a password hasher with an explicit cost.
    ///
    /// # Arguments
    /// * `memory_kib` - Memory cost in KiB
    /// * `iterations` - Number of passes
    /// * `parallelism` - Degree of parallelism (lanes)
    ///
    /// # Errors
    /// * `InvalidParameters` - The combination is rejected by Argon2
    pub fn with_cost(
        memory_kib: u32,
        iterations: u32,
        parallelism: u32,
    ) -> Result<Self, PasswordError> {
        let params = Params::new(memory_kib, iterations, parallelism, None)
            .map_err(|e| PasswordError::InvalidParameters(e.to_string()))?;

        Ok(Self::from_params(params))
    }

    fn from_params(params: Params) -> Self {
        Self {
            params,
            decoy: OnceLock::new(),
        }
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hash a plaintext password with a fresh random salt.
    ///
    /// # Returns
    /// PHC string format hash (includes algorithm, parameters, salt, and hash)
    ///
    /// # Errors
    /// * `HashingFailed` - Password hashing operation failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a password against a stored hash.
    ///
    /// Returns false for any mismatch, including a stored hash that cannot be
    /// parsed. The digest comparison is constant-time.
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        match PasswordHash::new(hash) {
            Ok(parsed_hash) => self
                .argon2()
                .verify_password(password.as_bytes(), &parsed_hash)
                .is_ok(),
            Err(_) => false,
        }
    }

    /// Spend the work of one `verify` when there is no stored hash to check
    /// against, so a missing account costs as much as a wrong password.
    ///
    /// Always returns false. The decoy hash is computed once, with this
    /// hasher's cost, on first use.
    pub fn verify_decoy(&self, password: &str) -> bool {
        if let Some(hash) = self.decoy.get_or_init(|| self.hash(DECOY_PASSWORD).ok()) {
            let _ = self.verify(password, hash);
        }
        false
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hasher = PasswordHasher::new();
        let password = "my_secure_password";

        let hash = hasher.hash(password).expect("Failed to hash password");

        assert!(hasher.verify(password, &hash));
        assert!(!hasher.verify("wrong_password", &hash));
    }

    #[test]
    fn test_hash_does_not_contain_plaintext() {
        let hasher = PasswordHasher::new();
        let hash = hasher.hash("test_pass").expect("Failed to hash password");

        assert!(hash.starts_with("$argon2id$"));
        assert!(!hash.contains("test_pass"));
    }

    #[test]
    fn test_same_password_gets_different_salts() {
        let hasher = PasswordHasher::new();
        let first = hasher.hash("password123").unwrap();
        let second = hasher.hash("password123").unwrap();

        assert_ne!(first, second);
        assert!(hasher.verify("password123", &first));
        assert!(hasher.verify("password123", &second));
    }

    #[test]
    fn test_verify_malformed_hash_is_false() {
        let hasher = PasswordHasher::new();

        assert!(!hasher.verify("password", "invalid_hash"));
        assert!(!hasher.verify("password", ""));
        assert!(!hasher.verify("password", "$2a$10$notanargonhash"));
    }

    #[test]
    fn test_verify_ignores_current_cost() {
        let cheap = PasswordHasher::with_cost(8 * 1024, 1, 1).unwrap();
        let hash = cheap.hash("password123").unwrap();

        // Parameters are read from the stored hash.
        assert!(PasswordHasher::new().verify("password123", &hash));
    }

    #[test]
    fn test_verify_decoy_always_fails_and_uses_current_cost() {
        let hasher = PasswordHasher::with_cost(8 * 1024, 1, 1).unwrap();

        assert!(!hasher.verify_decoy("password123"));
        assert!(!hasher.verify_decoy(DECOY_PASSWORD));

        let decoy = hasher.decoy.get().cloned().flatten().unwrap();
        assert!(decoy.contains("m=8192,t=1,p=1"));
    }

    #[test]
    fn test_with_cost_rejects_invalid_parameters() {
        let result = PasswordHasher::with_cost(8 * 1024, 0, 1);
        assert!(matches!(result, Err(PasswordError::InvalidParameters(_))));
    }
}
