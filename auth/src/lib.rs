//! Authentication utilities library
//!
//! Provides the credential and token primitives used by the account service:
//! - Password hashing (Argon2id)
//! - JWT token generation and validation (HS256 only, pluggable secret source)
//! - Authentication coordination
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! ```
//!
//! ## JWT Tokens
//! ```
//! use auth::{Claims, JwtHandler, StaticSecret};
//! use chrono::Duration;
//!
//! let handler = JwtHandler::new(StaticSecret::new("secret_key_at_least_32_bytes_long!"));
//! let claims = Claims::for_account(42, None, Duration::days(15));
//! let token = handler.encode(&claims).unwrap();
//! let decoded = handler.decode(&token).unwrap();
//! assert_eq!(decoded.sub, "42");
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{Authenticator, Claims, StaticSecret};
//! use chrono::Duration;
//!
//! let auth = Authenticator::with_secret(StaticSecret::new("secret_key_at_least_32_bytes_long!"));
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and generate token
//! let claims = Claims::for_account(42, Some("alice@example.com".to_string()), Duration::days(15));
//! let result = auth.authenticate("password123", &hash, &claims).unwrap();
//!
//! // Validate token
//! let decoded = auth.validate_token(&result.access_token).unwrap();
//! assert_eq!(decoded.email.as_deref(), Some("alice@example.com"));
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use jwt::Claims;
pub use jwt::EnvSecret;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::SecretSource;
pub use jwt::StaticSecret;
pub use password::PasswordError;
pub use password::PasswordHasher;
