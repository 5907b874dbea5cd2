use auth::JwtError;
use thiserror::Error;

/// Error for PublicId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PublicIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for FirstName validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FirstNameError {
    #[error("First name must not be empty")]
    Blank,

    #[error("First name too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error for LastName validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LastNameError {
    #[error("Last name too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),

    #[error("Email too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error for password policy violations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordPolicyError {
    #[error("Password too short: minimum {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },

    #[error("Password too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Failures reported by an account repository.
///
/// Only the account service translates these into [`AccountError`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("No matching account row")]
    NotFound,

    #[error("Unique constraint violated: {constraint}")]
    UniqueViolation { constraint: String },

    #[error("Stored account row is invalid: {0}")]
    Corrupted(String),

    #[error("Database error: {0}")]
    Database(String),
}

/// Coarse classification of [`AccountError`], one per caller-visible outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    InvalidCredentials,
    NotFound,
    Conflict,
    Internal,
}

/// Top-level error for all account operations
#[derive(Debug, Clone, Error)]
pub enum AccountError {
    // Value object validation errors (automatically converted via #[from])
    #[error("Invalid account ID: {0}")]
    InvalidPublicId(#[from] PublicIdError),

    #[error("Invalid first name: {0}")]
    InvalidFirstName(#[from] FirstNameError),

    #[error("Invalid last name: {0}")]
    InvalidLastName(#[from] LastNameError),

    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Invalid password: {0}")]
    InvalidPassword(#[from] PasswordPolicyError),

    // Domain-level errors
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Account not found: {0}")]
    NotFound(String),

    #[error("Account was removed before the update was written: {0}")]
    RemovedDuringUpdate(String),

    #[error("Email already exists: {0}")]
    EmailAlreadyExists(String),

    // Infrastructure errors
    #[error("Password hashing failed: {0}")]
    Hashing(String),

    #[error("Token error: {0}")]
    Token(#[from] JwtError),

    #[error("Persistence error: {0}")]
    Persistence(String),
}

impl AccountError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AccountError::InvalidPublicId(_)
            | AccountError::InvalidFirstName(_)
            | AccountError::InvalidLastName(_)
            | AccountError::InvalidEmail(_)
            | AccountError::InvalidPassword(_) => ErrorKind::Validation,
            AccountError::InvalidCredentials => ErrorKind::InvalidCredentials,
            AccountError::NotFound(_) | AccountError::RemovedDuringUpdate(_) => {
                ErrorKind::NotFound
            }
            AccountError::EmailAlreadyExists(_) => ErrorKind::Conflict,
            AccountError::Hashing(_) | AccountError::Token(_) | AccountError::Persistence(_) => {
                ErrorKind::Internal
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_classification() {
        assert_eq!(
            AccountError::from(FirstNameError::Blank).kind(),
            ErrorKind::Validation
        );
        assert_eq!(
            AccountError::from(PasswordPolicyError::TooShort { min: 8, actual: 3 }).kind(),
            ErrorKind::Validation
        );
        assert_eq!(
            AccountError::InvalidCredentials.kind(),
            ErrorKind::InvalidCredentials
        );
        assert_eq!(
            AccountError::RemovedDuringUpdate("x".to_string()).kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            AccountError::EmailAlreadyExists("a@b.c".to_string()).kind(),
            ErrorKind::Conflict
        );
        assert_eq!(
            AccountError::from(JwtError::MissingSecret).kind(),
            ErrorKind::Internal
        );
    }
}
