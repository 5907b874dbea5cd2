use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::account::errors::EmailError;
use crate::account::errors::FirstNameError;
use crate::account::errors::LastNameError;
use crate::account::errors::PasswordPolicyError;
use crate::account::errors::PublicIdError;

/// Account aggregate entity as persisted.
///
/// Carries the internal key and the password hash, so it never leaves the
/// service layer; callers get an [`AccountProfile`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub key: AccountKey,
    pub public_id: PublicId,
    pub first_name: FirstName,
    pub last_name: Option<LastName>,
    pub email: EmailAddress,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Account fields known before storage assigns identifiers and timestamps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub first_name: FirstName,
    pub last_name: Option<LastName>,
    pub email: EmailAddress,
    pub password_hash: String,
}

/// Client-visible view of an account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountProfile {
    pub public_id: PublicId,
    pub first_name: FirstName,
    pub last_name: Option<LastName>,
    pub email: EmailAddress,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Account> for AccountProfile {
    fn from(account: &Account) -> Self {
        Self {
            public_id: account.public_id,
            first_name: account.first_name.clone(),
            last_name: account.last_name.clone(),
            email: account.email.clone(),
            created_at: account.created_at,
            updated_at: account.updated_at,
        }
    }
}

/// Profile plus a freshly issued bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub profile: AccountProfile,
    pub token: String,
}

/// Internal storage key, assigned by the repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AccountKey(pub i64);

impl fmt::Display for AccountKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Public account identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PublicId(pub Uuid);

impl PublicId {
    /// Generate a new random public ID.
    ///
    /// # Returns
    /// PublicId with random UUID v4
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a public ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, PublicIdError> {
        Uuid::parse_str(s)
            .map(PublicId)
            .map_err(|e| PublicIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for PublicId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PublicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Longest name the `accounts` columns hold, in characters.
pub const NAME_MAX_LENGTH: usize = 255;

/// First name value type, never blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FirstName(String);

impl FirstName {
    /// Create a new first name.
    ///
    /// # Errors
    /// * `Blank` - Empty or whitespace only
    /// * `TooLong` - More than 255 characters
    pub fn new(first_name: String) -> Result<Self, FirstNameError> {
        let length = first_name.chars().count();
        if first_name.trim().is_empty() {
            Err(FirstNameError::Blank)
        } else if length > NAME_MAX_LENGTH {
            Err(FirstNameError::TooLong {
                max: NAME_MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(first_name))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FirstName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Optional family name, bounded like [`FirstName`] but may be empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LastName(String);

impl LastName {
    /// # Errors
    /// * `TooLong` - More than 255 characters
    pub fn new(last_name: String) -> Result<Self, LastNameError> {
        let length = last_name.chars().count();
        if length > NAME_MAX_LENGTH {
            Err(LastNameError::TooLong {
                max: NAME_MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(last_name))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LastName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Longest address accepted for delivery (RFC 5321 path limit).
    pub const MAX_LENGTH: usize = 254;

    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `TooLong` - More than 254 characters
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        let length = email.chars().count();
        if length > Self::MAX_LENGTH {
            return Err(EmailError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }

        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    /// Get email as string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Plaintext password. Debug output is redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    const MIN_LENGTH: usize = 8;
    const MAX_LENGTH: usize = 64;

    /// Accept a newly chosen password.
    ///
    /// Length is counted in characters, not bytes.
    ///
    /// # Errors
    /// * `TooShort` - Fewer than 8 characters
    /// * `TooLong` - More than 64 characters
    pub fn new(password: String) -> Result<Self, PasswordPolicyError> {
        let length = password.chars().count();
        if length < Self::MIN_LENGTH {
            Err(PasswordPolicyError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            })
        } else if length > Self::MAX_LENGTH {
            Err(PasswordPolicyError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(password))
        }
    }

    /// Wrap a password presented at login. The length policy only applies
    /// when a password is chosen.
    pub fn presented(password: String) -> Self {
        Self(password)
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

/// Command to register a new account with domain types
#[derive(Debug)]
pub struct RegisterCommand {
    pub first_name: FirstName,
    pub last_name: Option<LastName>,
    pub email: EmailAddress,
    pub password: Password,
}

impl RegisterCommand {
    /// Construct a new register command.
    ///
    /// # Arguments
    /// * `first_name` - Validated first name
    /// * `last_name` - Optional last name
    /// * `email` - Validated email address
    /// * `password` - Policy-checked password (hashed by the service)
    pub fn new(
        first_name: FirstName,
        last_name: Option<LastName>,
        email: EmailAddress,
        password: Password,
    ) -> Self {
        Self {
            first_name,
            last_name,
            email,
            password,
        }
    }
}

/// Credentials presented at login, unvalidated.
#[derive(Debug)]
pub struct LoginCommand {
    pub email: String,
    pub password: Password,
}

/// Command to update an existing account.
///
/// `None` leaves a field untouched. `last_name` is doubly optional:
/// `Some(None)` clears it, `Some(Some(_))` sets it.
#[derive(Debug, Default)]
pub struct UpdateAccountCommand {
    pub first_name: Option<FirstName>,
    pub last_name: Option<Option<LastName>>,
    pub email: Option<EmailAddress>,
}

impl UpdateAccountCommand {
    /// Apply the provided fields to an account in place.
    pub fn apply_to(self, account: &mut Account) {
        if let Some(first_name) = self.first_name {
            account.first_name = first_name;
        }

        if let Some(last_name) = self.last_name {
            account.last_name = last_name;
        }

        if let Some(email) = self.email {
            account.email = email;
        }
    }
}
