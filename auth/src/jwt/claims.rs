use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Claims carried by an account token.
///
/// Missing fields deserialize to their defaults so that the validator, not
/// the JSON parser, reports which required claim is absent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Claims {
    /// Subject (internal account key)
    #[serde(default)]
    pub sub: String,

    /// Email of the account at issue time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Issued at (Unix timestamp)
    #[serde(default)]
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    #[serde(default)]
    pub exp: i64,
}

impl Claims {
    /// Default token lifetime.
    pub const DEFAULT_LIFETIME_DAYS: i64 = 15;

    /// Create claims for an account, issued now.
    ///
    /// # Arguments
    /// * `account_key` - Internal account identifier, stored as the subject
    /// * `email` - Optional email claim
    /// * `lifetime` - Time until the token expires
    pub fn for_account(
        account_key: impl ToString,
        email: Option<String>,
        lifetime: Duration,
    ) -> Self {
        let now = Utc::now();
        let expiration = now + lifetime;

        Self {
            sub: account_key.to_string(),
            email,
            iat: now.timestamp(),
            exp: expiration.timestamp(),
        }
    }

    /// Set subject.
    pub fn with_subject(mut self, sub: impl ToString) -> Self {
        self.sub = sub.to_string();
        self
    }

    /// Set expiration (Unix timestamp).
    pub fn with_expiration(mut self, exp: i64) -> Self {
        self.exp = exp;
        self
    }

    /// Set issued at (Unix timestamp).
    pub fn with_issued_at(mut self, iat: i64) -> Self {
        self.iat = iat;
        self
    }

    /// Check if token is expired.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp < current_timestamp
    }
}
