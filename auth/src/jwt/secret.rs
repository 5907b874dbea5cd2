use std::env;
use std::fmt;

/// Where the token signing secret comes from.
///
/// The handler asks for the secret on every encode and decode, so a source
/// that reads external state picks up changes without a restart.
pub trait SecretSource: Send + Sync + 'static {
    /// Current secret, or None when unset. Empty values count as unset.
    fn current(&self) -> Option<String>;
}

/// Secret captured once, typically from configuration at startup.
#[derive(Clone)]
pub struct StaticSecret(String);

impl StaticSecret {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }
}

impl SecretSource for StaticSecret {
    fn current(&self) -> Option<String> {
        Some(self.0.clone()).filter(|s| !s.is_empty())
    }
}

impl fmt::Debug for StaticSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("StaticSecret(***)")
    }
}

/// Secret re-read from an environment variable on every call.
#[derive(Debug, Clone)]
pub struct EnvSecret {
    variable: String,
}

impl EnvSecret {
    pub fn new(variable: impl Into<String>) -> Self {
        Self {
            variable: variable.into(),
        }
    }

    pub fn variable(&self) -> &str {
        &self.variable
    }
}

impl SecretSource for EnvSecret {
    fn current(&self) -> Option<String> {
        env::var(&self.variable).ok().filter(|s| !s.is_empty())
    }
}
