use std::env;
use std::time::Duration;

use auth::Authenticator;
use auth::EnvSecret;
use auth::JwtHandler;
use auth::PasswordHasher;
use auth::StaticSecret;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub hashing: HashingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
    #[serde(default = "default_request_timeout_seconds")]
    pub request_timeout_seconds: u64,
}

/// Token signing settings.
///
/// `secret_env` names an environment variable that is re-read on every
/// signing and verification, so the secret can be rotated without a restart.
/// It takes precedence over the inline `secret`.
#[derive(Deserialize, Clone)]
pub struct JwtConfig {
    #[serde(default)]
    pub secret: Option<String>,
    #[serde(default)]
    pub secret_env: Option<String>,
    #[serde(default = "default_expiration_days")]
    pub expiration_days: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct HashingConfig {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for HashingConfig {
    fn default() -> Self {
        Self {
            memory_kib: 19 * 1024,
            iterations: 2,
            parallelism: 1,
        }
    }
}

fn default_max_connections() -> u32 {
    5
}

fn default_request_timeout_seconds() -> u64 {
    30
}

fn default_expiration_days() -> i64 {
    auth::Claims::DEFAULT_LIFETIME_DAYS
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &self.secret.as_ref().map(|_| "***"))
            .field("secret_env", &self.secret_env)
            .field("expiration_days", &self.expiration_days)
            .finish()
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, JWT__SECRET, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: JWT__SECRET=... overrides jwt.secret
            .add_source(Environment::default().separator("__"))
            .build()?;

        let config: Config = configuration.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    /// Reject settings the service cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match (&self.jwt.secret_env, &self.jwt.secret) {
            (Some(variable), _) if variable.trim().is_empty() => {
                return Err(ConfigError::Message(
                    "jwt.secret_env must name an environment variable".to_string(),
                ));
            }
            (Some(_), _) => {}
            (None, Some(secret)) if !secret.is_empty() => {}
            (None, _) => {
                return Err(ConfigError::Message(
                    "no signing secret configured: set jwt.secret or jwt.secret_env".to_string(),
                ));
            }
        }

        if self.jwt.expiration_days <= 0 {
            return Err(ConfigError::Message(
                "jwt.expiration_days must be positive".to_string(),
            ));
        }

        if self.server.request_timeout_seconds == 0 {
            return Err(ConfigError::Message(
                "server.request_timeout_seconds must be positive".to_string(),
            ));
        }

        if self.database.max_connections == 0 {
            return Err(ConfigError::Message(
                "database.max_connections must be positive".to_string(),
            ));
        }

        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.server.request_timeout_seconds)
    }

    pub fn token_lifetime(&self) -> chrono::Duration {
        chrono::Duration::days(self.jwt.expiration_days)
    }

    /// Build the authenticator described by the `jwt` and `hashing` sections.
    pub fn build_authenticator(&self) -> Result<Authenticator, ConfigError> {
        let hasher = PasswordHasher::with_cost(
            self.hashing.memory_kib,
            self.hashing.iterations,
            self.hashing.parallelism,
        )
        .map_err(|e| ConfigError::Message(format!("invalid hashing settings: {}", e)))?;

        let jwt_handler = match (&self.jwt.secret_env, &self.jwt.secret) {
            (Some(variable), _) => JwtHandler::new(EnvSecret::new(variable.clone())),
            (None, Some(secret)) => JwtHandler::new(StaticSecret::new(secret.clone())),
            (None, None) => {
                return Err(ConfigError::Message(
                    "no signing secret configured".to_string(),
                ))
            }
        };

        Ok(Authenticator::new(hasher, jwt_handler))
    }
}
