use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use auth::Claims;
use chrono::Duration;

use crate::account::errors::AccountError;
use crate::account::errors::RepositoryError;
use crate::account::ports::AccountRepository;
use crate::account::ports::AccountServicePort;
use crate::domain::account::models::Account;
use crate::domain::account::models::AccountProfile;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::models::LoginCommand;
use crate::domain::account::models::NewAccount;
use crate::domain::account::models::Password;
use crate::domain::account::models::PublicId;
use crate::domain::account::models::RegisterCommand;
use crate::domain::account::models::Session;
use crate::domain::account::models::UpdateAccountCommand;

/// Domain service implementation for account operations.
///
/// The only place where [`RepositoryError`]s become [`AccountError`]s.
/// Password hashing and verification run on the blocking pool.
pub struct AccountService<AR>
where
    AR: AccountRepository,
{
    repository: Arc<AR>,
    authenticator: Arc<Authenticator>,
    token_lifetime: Duration,
}

impl<AR> AccountService<AR>
where
    AR: AccountRepository,
{
    /// Create a new account service with injected dependencies.
    ///
    /// Tokens live for [`Claims::DEFAULT_LIFETIME_DAYS`] unless overridden
    /// with [`AccountService::with_token_lifetime`].
    ///
    /// # Arguments
    /// * `repository` - Account persistence implementation
    /// * `authenticator` - Password hashing and token signing
    pub fn new(repository: Arc<AR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
            token_lifetime: Duration::days(Claims::DEFAULT_LIFETIME_DAYS),
        }
    }

    pub fn with_token_lifetime(mut self, token_lifetime: Duration) -> Self {
        self.token_lifetime = token_lifetime;
        self
    }

    fn claims_for(&self, account: &Account) -> Claims {
        Claims::for_account(
            account.key,
            Some(account.email.as_str().to_string()),
            self.token_lifetime,
        )
    }

    async fn hash_password(&self, password: Password) -> Result<String, AccountError> {
        let authenticator = Arc::clone(&self.authenticator);

        tokio::task::spawn_blocking(move || authenticator.hash_password(password.expose()))
            .await
            .map_err(|e| AccountError::Hashing(e.to_string()))?
            .map_err(|e| AccountError::Hashing(e.to_string()))
    }

    /// Spend a full password check on a login that matched no account.
    async fn reject_unknown(&self, password: Password) -> AccountError {
        let authenticator = Arc::clone(&self.authenticator);

        match tokio::task::spawn_blocking(move || authenticator.reject_unknown(password.expose()))
            .await
        {
            Ok(_) => AccountError::InvalidCredentials,
            Err(e) => AccountError::Hashing(e.to_string()),
        }
    }

    fn issue_token(&self, account: &Account) -> Result<String, AccountError> {
        self.authenticator
            .issue_token(&self.claims_for(account))
            .map_err(|e| {
                tracing::error!(public_id = %account.public_id, error = %e, "Token issuance failed");
                AccountError::Token(e)
            })
    }

    async fn find_existing(&self, id: &PublicId) -> Result<Account, AccountError> {
        self.repository
            .find_by_public_id(id)
            .await
            .map_err(persistence_failure)?
            .ok_or_else(|| AccountError::NotFound(id.to_string()))
    }
}

fn persistence_failure(err: RepositoryError) -> AccountError {
    tracing::error!(error = %err, "Account repository failure");
    AccountError::Persistence(err.to_string())
}

#[async_trait]
impl<AR> AccountServicePort for AccountService<AR>
where
    AR: AccountRepository,
{
    async fn register(&self, command: RegisterCommand) -> Result<Session, AccountError> {
        // Refuse before anything is stored if no token could be issued.
        self.authenticator.ensure_signing_secret()?;

        let RegisterCommand {
            first_name,
            last_name,
            email,
            password,
        } = command;

        let password_hash = self.hash_password(password).await?;
        let requested_email = email.as_str().to_string();

        let account = self
            .repository
            .create(NewAccount {
                first_name,
                last_name,
                email,
                password_hash,
            })
            .await
            .map_err(|e| match e {
                RepositoryError::UniqueViolation { .. } => {
                    AccountError::EmailAlreadyExists(requested_email)
                }
                other => persistence_failure(other),
            })?;

        let token = match self.issue_token(&account) {
            Ok(token) => token,
            Err(err) => {
                // The caller never receives the new id; remove the row.
                if let Err(e) = self.repository.delete(&account.public_id).await {
                    tracing::error!(
                        public_id = %account.public_id,
                        error = %e,
                        "Failed to roll back account after token failure"
                    );
                }
                return Err(err);
            }
        };

        tracing::info!(public_id = %account.public_id, "Account registered");

        Ok(Session {
            profile: AccountProfile::from(&account),
            token,
        })
    }

    async fn login(&self, command: LoginCommand) -> Result<Session, AccountError> {
        let LoginCommand { email, password } = command;

        let Ok(email) = EmailAddress::new(email) else {
            tracing::warn!(reason = "malformed_email", "Login rejected");
            return Err(self.reject_unknown(password).await);
        };

        let Some(account) = self
            .repository
            .find_by_email(&email)
            .await
            .map_err(persistence_failure)?
        else {
            tracing::warn!(reason = "unknown_email", "Login rejected");
            return Err(self.reject_unknown(password).await);
        };

        let authenticator = Arc::clone(&self.authenticator);
        let stored_hash = account.password_hash.clone();
        let claims = self.claims_for(&account);

        let outcome = tokio::task::spawn_blocking(move || {
            authenticator.authenticate(password.expose(), &stored_hash, &claims)
        })
        .await
        .map_err(|e| AccountError::Hashing(e.to_string()))?;

        match outcome {
            Ok(result) => {
                tracing::info!(public_id = %account.public_id, "Login succeeded");
                Ok(Session {
                    profile: AccountProfile::from(&account),
                    token: result.access_token,
                })
            }
            Err(AuthenticationError::InvalidCredentials) => {
                tracing::warn!(
                    public_id = %account.public_id,
                    reason = "password_mismatch",
                    "Login rejected"
                );
                Err(AccountError::InvalidCredentials)
            }
            Err(AuthenticationError::JwtError(e)) => {
                tracing::error!(public_id = %account.public_id, error = %e, "Token issuance failed");
                Err(AccountError::Token(e))
            }
        }
    }

    async fn get_account(&self, id: &PublicId) -> Result<AccountProfile, AccountError> {
        self.find_existing(id)
            .await
            .map(|ref account| AccountProfile::from(account))
    }

    async fn update_account(
        &self,
        id: &PublicId,
        command: UpdateAccountCommand,
    ) -> Result<AccountProfile, AccountError> {
        let mut account = self.find_existing(id).await?;

        command.apply_to(&mut account);
        let requested_email = account.email.as_str().to_string();

        let updated = self
            .repository
            .update(account)
            .await
            .map_err(|e| match e {
                RepositoryError::NotFound => {
                    tracing::warn!(public_id = %id, "Account removed between lookup and update");
                    AccountError::RemovedDuringUpdate(id.to_string())
                }
                RepositoryError::UniqueViolation { .. } => {
                    AccountError::EmailAlreadyExists(requested_email)
                }
                other => persistence_failure(other),
            })?;

        tracing::info!(public_id = %updated.public_id, "Account updated");

        Ok(AccountProfile::from(&updated))
    }

    async fn delete_account(&self, id: &PublicId) -> Result<(), AccountError> {
        self.repository.delete(id).await.map_err(|e| match e {
            RepositoryError::NotFound => AccountError::NotFound(id.to_string()),
            other => persistence_failure(other),
        })?;

        tracing::info!(public_id = %id, "Account deleted");

        Ok(())
    }
}
