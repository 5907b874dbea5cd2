use async_trait::async_trait;

use crate::account::errors::AccountError;
use crate::account::errors::RepositoryError;
use crate::domain::account::models::Account;
use crate::domain::account::models::AccountProfile;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::models::LoginCommand;
use crate::domain::account::models::NewAccount;
use crate::domain::account::models::PublicId;
use crate::domain::account::models::RegisterCommand;
use crate::domain::account::models::Session;
use crate::domain::account::models::UpdateAccountCommand;

/// Port for account domain service operations.
///
/// Every operation is a plain future; dropping it (for instance on a caller
/// timeout) abandons the repository call in flight.
#[async_trait]
pub trait AccountServicePort: Send + Sync + 'static {
    /// Register a new account and issue its first token.
    ///
    /// # Arguments
    /// * `command` - Validated first name, last name, email and password
    ///
    /// # Returns
    /// Session with the new profile and a bearer token
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `Hashing` - Password hashing failed
    /// * `Token` - Token signing failed (e.g. no secret configured)
    /// * `Persistence` - Storage operation failed
    async fn register(&self, command: RegisterCommand) -> Result<Session, AccountError>;

    /// Exchange email and password for a token.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email, malformed email, or wrong password
    /// * `Token` - Token signing failed
    /// * `Persistence` - Storage operation failed
    async fn login(&self, command: LoginCommand) -> Result<Session, AccountError>;

    /// Retrieve an account profile by public identifier.
    ///
    /// # Errors
    /// * `NotFound` - Account does not exist
    /// * `Persistence` - Storage operation failed
    async fn get_account(&self, id: &PublicId) -> Result<AccountProfile, AccountError>;

    /// Update the provided fields of an account.
    ///
    /// # Arguments
    /// * `id` - Public ID of the account to update
    /// * `command` - Optional first name, last name and email
    ///
    /// # Returns
    /// Updated profile with a refreshed `updated_at`
    ///
    /// # Errors
    /// * `NotFound` - Account does not exist
    /// * `RemovedDuringUpdate` - Account vanished between lookup and write
    /// * `EmailAlreadyExists` - New email is already registered
    /// * `Persistence` - Storage operation failed
    async fn update_account(
        &self,
        id: &PublicId,
        command: UpdateAccountCommand,
    ) -> Result<AccountProfile, AccountError>;

    /// Permanently delete an account.
    ///
    /// # Errors
    /// * `NotFound` - Account does not exist
    /// * `Persistence` - Storage operation failed
    async fn delete_account(&self, id: &PublicId) -> Result<(), AccountError>;
}

/// Persistence operations for the account aggregate.
///
/// Each call is atomic: it either fully applies or leaves storage untouched.
#[async_trait]
pub trait AccountRepository: Send + Sync + 'static {
    /// Retrieve account by email address.
    ///
    /// # Returns
    /// Optional account (None if not found)
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<Account>, RepositoryError>;

    /// Retrieve account by public identifier.
    ///
    /// # Returns
    /// Optional account (None if not found)
    async fn find_by_public_id(
        &self,
        id: &PublicId,
    ) -> Result<Option<Account>, RepositoryError>;

    /// Persist a new account.
    ///
    /// Assigns the internal key, the public ID and both timestamps (equal).
    ///
    /// # Errors
    /// * `UniqueViolation` - Email is already registered
    /// * `Database` - Storage operation failed
    async fn create(&self, account: NewAccount) -> Result<Account, RepositoryError>;

    /// Write the profile fields of an existing account, keyed by its internal key.
    ///
    /// Refreshes `updated_at` to a value strictly later than the stored one.
    ///
    /// # Errors
    /// * `NotFound` - No row was affected
    /// * `UniqueViolation` - New email is already registered
    /// * `Database` - Storage operation failed
    async fn update(&self, account: Account) -> Result<Account, RepositoryError>;

    /// Hard-delete an account by public identifier.
    ///
    /// # Errors
    /// * `NotFound` - No row was affected
    /// * `Database` - Storage operation failed
    async fn delete(&self, id: &PublicId) -> Result<(), RepositoryError>;
}
