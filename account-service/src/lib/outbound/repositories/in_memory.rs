use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Duration;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::account::errors::RepositoryError;
use crate::domain::account::models::Account;
use crate::domain::account::models::AccountKey;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::models::NewAccount;
use crate::domain::account::models::PublicId;
use crate::domain::account::ports::AccountRepository;

const EMAIL_CONSTRAINT: &str = "accounts_email_key";

/// Process-local account store with the same uniqueness and timestamp
/// guarantees as the Postgres table.
#[derive(Default)]
pub struct InMemoryAccountRepository {
    state: RwLock<State>,
}

#[derive(Default)]
struct State {
    next_key: i64,
    accounts: HashMap<AccountKey, Account>,
}

impl State {
    fn email_taken(&self, email: &EmailAddress, except: Option<AccountKey>) -> bool {
        self.accounts
            .values()
            .any(|a| a.email == *email && Some(a.key) != except)
    }
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn email_conflict() -> RepositoryError {
        RepositoryError::UniqueViolation {
            constraint: EMAIL_CONSTRAINT.to_string(),
        }
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<Account>, RepositoryError> {
        let state = self.state.read().await;
        Ok(state.accounts.values().find(|a| a.email == *email).cloned())
    }

    async fn find_by_public_id(
        &self,
        id: &PublicId,
    ) -> Result<Option<Account>, RepositoryError> {
        let state = self.state.read().await;
        Ok(state
            .accounts
            .values()
            .find(|a| a.public_id == *id)
            .cloned())
    }

    async fn create(&self, account: NewAccount) -> Result<Account, RepositoryError> {
        let mut state = self.state.write().await;

        if state.email_taken(&account.email, None) {
            return Err(Self::email_conflict());
        }

        state.next_key += 1;
        let now = Utc::now();
        let created = Account {
            key: AccountKey(state.next_key),
            public_id: PublicId::new(),
            first_name: account.first_name,
            last_name: account.last_name,
            email: account.email,
            password_hash: account.password_hash,
            created_at: now,
            updated_at: now,
        };

        state.accounts.insert(created.key, created.clone());
        Ok(created)
    }

    async fn update(&self, account: Account) -> Result<Account, RepositoryError> {
        let mut state = self.state.write().await;

        if !state.accounts.contains_key(&account.key) {
            return Err(RepositoryError::NotFound);
        }
        if state.email_taken(&account.email, Some(account.key)) {
            return Err(Self::email_conflict());
        }

        let stored = state
            .accounts
            .get_mut(&account.key)
            .ok_or(RepositoryError::NotFound)?;

        stored.first_name = account.first_name;
        stored.last_name = account.last_name;
        stored.email = account.email;
        stored.updated_at = Utc::now().max(stored.updated_at + Duration::microseconds(1));

        Ok(stored.clone())
    }

    async fn delete(&self, id: &PublicId) -> Result<(), RepositoryError> {
        let mut state = self.state.write().await;

        let key = state
            .accounts
            .values()
            .find(|a| a.public_id == *id)
            .map(|a| a.key)
            .ok_or(RepositoryError::NotFound)?;

        state.accounts.remove(&key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::account::models::FirstName;

    fn new_account(email: &str) -> NewAccount {
        NewAccount {
            first_name: FirstName::new("Alice".to_string()).unwrap(),
            last_name: None,
            email: EmailAddress::new(email.to_string()).unwrap(),
            password_hash: "$argon2id$hash".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_identity_and_equal_timestamps() {
        let repository = InMemoryAccountRepository::new();

        let first = repository.create(new_account("a@x.com")).await.unwrap();
        let second = repository.create(new_account("b@x.com")).await.unwrap();

        assert_eq!(first.created_at, first.updated_at);
        assert_ne!(first.key, second.key);
        assert_ne!(first.public_id, second.public_id);
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_email() {
        let repository = InMemoryAccountRepository::new();
        repository.create(new_account("a@x.com")).await.unwrap();

        let err = repository.create(new_account("a@x.com")).await.unwrap_err();

        assert_eq!(
            err,
            RepositoryError::UniqueViolation {
                constraint: "accounts_email_key".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_update_advances_updated_at() {
        let repository = InMemoryAccountRepository::new();
        let created = repository.create(new_account("a@x.com")).await.unwrap();

        let updated = repository.update(created.clone()).await.unwrap();

        assert!(updated.updated_at > created.updated_at);
        assert_eq!(updated.created_at, created.created_at);
    }

    #[tokio::test]
    async fn test_update_rejects_email_of_another_account() {
        let repository = InMemoryAccountRepository::new();
        repository.create(new_account("a@x.com")).await.unwrap();
        let mut other = repository.create(new_account("b@x.com")).await.unwrap();

        other.email = EmailAddress::new("a@x.com".to_string()).unwrap();
        let err = repository.update(other).await.unwrap_err();

        assert!(matches!(err, RepositoryError::UniqueViolation { .. }));
    }

    #[tokio::test]
    async fn test_update_of_deleted_row_with_taken_email_is_not_found() {
        let repository = InMemoryAccountRepository::new();
        repository.create(new_account("a@x.com")).await.unwrap();
        let mut removed = repository.create(new_account("b@x.com")).await.unwrap();
        repository.delete(&removed.public_id).await.unwrap();

        removed.email = EmailAddress::new("a@x.com".to_string()).unwrap();

        assert_eq!(
            repository.update(removed).await,
            Err(RepositoryError::NotFound)
        );
    }

    #[tokio::test]
    async fn test_update_and_delete_missing_rows() {
        let repository = InMemoryAccountRepository::new();
        let created = repository.create(new_account("a@x.com")).await.unwrap();

        repository.delete(&created.public_id).await.unwrap();

        assert_eq!(
            repository.update(created.clone()).await,
            Err(RepositoryError::NotFound)
        );
        assert_eq!(
            repository.delete(&created.public_id).await,
            Err(RepositoryError::NotFound)
        );
        assert_eq!(
            repository.find_by_public_id(&created.public_id).await,
            Ok(None)
        );
    }
}
