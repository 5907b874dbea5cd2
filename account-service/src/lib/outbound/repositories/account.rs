use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::account::errors::RepositoryError;
use crate::domain::account::models::Account;
use crate::domain::account::models::AccountKey;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::models::FirstName;
use crate::domain::account::models::LastName;
use crate::domain::account::models::NewAccount;
use crate::domain::account::models::PublicId;
use crate::domain::account::ports::AccountRepository;

pub struct PostgresAccountRepository {
    pool: PgPool,
}

impl PostgresAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct AccountRow {
    id: i64,
    public_id: Uuid,
    first_name: String,
    last_name: Option<String>,
    email: String,
    password_hash: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<AccountRow> for Account {
    type Error = RepositoryError;

    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        Ok(Account {
            key: AccountKey(row.id),
            public_id: PublicId(row.public_id),
            first_name: FirstName::new(row.first_name)
                .map_err(|e| RepositoryError::Corrupted(e.to_string()))?,
            last_name: row
                .last_name
                .map(LastName::new)
                .transpose()
                .map_err(|e| RepositoryError::Corrupted(e.to_string()))?,
            email: EmailAddress::new(row.email)
                .map_err(|e| RepositoryError::Corrupted(e.to_string()))?,
            password_hash: row.password_hash,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn map_write_error(e: sqlx::Error) -> RepositoryError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return RepositoryError::UniqueViolation {
                constraint: db_err.constraint().unwrap_or_default().to_string(),
            };
        }
    }
    RepositoryError::Database(e.to_string())
}

fn map_read_error(e: sqlx::Error) -> RepositoryError {
    RepositoryError::Database(e.to_string())
}

#[async_trait]
impl AccountRepository for PostgresAccountRepository {
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<Account>, RepositoryError> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT id, public_id, first_name, last_name, email, password_hash, created_at, updated_at
            FROM accounts
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_read_error)?;

        row.map(Account::try_from).transpose()
    }

    async fn find_by_public_id(
        &self,
        id: &PublicId,
    ) -> Result<Option<Account>, RepositoryError> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT id, public_id, first_name, last_name, email, password_hash, created_at, updated_at
            FROM accounts
            WHERE public_id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_read_error)?;

        row.map(Account::try_from).transpose()
    }

    async fn create(&self, account: NewAccount) -> Result<Account, RepositoryError> {
        // created_at and updated_at share the same now() within the statement.
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            INSERT INTO accounts (first_name, last_name, email, password_hash)
            VALUES ($1, $2, $3, $4)
            RETURNING id, public_id, first_name, last_name, email, password_hash, created_at, updated_at
            "#,
        )
        .bind(account.first_name.as_str())
        .bind(account.last_name.as_ref().map(LastName::as_str))
        .bind(account.email.as_str())
        .bind(&account.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(map_write_error)?;

        Account::try_from(row)
    }

    async fn update(&self, account: Account) -> Result<Account, RepositoryError> {
        let updated_at: Option<DateTime<Utc>> = sqlx::query_scalar(
            r#"
            UPDATE accounts
            SET first_name = $2,
                last_name = $3,
                email = $4,
                updated_at = GREATEST(now(), updated_at + interval '1 microsecond')
            WHERE id = $1
            RETURNING updated_at
            "#,
        )
        .bind(account.key.0)
        .bind(account.first_name.as_str())
        .bind(account.last_name.as_ref().map(LastName::as_str))
        .bind(account.email.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_write_error)?;

        match updated_at {
            Some(updated_at) => Ok(Account {
                updated_at,
                ..account
            }),
            None => Err(RepositoryError::NotFound),
        }
    }

    async fn delete(&self, id: &PublicId) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r#"
            DELETE FROM accounts
            WHERE public_id = $1
            "#,
        )
        .bind(id.0)
        .execute(&self.pool)
        .await
        .map_err(map_read_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
