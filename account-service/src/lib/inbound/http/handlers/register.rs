use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::SessionData;
use crate::account::errors::AccountError;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::models::FirstName;
use crate::domain::account::models::LastName;
use crate::domain::account::models::Password;
use crate::domain::account::models::RegisterCommand;
use crate::domain::account::ports::AccountServicePort;
use crate::inbound::http::router::AppState;

pub async fn register<AS: AccountServicePort>(
    State(state): State<AppState<AS>>,
    Json(body): Json<RegisterRequest>,
) -> Result<ApiSuccess<SessionData>, ApiError> {
    state
        .account_service
        .register(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref session| ApiSuccess::new(StatusCode::CREATED, session.into()))
}

/// HTTP request body for registering an account (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterRequest {
    first_name: String,
    #[serde(default)]
    last_name: Option<String>,
    email: String,
    password: String,
}

impl RegisterRequest {
    fn try_into_command(self) -> Result<RegisterCommand, AccountError> {
        let first_name = FirstName::new(self.first_name)?;
        let last_name = self.last_name.map(LastName::new).transpose()?;
        let email = EmailAddress::new(self.email)?;
        let password = Password::new(self.password)?;
        Ok(RegisterCommand::new(
            first_name,
            last_name,
            email,
            password,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(first_name: &str, email: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            first_name: first_name.to_string(),
            last_name: None,
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn test_try_into_command_validates_every_field() {
        assert!(matches!(
            request("", "alice@example.com", "test_pass").try_into_command(),
            Err(AccountError::InvalidFirstName(_))
        ));
        assert!(matches!(
            RegisterRequest {
                last_name: Some("S".repeat(256)),
                ..request("Alice", "alice@example.com", "test_pass")
            }
            .try_into_command(),
            Err(AccountError::InvalidLastName(_))
        ));
        assert!(matches!(
            request(&"A".repeat(300), "alice@example.com", "test_pass").try_into_command(),
            Err(AccountError::InvalidFirstName(_))
        ));
        assert!(matches!(
            request("Alice", "alice", "test_pass").try_into_command(),
            Err(AccountError::InvalidEmail(_))
        ));
        assert!(matches!(
            request("Alice", "alice@example.com", "short").try_into_command(),
            Err(AccountError::InvalidPassword(_))
        ));
        assert!(request("Alice", "alice@example.com", "test_pass")
            .try_into_command()
            .is_ok());
    }
}
