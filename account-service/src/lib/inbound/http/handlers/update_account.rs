use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Deserializer;

use super::AccountData;
use super::ApiError;
use super::ApiSuccess;
use crate::account::errors::AccountError;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::models::FirstName;
use crate::domain::account::models::LastName;
use crate::domain::account::models::PublicId;
use crate::domain::account::models::UpdateAccountCommand;
use crate::domain::account::ports::AccountServicePort;
use crate::inbound::http::router::AppState;

/// HTTP request body for updating an account (raw JSON)
///
/// An absent key leaves the field untouched. `"last_name": null` clears it.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateAccountRequest {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub last_name: Option<Option<String>>,
    #[serde(default)]
    pub email: Option<String>,
}

fn deserialize_some<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

impl UpdateAccountRequest {
    fn try_into_command(self) -> Result<UpdateAccountCommand, AccountError> {
        let first_name = self.first_name.map(FirstName::new).transpose()?;
        let last_name = self
            .last_name
            .map(|last_name| last_name.map(LastName::new).transpose())
            .transpose()?;
        let email = self.email.map(EmailAddress::new).transpose()?;

        Ok(UpdateAccountCommand {
            first_name,
            last_name,
            email,
        })
    }
}

pub async fn update_account<AS: AccountServicePort>(
    State(state): State<AppState<AS>>,
    Path(id): Path<String>,
    Json(req): Json<UpdateAccountRequest>,
) -> Result<ApiSuccess<AccountData>, ApiError> {
    let public_id = PublicId::from_string(&id).map_err(AccountError::from)?;
    let command = req.try_into_command()?;

    state
        .account_service
        .update_account(&public_id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref profile| ApiSuccess::new(StatusCode::OK, profile.into()))
}
