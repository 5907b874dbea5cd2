use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::AccountData;
use super::ApiError;
use super::ApiSuccess;
use crate::account::errors::AccountError;
use crate::domain::account::models::PublicId;
use crate::domain::account::ports::AccountServicePort;
use crate::inbound::http::router::AppState;

pub async fn get_account<AS: AccountServicePort>(
    State(state): State<AppState<AS>>,
    Path(id): Path<String>,
) -> Result<ApiSuccess<AccountData>, ApiError> {
    let public_id = PublicId::from_string(&id).map_err(AccountError::from)?;

    state
        .account_service
        .get_account(&public_id)
        .await
        .map_err(ApiError::from)
        .map(|ref profile| ApiSuccess::new(StatusCode::OK, profile.into()))
}
