use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::ApiError;
use crate::account::errors::AccountError;
use crate::domain::account::models::PublicId;
use crate::domain::account::ports::AccountServicePort;
use crate::inbound::http::router::AppState;

pub async fn delete_account<AS: AccountServicePort>(
    State(state): State<AppState<AS>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let public_id = PublicId::from_string(&id).map_err(AccountError::from)?;

    state
        .account_service
        .delete_account(&public_id)
        .await
        .map_err(ApiError::from)?;

    Ok(StatusCode::NO_CONTENT)
}
