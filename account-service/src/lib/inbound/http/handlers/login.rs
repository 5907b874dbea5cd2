use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::SessionData;
use crate::domain::account::models::LoginCommand;
use crate::domain::account::models::Password;
use crate::domain::account::ports::AccountServicePort;
use crate::inbound::http::router::AppState;

pub async fn login<AS: AccountServicePort>(
    State(state): State<AppState<AS>>,
    Json(body): Json<LoginRequestBody>,
) -> Result<ApiSuccess<SessionData>, ApiError> {
    // Email format is checked by the service so that a malformed address
    // fails exactly like an unknown one.
    let command = LoginCommand {
        email: body.email,
        password: Password::presented(body.password),
    };

    state
        .account_service
        .login(command)
        .await
        .map_err(ApiError::from)
        .map(|ref session| ApiSuccess::new(StatusCode::OK, session.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequestBody {
    email: String,
    password: String,
}
