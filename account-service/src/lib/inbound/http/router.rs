use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::delete_account::delete_account;
use super::handlers::get_account::get_account;
use super::handlers::login::login;
use super::handlers::register::register;
use super::handlers::update_account::update_account;
use super::middleware::authenticate as auth_middleware;
use crate::domain::account::ports::AccountServicePort;

pub struct AppState<AS: AccountServicePort> {
    pub account_service: Arc<AS>,
    pub authenticator: Arc<Authenticator>,
}

impl<AS: AccountServicePort> Clone for AppState<AS> {
    fn clone(&self) -> Self {
        Self {
            account_service: Arc::clone(&self.account_service),
            authenticator: Arc::clone(&self.authenticator),
        }
    }
}

/// Build the HTTP application.
///
/// Requests running longer than `request_timeout` are answered with
/// `408 Request Timeout` and their handler future is dropped.
pub fn create_router<AS: AccountServicePort>(
    account_service: Arc<AS>,
    authenticator: Arc<Authenticator>,
    request_timeout: Duration,
) -> Router {
    let state = AppState {
        account_service,
        authenticator,
    };

    let public_routes = Router::new()
        .route("/api/auth/login", post(login::<AS>))
        .route("/api/users", post(register::<AS>));

    let protected_routes = Router::new()
        .route(
            "/api/users/:public_id",
            get(get_account::<AS>)
                .patch(update_account::<AS>)
                .delete(delete_account::<AS>),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware::<AS>,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(TimeoutLayer::new(request_timeout))
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
