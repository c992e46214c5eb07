//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Binds the serverless function endpoints the auth platform and the mobile
//! app call, plus a health probe, under a single Axum router.

pub mod functions;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the application router.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/functions/v1/custom-access-token", post(functions::custom_access_token))
        .route("/functions/v1/verify-role", post(functions::verify_role))
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
