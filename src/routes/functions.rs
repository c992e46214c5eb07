//! Serverless function handlers: access-token claim hook and role check.
//!
//! Both endpoints are called with `Authorization: Bearer <HOOK_SECRET>` and
//! answer errors in the auth platform's hook error shape:
//! `{"error": {"http_code": .., "message": ..}}`.

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Json, Response};
use roles::{ROLE_CLAIM, Role};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::services::roles::RoleLookupError;
use crate::state::AppState;

// =============================================================================
// REQUEST / RESPONSE TYPES
// =============================================================================

/// Payload the auth platform sends before issuing an access token.
#[derive(Debug, Deserialize)]
pub struct AccessTokenHookRequest {
    pub user_id: Uuid,
    pub claims: Map<String, Value>,
    #[serde(default)]
    pub authentication_method: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AccessTokenHookResponse {
    pub claims: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
pub struct VerifyRoleRequest {
    pub user_id: Uuid,
    pub role: String,
}

#[derive(Debug, Serialize)]
pub struct VerifyRoleResponse {
    /// Whether the stored role matches the requested one.
    pub consistent: bool,
    pub user_role: Role,
}

// =============================================================================
// HELPERS
// =============================================================================

fn error_response(status: StatusCode, message: &str) -> Response {
    let body = serde_json::json!({
        "error": { "http_code": status.as_u16(), "message": message }
    });
    (status, Json(body)).into_response()
}

fn lookup_error_response(err: &RoleLookupError) -> Response {
    tracing::error!(error = %err, "role lookup failed");
    error_response(StatusCode::BAD_GATEWAY, "role lookup failed")
}

/// Compare without short-circuiting on the first differing byte.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

pub(crate) fn is_authorized(headers: &HeaderMap, secret: &str) -> bool {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .is_some_and(|token| constant_time_eq(token.trim().as_bytes(), secret.as_bytes()))
}

// =============================================================================
// HANDLERS
// =============================================================================

/// `POST /functions/v1/custom-access-token` — stamp `user_role` into the
/// claims of a token about to be issued.
///
/// Accounts without a profile get `user_role: null`; every other claim is
/// passed through untouched.
pub async fn custom_access_token(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<AccessTokenHookRequest>,
) -> Response {
    if !is_authorized(&headers, &state.hook_secret) {
        return error_response(StatusCode::UNAUTHORIZED, "invalid hook secret");
    }

    let role = match state.roles.user_role(req.user_id).await {
        Ok(role) => role,
        Err(e) => return lookup_error_response(&e),
    };

    tracing::info!(
        user_id = %req.user_id,
        role = role.map(Role::as_str),
        method = req.authentication_method.as_deref(),
        "issuing access token claims"
    );

    let mut claims = req.claims;
    claims.insert(ROLE_CLAIM.to_owned(), role.map_or(Value::Null, |r| Value::from(r.as_str())));
    Json(AccessTokenHookResponse { claims }).into_response()
}

/// `POST /functions/v1/verify-role` — make sure the role chosen at sign-up is
/// the role on record.
pub async fn verify_role(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<VerifyRoleRequest>,
) -> Response {
    if !is_authorized(&headers, &state.hook_secret) {
        return error_response(StatusCode::UNAUTHORIZED, "invalid hook secret");
    }

    let requested = match req.role.parse::<Role>() {
        Ok(role) => role,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, &e.to_string()),
    };
    if !requested.is_self_assignable() {
        tracing::warn!(user_id = %req.user_id, role = %requested, "refused self-assigned role");
        return error_response(StatusCode::FORBIDDEN, "role cannot be self-assigned");
    }

    let stored = match state.roles.ensure_user_role(req.user_id, requested).await {
        Ok(role) => role,
        Err(e) => return lookup_error_response(&e),
    };

    let consistent = stored == requested;
    if !consistent {
        tracing::warn!(user_id = %req.user_id, %requested, %stored, "role mismatch");
    }
    Json(VerifyRoleResponse { consistent, user_role: stored }).into_response()
}

#[cfg(test)]
#[path = "functions_test.rs"]
mod tests;
