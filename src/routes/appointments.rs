//! Appointments endpoint.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use super::auth::AuthUser;
use crate::services::appointments;
use crate::state::AppState;

/// Fixed 500 body. Storage detail never leaks to the client.
pub(crate) fn error_body() -> serde_json::Value {
    serde_json::json!({ "error": "Error fetching appointments" })
}

/// `GET /api/appointments/{user_id}` — appointments for one user.
///
/// Requires a session matching the requested user: callers may only read
/// their own appointments. 401 without a valid session, 403 on mismatch,
/// 500 with a generic body on query failure.
pub async fn list_for_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<i64>,
) -> Response {
    if auth.user.id != user_id {
        return StatusCode::FORBIDDEN.into_response();
    }

    match appointments::fetch_for_user(&state.pool, user_id).await {
        Ok(rows) => (StatusCode::OK, Json(rows)).into_response(),
        Err(e) => {
            tracing::error!(error = %e, user_id, "appointment lookup failed");
            (StatusCode::INTERNAL_SERVER_ERROR, Json(error_body())).into_response()
        }
    }
}

#[cfg(test)]
#[path = "appointments_test.rs"]
mod tests;
