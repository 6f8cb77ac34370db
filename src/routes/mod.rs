//! Router assembly.
//!
//! API endpoints live under `/api`, liveness at `/healthz`, and every other
//! path falls through to the page navigator, which runs the navigation guard
//! and answers with the resolved view or a redirect.

pub mod appointments;
pub mod auth;
pub mod pages;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};

use crate::state::AppState;

/// Build the application router over shared state.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/appointments/{user_id}", get(appointments::list_for_user))
        .route("/api/auth/me", get(auth::me))
        .route("/api/auth/logout", post(auth::logout))
        .route("/healthz", get(healthz))
        .fallback(pages::navigate)
        .layer(cors)
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
