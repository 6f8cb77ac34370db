//! Page navigator — runs the navigation guard for every non-API path.
//!
//! View rendering is out of scope; a proceeding navigation answers 200 with
//! the resolved view name, and a guarded navigation answers with an HTTP
//! redirect to the target route. Unknown paths hit the catch-all and go to
//! the login route.

use axum::extract::State;
use axum::http::{StatusCode, Uri};
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar};

use super::auth::COOKIE_NAME;
use crate::nav::{self, Decision};
use crate::services::auth::SessionIdentity;
use crate::state::AppState;

/// Fallback handler for all page paths.
pub async fn navigate(State(state): State<AppState>, jar: CookieJar, uri: Uri) -> Response {
    let Some(route) = nav::resolve(uri.path()) else {
        return Redirect::temporary(nav::login_route().path).into_response();
    };

    let token = jar.get(COOKIE_NAME).map(Cookie::value).map(str::to_owned);
    let identity = SessionIdentity::new(state.auth.clone(), token);

    match nav::guard(route, &identity, state.profiles.as_ref()).await {
        Decision::Proceed => (StatusCode::OK, route.name).into_response(),
        Decision::Redirect(target) => Redirect::temporary(target.path).into_response(),
    }
}

#[cfg(test)]
#[path = "pages_test.rs"]
mod tests;
