use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::Request;
use axum::http::header::COOKIE;

use super::*;
use crate::nav::{ProfileStore, ProviderError, Role};
use crate::services::auth::{AuthError, AuthProvider};
use crate::state::test_helpers;

// =============================================================================
// Mock capabilities
// =============================================================================

struct MockAuth {
    user: Option<SessionUser>,
    fail: bool,
}

#[async_trait::async_trait]
impl AuthProvider for MockAuth {
    async fn validate(&self, _token: &str) -> Result<Option<SessionUser>, AuthError> {
        if self.fail {
            return Err(AuthError::Db(sqlx::Error::PoolTimedOut));
        }
        Ok(self.user.clone())
    }

    async fn revoke(&self, _token: &str) -> Result<(), AuthError> {
        Ok(())
    }
}

struct NoRoles;

#[async_trait::async_trait]
impl ProfileStore for NoRoles {
    async fn role_for(&self, _user_id: i64) -> Result<Option<Role>, ProviderError> {
        Ok(None)
    }
}

fn mock_state(user: Option<SessionUser>, fail: bool) -> AppState {
    test_helpers::test_app_state_with(Arc::new(MockAuth { user, fail }), Arc::new(NoRoles))
}

fn request_parts(cookie: Option<&str>) -> axum::http::request::Parts {
    let mut builder = Request::builder().uri("/api/auth/me");
    if let Some(value) = cookie {
        builder = builder.header(COOKIE, value);
    }
    let (parts, ()) = builder.body(()).unwrap().into_parts();
    parts
}

// =============================================================================
// AuthUser extractor
// =============================================================================

#[tokio::test]
async fn missing_cookie_is_unauthorized() {
    // Failing provider proves no lookup happens without a token.
    let state = mock_state(None, true);
    let mut parts = request_parts(None);
    let err = AuthUser::from_request_parts(&mut parts, &state).await.unwrap_err();
    assert_eq!(err, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn empty_cookie_value_is_unauthorized() {
    let state = mock_state(None, true);
    let mut parts = request_parts(Some("session_token="));
    let err = AuthUser::from_request_parts(&mut parts, &state).await.unwrap_err();
    assert_eq!(err, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn unknown_token_is_unauthorized() {
    let state = mock_state(None, false);
    let mut parts = request_parts(Some("session_token=stale"));
    let err = AuthUser::from_request_parts(&mut parts, &state).await.unwrap_err();
    assert_eq!(err, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn auth_outage_is_internal_server_error() {
    let state = mock_state(None, true);
    let mut parts = request_parts(Some("session_token=tok"));
    let err = AuthUser::from_request_parts(&mut parts, &state).await.unwrap_err();
    assert_eq!(err, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn valid_session_resolves_user_and_keeps_token() {
    let user = SessionUser { id: 42, full_name: "Pat Doe".into(), role: Some(Role::Patient) };
    let state = mock_state(Some(user), false);
    let mut parts = request_parts(Some("session_token=tok"));
    let auth = AuthUser::from_request_parts(&mut parts, &state).await.unwrap();
    assert_eq!(auth.user.id, 42);
    assert_eq!(auth.token, "tok");
}

// =============================================================================
// env_bool — uses unique env var names to avoid races with parallel tests.
// =============================================================================

#[test]
fn env_bool_true_variants() {
    for (i, val) in ["1", "true", "yes", "on"].iter().enumerate() {
        let key = format!("__TEST_CB_EB_TRUE_{i}__");
        unsafe { std::env::set_var(&key, val) };
        assert_eq!(env_bool(&key), Some(true), "expected true for {val:?}");
        unsafe { std::env::remove_var(&key) };
    }
}

#[test]
fn env_bool_false_variants() {
    for (i, val) in ["0", "false", "no", "off"].iter().enumerate() {
        let key = format!("__TEST_CB_EB_FALSE_{i}__");
        unsafe { std::env::set_var(&key, val) };
        assert_eq!(env_bool(&key), Some(false), "expected false for {val:?}");
        unsafe { std::env::remove_var(&key) };
    }
}

#[test]
fn env_bool_case_insensitive_and_trimmed() {
    let key = "__TEST_CB_EB_CI_1__";
    unsafe { std::env::set_var(key, "  True ") };
    assert_eq!(env_bool(key), Some(true));
    unsafe { std::env::remove_var(key) };
}

#[test]
fn env_bool_invalid_returns_none() {
    let key = "__TEST_CB_EB_INVALID_77__";
    unsafe { std::env::set_var(key, "maybe") };
    assert_eq!(env_bool(key), None);
    unsafe { std::env::remove_var(key) };
}

#[test]
fn env_bool_unset_returns_none() {
    assert_eq!(env_bool("__TEST_CB_EB_SURELY_UNSET_42__"), None);
}

// =============================================================================
// cookie plumbing
// =============================================================================

#[test]
fn session_cookie_name_is_stable() {
    // The external auth provider writes this cookie; renaming it breaks login.
    assert_eq!(COOKIE_NAME, "session_token");
}
