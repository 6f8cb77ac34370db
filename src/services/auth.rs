//! Session validation against the external auth provider's session store.
//!
//! Token issuance lives with the external provider; this module only
//! validates and revokes tokens that clients present. `AuthProvider` is an
//! injected capability (held in `AppState`) so handler tests substitute a
//! mock instead of a live database.

use std::sync::Arc;

use sqlx::{PgPool, Row};

use crate::nav::{IdentityProvider, ProviderError, Role};

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("database error: {0}")]
    Db(#[from] sqlx::Error),
}

/// User attached to a valid session.
#[derive(Debug, Clone, serde::Serialize)]
pub struct SessionUser {
    /// Opaque identifier issued by the auth provider.
    pub id: i64,
    /// Display name from the profile row.
    pub full_name: String,
    /// Stored role; `None` when the profile has no recognized role.
    pub role: Option<Role>,
}

/// "Validate a presented session token" — the auth provider seam.
#[async_trait::async_trait]
pub trait AuthProvider: Send + Sync {
    /// Resolve a session token to its user, or `None` when the token is
    /// unknown or expired.
    ///
    /// # Errors
    ///
    /// Returns an [`AuthError`] if the session store cannot be reached.
    async fn validate(&self, token: &str) -> Result<Option<SessionUser>, AuthError>;

    /// Delete a session by token. Unknown tokens are not an error.
    ///
    /// # Errors
    ///
    /// Returns an [`AuthError`] if the session store cannot be reached.
    async fn revoke(&self, token: &str) -> Result<(), AuthError>;
}

// =============================================================================
// POSTGRES IMPLEMENTATION
// =============================================================================

/// Session validation backed by the `sessions` and `profiles` tables.
pub struct PgAuth {
    pool: PgPool,
}

impl PgAuth {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl AuthProvider for PgAuth {
    async fn validate(&self, token: &str) -> Result<Option<SessionUser>, AuthError> {
        let row = sqlx::query(
            r"SELECT p.user_id, p.full_name, p.role
              FROM sessions s
              JOIN profiles p ON p.user_id = s.user_id
              WHERE s.token = $1 AND s.expires_at > now()",
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| SessionUser {
            id: r.get("user_id"),
            full_name: r.get("full_name"),
            role: r.get::<Option<String>, _>("role").as_deref().and_then(Role::parse),
        }))
    }

    async fn revoke(&self, token: &str) -> Result<(), AuthError> {
        sqlx::query("DELETE FROM sessions WHERE token = $1")
            .bind(token)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

// =============================================================================
// IDENTITY ADAPTER
// =============================================================================

/// Adapts a request's session token to the navigation guard's
/// "get current user" capability.
pub struct SessionIdentity {
    auth: Arc<dyn AuthProvider>,
    token: Option<String>,
}

impl SessionIdentity {
    #[must_use]
    pub fn new(auth: Arc<dyn AuthProvider>, token: Option<String>) -> Self {
        Self { auth, token }
    }
}

#[async_trait::async_trait]
impl IdentityProvider for SessionIdentity {
    async fn current_user(&self) -> Result<Option<i64>, ProviderError> {
        let Some(token) = &self.token else {
            return Ok(None);
        };
        let user = self
            .auth
            .validate(token)
            .await
            .map_err(|e| ProviderError(e.to_string()))?;
        Ok(user.map(|u| u.id))
    }
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
