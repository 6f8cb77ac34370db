//! Profile store — maps a user id to the role on their profile row.

use sqlx::{PgPool, Row};

use crate::nav::{ProfileStore, ProviderError, Role};

/// Normalize the nullable `role` column. Unrecognized spellings are `None`,
/// same as an absent role; the guard owns what `None` means.
pub(crate) fn role_from_column(raw: Option<String>) -> Option<Role> {
    raw.as_deref().and_then(Role::parse)
}

/// Role lookup backed by the `profiles` table.
pub struct PgProfiles {
    pool: PgPool,
}

impl PgProfiles {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl ProfileStore for PgProfiles {
    async fn role_for(&self, user_id: i64) -> Result<Option<Role>, ProviderError> {
        let row = sqlx::query("SELECT role FROM profiles WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| ProviderError(e.to_string()))?;

        // Missing profile and missing role collapse to the same answer: no
        // recognized role.
        Ok(row.and_then(|r| role_from_column(r.get("role"))))
    }
}

#[cfg(test)]
#[path = "profile_test.rs"]
mod tests;
