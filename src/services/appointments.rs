//! Appointment lookup for a single user.
//!
//! One parameterized query; the bind keeps user input out of the SQL text.
//! Rows come back in store order — no ordering is imposed here. An empty
//! result is a normal `Ok(vec![])`, not an error.

use sqlx::{PgPool, Row};

#[derive(Debug, thiserror::Error)]
pub enum AppointmentError {
    /// Any storage failure, connection or query alike. Callers surface this
    /// as a generic failure; detail goes to the log only.
    #[error("database query failed: {0}")]
    Query(#[from] sqlx::Error),
}

/// An appointment row. The schema is owned by the provider side; this
/// service only filters by `user_id`.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Appointment {
    pub id: i64,
    pub user_id: i64,
    /// Scheduled time formatted by the store, if set.
    pub scheduled_at: Option<String>,
    /// Provider-defined payload (practitioner, location, notes, ...).
    pub details: serde_json::Value,
}

/// Fetch all appointments belonging to `user_id`.
///
/// # Errors
///
/// Returns [`AppointmentError::Query`] on any storage failure.
pub async fn fetch_for_user(pool: &PgPool, user_id: i64) -> Result<Vec<Appointment>, AppointmentError> {
    let rows = sqlx::query(
        r"SELECT id, user_id,
                 to_char(scheduled_at, 'YYYY-MM-DD HH24:MI') AS scheduled_at,
                 details
          FROM appointments
          WHERE user_id = $1",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .iter()
        .map(|r| Appointment {
            id: r.get("id"),
            user_id: r.get("user_id"),
            scheduled_at: r.get("scheduled_at"),
            details: r.get("details"),
        })
        .collect())
}

#[cfg(test)]
#[path = "appointments_test.rs"]
mod tests;
