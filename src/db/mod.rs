//! SQLx pool construction. Migrations are embedded in the binary and run
//! before the router binds, so every handler sees a current schema.

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

/// Pool size from `DB_MAX_CONNECTIONS`, defaulting to 5. The app holds no
/// other database handles, so this bounds total connections.
fn max_connections() -> u32 {
    std::env::var("DB_MAX_CONNECTIONS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(5)
}

/// Connect to Postgres and bring the schema up to date.
///
/// # Errors
///
/// Returns an error if the connection or a migration fails.
pub async fn init_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections())
        .connect(database_url)
        .await?;

    sqlx::migrate!("src/db/migrations").run(&pool).await?;

    Ok(pool)
}
