//! Shared database types for Parley
//!
//! Pool construction and embedded migrations.

use std::str::FromStr;
use std::time::Duration;

use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

/// Schema migrations, embedded at compile time from the workspace `migrations/` directory.
pub static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Open a pool against `database_url` and bring the schema up to date.
///
/// The database file is created when missing and foreign keys are enforced.
/// In-memory URLs are pinned to a single connection that never expires,
/// because every new SQLite connection to `:memory:` sees an empty database.
pub async fn connect(database_url: &str, max_connections: u32) -> crate::Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool_options = if is_in_memory(database_url) {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>)
    } else {
        SqlitePoolOptions::new().max_connections(max_connections.max(1))
    };

    let pool = pool_options.connect_with(options).await?;
    MIGRATOR.run(&pool).await?;

    tracing::debug!(url = %database_url, "Database pool ready, migrations applied");
    Ok(pool)
}

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}
