//! Store access for the campaign engine.
//!
//! The database is owned by the automation application: this crate opens the
//! existing file and reads or writes rows under its fixed schema. It never
//! creates or migrates tables.

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

pub mod config;
pub mod models;
pub mod repositories;

pub use config::{DbConfig, DbConfigError};

pub type DbPool = sqlx::SqlitePool;

/// Create a connection pool for the configured database file.
pub async fn create_pool(config: &DbConfig) -> Result<DbPool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(&config.database_url)?
        .create_if_missing(false)
        .foreign_keys(true)
        .busy_timeout(Duration::from_millis(config.busy_timeout_ms));

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(options)
        .await?;

    tracing::info!(
        max_connections = config.max_connections,
        busy_timeout_ms = config.busy_timeout_ms,
        "Database connection pool created"
    );
    Ok(pool)
}

/// Verify the store answers queries.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
