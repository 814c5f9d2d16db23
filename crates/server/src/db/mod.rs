//! Entity store: schema bootstrap plus one accessor module per table.
//!
//! Accessors are generic over [`sqlx::SqliteExecutor`] so the same query runs directly on the
//! pool or inside a transaction opened by the mutation layer.

pub mod channels;
pub mod messages;
pub mod reactions;
pub mod users;
pub mod workspaces;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

const SCHEMA: &str = include_str!("schema.sql");

pub async fn init_pool(database_path: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    // Ensure parent directory exists
    if let Some(parent) = Path::new(database_path).parent() {
        std::fs::create_dir_all(parent).ok();
    }

    let options = SqliteConnectOptions::from_str(&format!("sqlite:{}", database_path))?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .foreign_keys(true)
        .busy_timeout(Duration::from_secs(5));

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections.max(1))
        .connect_with(options)
        .await?;

    apply_schema(&pool).await?;

    tracing::info!("Database initialized at {}", database_path);
    Ok(pool)
}

/// Run every statement of the bundled schema. Safe to repeat.
pub async fn apply_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    // SQLx doesn't support multi-statement queries directly
    for statement in SCHEMA.split(';') {
        let trimmed = statement.trim();
        if !trimmed.is_empty() {
            sqlx::query(trimmed).execute(pool).await?;
        }
    }
    Ok(())
}

/// Current time as fixed-width RFC 3339, so stored timestamps sort lexically.
pub fn now_timestamp() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Micros, true)
}

pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
