#![allow(dead_code)]

pub mod ws_helpers;

use axum::Router;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use std::sync::Arc;
use teamchat_server::{
    config::{BroadcastScope, Config},
    db, routes, AppState,
};

/// Create an in-memory SQLite pool with schema applied.
pub async fn setup_test_db() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create in-memory SQLite pool");

    // Enable foreign keys
    sqlx::query("PRAGMA foreign_keys = ON")
        .execute(&pool)
        .await
        .unwrap();

    db::apply_schema(&pool).await.unwrap();

    pool
}

pub fn test_config(broadcast_scope: BroadcastScope) -> Config {
    Config {
        host: "127.0.0.1".into(),
        port: 0,
        database_path: ":memory:".into(),
        database_max_connections: 1,
        broadcast_scope,
    }
}

pub fn create_test_state(pool: SqlitePool) -> Arc<AppState> {
    create_test_state_with_scope(pool, BroadcastScope::Global)
}

pub fn create_test_state_with_scope(pool: SqlitePool, scope: BroadcastScope) -> Arc<AppState> {
    Arc::new(AppState::new(pool, test_config(scope)))
}

/// A file-backed WAL pool with several connections, for tests that need overlapping
/// transactions. Keep the returned directory alive for the life of the pool.
pub async fn setup_file_db(max_connections: u32) -> (SqlitePool, tempfile::TempDir) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("teamchat-test.db");
    let pool = db::init_pool(path.to_str().unwrap(), max_connections)
        .await
        .expect("Failed to open file-backed pool");
    (pool, dir)
}

/// Build a test Axum app with the given pool.
pub fn create_test_app(pool: SqlitePool) -> Router {
    routes::build_router(create_test_state(pool))
}

/// Create a test user directly in the database. Returns the user id.
pub async fn create_test_user(pool: &SqlitePool, name: &str, email: &str) -> String {
    let user_id = uuid::Uuid::new_v4().to_string();

    sqlx::query(
        r#"INSERT INTO "users" (id, name, email, status, created_at) VALUES (?, ?, ?, 'online', ?)"#,
    )
    .bind(&user_id)
    .bind(name)
    .bind(email)
    .bind(db::now_timestamp())
    .execute(pool)
    .await
    .unwrap();

    user_id
}

/// Create a workspace owned by `owner_id` with an owner membership. Returns (workspace_id, invite_code).
pub async fn create_test_workspace(
    pool: &SqlitePool,
    owner_id: &str,
    name: &str,
) -> (String, String) {
    let workspace_id = uuid::Uuid::new_v4().to_string();
    let invite_code = format!("TEST{}", &workspace_id[..6]).to_uppercase();
    let now = db::now_timestamp();

    sqlx::query(
        r#"INSERT INTO "workspaces" (id, name, description, owner_id, is_personal, invite_code, created_at)
           VALUES (?, ?, '', ?, 0, ?, ?)"#,
    )
    .bind(&workspace_id)
    .bind(name)
    .bind(owner_id)
    .bind(&invite_code)
    .bind(&now)
    .execute(pool)
    .await
    .unwrap();

    sqlx::query(
        "INSERT INTO workspace_members (workspace_id, user_id, role, joined_at) VALUES (?, ?, 'owner', ?)",
    )
    .bind(&workspace_id)
    .bind(owner_id)
    .bind(&now)
    .execute(pool)
    .await
    .unwrap();

    (workspace_id, invite_code)
}

/// Create a channel, optionally inside a workspace. Returns the channel id.
pub async fn create_test_channel(
    pool: &SqlitePool,
    workspace_id: Option<&str>,
    name: &str,
) -> String {
    let channel_id = uuid::Uuid::new_v4().to_string();

    sqlx::query(
        r#"INSERT INTO "channels" (id, workspace_id, name, description, is_private, created_at)
           VALUES (?, ?, ?, '', 0, ?)"#,
    )
    .bind(&channel_id)
    .bind(workspace_id)
    .bind(name)
    .bind(db::now_timestamp())
    .execute(pool)
    .await
    .unwrap();

    channel_id
}

/// Insert a message row directly. Returns the message id.
pub async fn insert_message(
    pool: &SqlitePool,
    channel_id: &str,
    user_id: &str,
    content: &str,
) -> String {
    let message_id = uuid::Uuid::new_v4().to_string();

    sqlx::query(
        r#"INSERT INTO "messages" (id, channel_id, user_id, content, created_at)
           VALUES (?, ?, ?, ?, ?)"#,
    )
    .bind(&message_id)
    .bind(channel_id)
    .bind(user_id)
    .bind(content)
    .bind(db::now_timestamp())
    .execute(pool)
    .await
    .unwrap();

    message_id
}

/// A user with one workspace and a `general` channel in it. Returns (user_id, workspace_id, channel_id).
pub async fn seed_channel(pool: &SqlitePool) -> (String, String, String) {
    let user_id = create_test_user(pool, "alice", "alice@test.com").await;
    let (workspace_id, _) = create_test_workspace(pool, &user_id, "Acme").await;
    let channel_id = create_test_channel(pool, Some(&workspace_id), "general").await;
    (user_id, workspace_id, channel_id)
}

pub async fn count_members(pool: &SqlitePool, workspace_id: &str) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM workspace_members WHERE workspace_id = ?")
        .bind(workspace_id)
        .fetch_one(pool)
        .await
        .unwrap()
}

/// Rows stored for one (message, user, emoji) key.
pub async fn count_reactions_for_key(
    pool: &SqlitePool,
    message_id: &str,
    user_id: &str,
    emoji: &str,
) -> i64 {
    sqlx::query_scalar(
        "SELECT COUNT(*) FROM reactions WHERE message_id = ? AND user_id = ? AND emoji = ?",
    )
    .bind(message_id)
    .bind(user_id)
    .bind(emoji)
    .fetch_one(pool)
    .await
    .unwrap()
}
