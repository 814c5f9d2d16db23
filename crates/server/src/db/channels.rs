use sqlx::SqliteExecutor;

use crate::models::Channel;

pub async fn find_by_id<'e, E: SqliteExecutor<'e>>(
    db: E,
    id: &str,
) -> Result<Option<Channel>, sqlx::Error> {
    sqlx::query_as::<_, Channel>(r#"SELECT * FROM "channels" WHERE id = ?"#)
        .bind(id)
        .fetch_optional(db)
        .await
}

/// Name lookup within a workspace. `None` matches channels that belong to no workspace.
pub async fn find_by_name<'e, E: SqliteExecutor<'e>>(
    db: E,
    workspace_id: Option<&str>,
    name: &str,
) -> Result<Option<Channel>, sqlx::Error> {
    sqlx::query_as::<_, Channel>(r#"SELECT * FROM "channels" WHERE workspace_id IS ? AND name = ?"#)
        .bind(workspace_id)
        .bind(name)
        .fetch_optional(db)
        .await
}

pub async fn insert<'e, E: SqliteExecutor<'e>>(db: E, channel: &Channel) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"INSERT INTO "channels" (id, workspace_id, name, description, is_private, created_at)
           VALUES (?, ?, ?, ?, ?, ?)"#,
    )
    .bind(&channel.id)
    .bind(&channel.workspace_id)
    .bind(&channel.name)
    .bind(&channel.description)
    .bind(channel.is_private)
    .bind(&channel.created_at)
    .execute(db)
    .await?;
    Ok(())
}

pub async fn list_for_workspace<'e, E: SqliteExecutor<'e>>(
    db: E,
    workspace_id: &str,
) -> Result<Vec<Channel>, sqlx::Error> {
    sqlx::query_as::<_, Channel>(
        r#"SELECT * FROM "channels" WHERE workspace_id = ? ORDER BY created_at ASC, rowid ASC"#,
    )
    .bind(workspace_id)
    .fetch_all(db)
    .await
}
