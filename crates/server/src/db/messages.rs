use sqlx::SqliteExecutor;

use crate::models::Message;

pub async fn find_by_id<'e, E: SqliteExecutor<'e>>(
    db: E,
    id: &str,
) -> Result<Option<Message>, sqlx::Error> {
    sqlx::query_as::<_, Message>(r#"SELECT * FROM "messages" WHERE id = ?"#)
        .bind(id)
        .fetch_optional(db)
        .await
}

/// Insert only if the referenced channel and author exist. Returns whether a row was written.
pub async fn insert_checked<'e, E: SqliteExecutor<'e>>(
    db: E,
    message: &Message,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"INSERT INTO "messages" (id, channel_id, user_id, content, created_at, is_pinned, pinned_by, pinned_at)
           SELECT ?, ?, ?, ?, ?, ?, ?, ?
           WHERE EXISTS (SELECT 1 FROM "channels" WHERE id = ?)
             AND EXISTS (SELECT 1 FROM "users" WHERE id = ?)"#,
    )
    .bind(&message.id)
    .bind(&message.channel_id)
    .bind(&message.user_id)
    .bind(&message.content)
    .bind(&message.created_at)
    .bind(message.is_pinned)
    .bind(&message.pinned_by)
    .bind(&message.pinned_at)
    .bind(&message.channel_id)
    .bind(&message.user_id)
    .execute(db)
    .await?;

    Ok(result.rows_affected() == 1)
}

/// Messages of a channel in creation order.
pub async fn list_for_channel<'e, E: SqliteExecutor<'e>>(
    db: E,
    channel_id: &str,
) -> Result<Vec<Message>, sqlx::Error> {
    sqlx::query_as::<_, Message>(
        r#"SELECT * FROM "messages" WHERE channel_id = ? ORDER BY created_at ASC, rowid ASC"#,
    )
    .bind(channel_id)
    .fetch_all(db)
    .await
}

/// Overwrite the pin projection. When pinning, `pinned_by` must name an existing user.
/// Returns the number of rows touched: 0 when either id does not resolve.
pub async fn set_pin<'e, E: SqliteExecutor<'e>>(
    db: E,
    id: &str,
    is_pinned: bool,
    pinned_by: Option<&str>,
    pinned_at: Option<&str>,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"UPDATE "messages" SET is_pinned = ?, pinned_by = ?, pinned_at = ?
           WHERE id = ?
             AND (? IS NULL OR EXISTS (SELECT 1 FROM "users" WHERE id = ?))"#,
    )
    .bind(is_pinned)
    .bind(pinned_by)
    .bind(pinned_at)
    .bind(id)
    .bind(pinned_by)
    .bind(pinned_by)
    .execute(db)
    .await?;

    Ok(result.rows_affected())
}
