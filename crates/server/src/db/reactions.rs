use sqlx::SqliteExecutor;

use crate::models::Reaction;

/// Delete the row with this exact natural key. Returns rows removed (0 or 1).
pub async fn delete_one<'e, E: SqliteExecutor<'e>>(
    db: E,
    message_id: &str,
    user_id: &str,
    emoji: &str,
) -> Result<u64, sqlx::Error> {
    let result =
        sqlx::query("DELETE FROM reactions WHERE message_id = ? AND user_id = ? AND emoji = ?")
            .bind(message_id)
            .bind(user_id)
            .bind(emoji)
            .execute(db)
            .await?;

    Ok(result.rows_affected())
}

/// Insert the natural key unless it already exists or the message/user does not resolve.
/// Returns rows written (0 or 1).
pub async fn insert_one<'e, E: SqliteExecutor<'e>>(
    db: E,
    message_id: &str,
    user_id: &str,
    emoji: &str,
    created_at: &str,
) -> Result<u64, sqlx::Error> {
    // The WHERE clause is required before ON CONFLICT when inserting from a SELECT.
    let result = sqlx::query(
        r#"INSERT INTO reactions (message_id, user_id, emoji, created_at)
           SELECT ?, ?, ?, ?
           WHERE EXISTS (SELECT 1 FROM "messages" WHERE id = ?)
             AND EXISTS (SELECT 1 FROM "users" WHERE id = ?)
           ON CONFLICT(message_id, user_id, emoji) DO NOTHING"#,
    )
    .bind(message_id)
    .bind(user_id)
    .bind(emoji)
    .bind(created_at)
    .bind(message_id)
    .bind(user_id)
    .execute(db)
    .await?;

    Ok(result.rows_affected())
}

/// Reaction rows of one message in creation order.
pub async fn list_for_message<'e, E: SqliteExecutor<'e>>(
    db: E,
    message_id: &str,
) -> Result<Vec<Reaction>, sqlx::Error> {
    sqlx::query_as::<_, Reaction>("SELECT * FROM reactions WHERE message_id = ? ORDER BY id ASC")
        .bind(message_id)
        .fetch_all(db)
        .await
}

/// Reaction rows of every message in a channel, in creation order.
pub async fn list_for_channel<'e, E: SqliteExecutor<'e>>(
    db: E,
    channel_id: &str,
) -> Result<Vec<Reaction>, sqlx::Error> {
    sqlx::query_as::<_, Reaction>(
        r#"SELECT r.* FROM reactions r
           WHERE r.message_id IN (SELECT id FROM "messages" WHERE channel_id = ?)
           ORDER BY r.id ASC"#,
    )
    .bind(channel_id)
    .fetch_all(db)
    .await
}
