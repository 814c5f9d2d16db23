use sqlx::SqliteExecutor;

use crate::models::User;

pub async fn find_by_id<'e, E: SqliteExecutor<'e>>(
    db: E,
    id: &str,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(r#"SELECT * FROM "users" WHERE id = ?"#)
        .bind(id)
        .fetch_optional(db)
        .await
}

pub async fn find_by_email<'e, E: SqliteExecutor<'e>>(
    db: E,
    email: &str,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(r#"SELECT * FROM "users" WHERE email = ?"#)
        .bind(email)
        .fetch_optional(db)
        .await
}

/// Every user who has posted in the channel.
pub async fn list_channel_authors<'e, E: SqliteExecutor<'e>>(
    db: E,
    channel_id: &str,
) -> Result<Vec<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"SELECT * FROM "users"
           WHERE id IN (SELECT DISTINCT user_id FROM "messages" WHERE channel_id = ?)"#,
    )
    .bind(channel_id)
    .fetch_all(db)
    .await
}

/// Insert unless the email is already taken. Returns whether a row was written.
pub async fn insert<'e, E: SqliteExecutor<'e>>(db: E, user: &User) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"INSERT INTO "users" (id, name, email, avatar, status, created_at)
           VALUES (?, ?, ?, ?, ?, ?)
           ON CONFLICT(email) DO NOTHING"#,
    )
    .bind(&user.id)
    .bind(&user.name)
    .bind(&user.email)
    .bind(&user.avatar)
    .bind(&user.status)
    .bind(&user.created_at)
    .execute(db)
    .await?;

    Ok(result.rows_affected() == 1)
}
