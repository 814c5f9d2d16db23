use sqlx::SqliteExecutor;

use crate::models::{MemberRole, Workspace, WorkspaceSummary};

pub async fn find_by_id<'e, E: SqliteExecutor<'e>>(
    db: E,
    id: &str,
) -> Result<Option<Workspace>, sqlx::Error> {
    sqlx::query_as::<_, Workspace>(r#"SELECT * FROM "workspaces" WHERE id = ?"#)
        .bind(id)
        .fetch_optional(db)
        .await
}

pub async fn find_by_invite_code<'e, E: SqliteExecutor<'e>>(
    db: E,
    invite_code: &str,
) -> Result<Option<Workspace>, sqlx::Error> {
    sqlx::query_as::<_, Workspace>(r#"SELECT * FROM "workspaces" WHERE invite_code = ?"#)
        .bind(invite_code)
        .fetch_optional(db)
        .await
}

pub async fn insert<'e, E: SqliteExecutor<'e>>(
    db: E,
    workspace: &Workspace,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"INSERT INTO "workspaces" (id, name, description, owner_id, is_personal, invite_code, created_at)
           VALUES (?, ?, ?, ?, ?, ?, ?)"#,
    )
    .bind(&workspace.id)
    .bind(&workspace.name)
    .bind(&workspace.description)
    .bind(&workspace.owner_id)
    .bind(workspace.is_personal)
    .bind(&workspace.invite_code)
    .bind(&workspace.created_at)
    .execute(db)
    .await?;
    Ok(())
}

pub async fn member_role<'e, E: SqliteExecutor<'e>>(
    db: E,
    workspace_id: &str,
    user_id: &str,
) -> Result<Option<String>, sqlx::Error> {
    sqlx::query_scalar::<_, String>(
        "SELECT role FROM workspace_members WHERE workspace_id = ? AND user_id = ?",
    )
    .bind(workspace_id)
    .bind(user_id)
    .fetch_optional(db)
    .await
}

/// Add a membership row. An existing (workspace, user) pair is left untouched.
pub async fn add_member<'e, E: SqliteExecutor<'e>>(
    db: E,
    workspace_id: &str,
    user_id: &str,
    role: MemberRole,
    joined_at: &str,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"INSERT INTO workspace_members (workspace_id, user_id, role, joined_at)
           VALUES (?, ?, ?, ?)
           ON CONFLICT(workspace_id, user_id) DO NOTHING"#,
    )
    .bind(workspace_id)
    .bind(user_id)
    .bind(role.as_str())
    .bind(joined_at)
    .execute(db)
    .await?;

    Ok(result.rows_affected() == 1)
}

/// Memberships first (oldest join first), then owned workspaces that lack a membership row.
pub async fn list_for_user<'e, E: SqliteExecutor<'e>>(
    db: E,
    user_id: &str,
) -> Result<Vec<WorkspaceSummary>, sqlx::Error> {
    sqlx::query_as::<_, WorkspaceSummary>(
        r#"SELECT id, name, description, role, is_personal, invite_code FROM (
               SELECT w.id, w.name, w.description, m.role, w.is_personal, w.invite_code,
                      0 AS grp, m.joined_at AS sort_key
               FROM workspace_members m
               INNER JOIN workspaces w ON w.id = m.workspace_id
               WHERE m.user_id = ?
               UNION ALL
               SELECT w.id, w.name, w.description, 'owner' AS role, w.is_personal, w.invite_code,
                      1 AS grp, w.created_at AS sort_key
               FROM workspaces w
               WHERE w.owner_id = ?
                 AND NOT EXISTS (
                     SELECT 1 FROM workspace_members m
                     WHERE m.workspace_id = w.id AND m.user_id = ?
                 )
           )
           ORDER BY grp ASC, sort_key ASC"#,
    )
    .bind(user_id)
    .bind(user_id)
    .bind(user_id)
    .fetch_all(db)
    .await
}
