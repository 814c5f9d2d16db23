use axum::{
    extract::{Path, Query, State},
    Json,
};
use sqlx::SqliteConnection;
use std::sync::Arc;

use teamchat_shared::constants::{INVITE_CODE_ALPHABET, INVITE_CODE_LENGTH};

use crate::db;
use crate::error::{is_unique_violation, AppError};
use crate::models::{
    CreateWorkspaceRequest, CreatedWorkspace, JoinWorkspaceRequest, JoinedWorkspace, MemberRole,
    UserIdQuery, Workspace, WorkspaceSummary,
};
use crate::AppState;

const INVITE_CODE_ATTEMPTS: usize = 5;

pub fn generate_invite_code() -> String {
    nanoid::nanoid!(INVITE_CODE_LENGTH, &INVITE_CODE_ALPHABET)
}

/// Insert a workspace with a fresh invite code and make `owner_id` its owner.
pub(crate) async fn create_owned_workspace(
    conn: &mut SqliteConnection,
    owner_id: &str,
    name: &str,
    description: Option<String>,
    is_personal: bool,
) -> Result<Workspace, AppError> {
    let mut workspace = Workspace {
        id: db::new_id(),
        name: name.to_string(),
        description,
        owner_id: owner_id.to_string(),
        is_personal,
        invite_code: String::new(),
        created_at: db::now_timestamp(),
    };

    for _ in 0..INVITE_CODE_ATTEMPTS {
        workspace.invite_code = generate_invite_code();
        match db::workspaces::insert(&mut *conn, &workspace).await {
            Ok(()) => {
                db::workspaces::add_member(
                    &mut *conn,
                    &workspace.id,
                    owner_id,
                    MemberRole::Owner,
                    &workspace.created_at,
                )
                .await?;
                return Ok(workspace);
            }
            Err(e) if is_unique_violation(&e) => {
                tracing::warn!("Invite code collision, regenerating");
            }
            Err(e) => return Err(e.into()),
        }
    }

    Err(AppError::Conflict(
        "Could not allocate a unique invite code".into(),
    ))
}

/// GET /workspaces/my?user_id=
pub async fn my_workspaces(
    State(state): State<Arc<AppState>>,
    Query(query): Query<UserIdQuery>,
) -> Result<Json<Vec<WorkspaceSummary>>, AppError> {
    let workspaces = db::workspaces::list_for_user(&state.db, &query.user_id).await?;
    Ok(Json(workspaces))
}

/// GET /workspaces/:workspaceId
pub async fn get_workspace(
    State(state): State<Arc<AppState>>,
    Path(workspace_id): Path<String>,
) -> Result<Json<Workspace>, AppError> {
    db::workspaces::find_by_id(&state.db, &workspace_id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found("Workspace"))
}

/// POST /workspaces/create?user_id=
pub async fn create_workspace(
    State(state): State<Arc<AppState>>,
    Query(query): Query<UserIdQuery>,
    Json(body): Json<CreateWorkspaceRequest>,
) -> Result<Json<CreatedWorkspace>, AppError> {
    teamchat_shared::validation::validate_workspace_name(&body.name)
        .map_err(AppError::Validation)?;

    if db::users::find_by_id(&state.db, &query.user_id).await?.is_none() {
        return Err(AppError::not_found("User"));
    }

    let mut tx = state.db.begin().await?;
    let workspace = create_owned_workspace(
        &mut tx,
        &query.user_id,
        body.name.trim(),
        Some(body.description.unwrap_or_default()),
        body.is_personal,
    )
    .await?;
    tx.commit().await?;

    tracing::info!("Workspace {} created by {}", workspace.id, query.user_id);

    Ok(Json(CreatedWorkspace {
        workspace_id: workspace.id,
        invite_code: workspace.invite_code,
    }))
}

/// POST /workspaces/join
///
/// Joining twice returns the existing role; an unknown invite code creates nothing.
pub async fn join_workspace(
    State(state): State<Arc<AppState>>,
    Json(body): Json<JoinWorkspaceRequest>,
) -> Result<Json<JoinedWorkspace>, AppError> {
    let workspace = db::workspaces::find_by_invite_code(&state.db, body.invite_code.trim())
        .await?
        .ok_or_else(|| AppError::Conflict("Invalid or expired invite code".into()))?;

    if db::users::find_by_id(&state.db, &body.user_id).await?.is_none() {
        return Err(AppError::not_found("User"));
    }

    let inserted = db::workspaces::add_member(
        &state.db,
        &workspace.id,
        &body.user_id,
        MemberRole::Member,
        &db::now_timestamp(),
    )
    .await?;

    let role = db::workspaces::member_role(&state.db, &workspace.id, &body.user_id)
        .await?
        .unwrap_or_else(|| MemberRole::Member.as_str().to_string());

    if inserted {
        tracing::info!("User {} joined workspace {}", body.user_id, workspace.id);
    }

    Ok(Json(JoinedWorkspace {
        workspace_id: workspace.id,
        role,
    }))
}
