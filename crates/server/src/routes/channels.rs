use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use crate::db;
use crate::error::{is_unique_violation, AppError};
use crate::models::{Channel, CreateChannelRequest, WorkspaceIdQuery};
use crate::AppState;

/// GET /channels?workspace_id=
pub async fn list_channels(
    State(state): State<Arc<AppState>>,
    Query(query): Query<WorkspaceIdQuery>,
) -> Result<Json<Vec<Channel>>, AppError> {
    let channels = db::channels::list_for_workspace(&state.db, &query.workspace_id).await?;
    Ok(Json(channels))
}

/// POST /channels
pub async fn create_channel(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateChannelRequest>,
) -> Result<Json<Channel>, AppError> {
    teamchat_shared::validation::validate_channel_name(&body.name)
        .map_err(AppError::Validation)?;
    let name = body.name.trim();
    let workspace_id = body.workspace_id.as_deref().filter(|w| !w.is_empty());

    if let Some(workspace_id) = workspace_id {
        if db::workspaces::find_by_id(&state.db, workspace_id).await?.is_none() {
            return Err(AppError::not_found("Workspace"));
        }
    }

    // Racing creates are caught by the unique index below
    if db::channels::find_by_name(&state.db, workspace_id, name).await?.is_some() {
        return Err(AppError::Conflict("Channel already exists".into()));
    }

    let channel = Channel {
        id: db::new_id(),
        workspace_id: workspace_id.map(str::to_string),
        name: name.to_string(),
        description: body.description.unwrap_or_default(),
        is_private: body.is_private,
        created_at: db::now_timestamp(),
    };

    match db::channels::insert(&state.db, &channel).await {
        Ok(()) => {}
        Err(e) if is_unique_violation(&e) => {
            return Err(AppError::Conflict("Channel already exists".into()))
        }
        Err(e) => return Err(e.into()),
    }

    tracing::info!("Channel #{} created ({})", channel.name, channel.id);
    Ok(Json(channel))
}
