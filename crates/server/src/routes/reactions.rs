use axum::{extract::State, Json};
use std::sync::Arc;

use crate::chat;
use crate::error::AppError;
use crate::models::{ReactionUpdate, ToggleReactionRequest};
use crate::AppState;

/// POST /reactions
pub async fn toggle_reaction(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ToggleReactionRequest>,
) -> Result<Json<ReactionUpdate>, AppError> {
    let toggled =
        chat::toggle_reaction(&state, &body.message_id, &body.user_id, &body.emoji).await?;
    Ok(Json(toggled.update))
}
