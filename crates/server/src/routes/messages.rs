use axum::{
    extract::{Path, Query, State},
    Json,
};
use std::sync::Arc;

use crate::chat;
use crate::error::AppError;
use crate::models::{ChannelIdQuery, MessageView, PinMessageRequest, PinState, SendMessageRequest};
use crate::AppState;

/// GET /messages?channel_id=
pub async fn list_messages(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ChannelIdQuery>,
) -> Result<Json<Vec<MessageView>>, AppError> {
    Ok(Json(chat::list_messages(&state, &query.channel_id).await?))
}

/// POST /messages
pub async fn send_message(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SendMessageRequest>,
) -> Result<Json<MessageView>, AppError> {
    let view = chat::send_message(&state, &body.channel_id, &body.user_id, &body.content).await?;
    Ok(Json(view))
}

/// PATCH /messages/:messageId/pin
pub async fn pin_message(
    State(state): State<Arc<AppState>>,
    Path(message_id): Path<String>,
    Json(body): Json<PinMessageRequest>,
) -> Result<Json<PinState>, AppError> {
    let pin = chat::toggle_pin(&state, &message_id, &body.user_id, body.is_pinned).await?;
    Ok(Json(pin))
}
