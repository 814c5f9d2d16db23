pub mod channels;
pub mod messages;
pub mod reactions;
pub mod users;
pub mod workspaces;

use crate::ws;
use crate::AppState;
use axum::{
    routing::{get, patch, post},
    Json, Router,
};
use std::sync::Arc;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(health))
        // Users
        .route("/users/me", post(users::get_or_create_user))
        // Workspaces
        .route("/workspaces/my", get(workspaces::my_workspaces))
        .route("/workspaces/create", post(workspaces::create_workspace))
        .route("/workspaces/join", post(workspaces::join_workspace))
        .route("/workspaces/{workspaceId}", get(workspaces::get_workspace))
        // Channels
        .route("/channels", get(channels::list_channels))
        .route("/channels", post(channels::create_channel))
        // Messages
        .route("/messages", get(messages::list_messages))
        .route("/messages", post(messages::send_message))
        .route("/messages/{messageId}/pin", patch(messages::pin_message))
        .route("/reactions", post(reactions::toggle_reaction))
        // Realtime
        .route("/gateway", get(ws::handler::ws_handler))
        .with_state(state)
}

/// GET /
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "message": format!("{} API running", teamchat_shared::constants::APP_NAME),
    }))
}
