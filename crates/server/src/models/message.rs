use serde::{Deserialize, Serialize};

use super::UserView;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Message {
    pub id: String,
    pub channel_id: String,
    pub user_id: String,
    pub content: String,
    pub created_at: String,
    pub is_pinned: bool,
    pub pinned_by: Option<String>,
    pub pinned_at: Option<String>,
}

impl Message {
    pub fn pin_state(&self) -> PinState {
        PinState {
            message_id: self.id.clone(),
            is_pinned: self.is_pinned,
            pinned_by: self.pinned_by.clone(),
            pinned_at: self.pinned_at.clone(),
        }
    }
}

/// One stored (message, user, emoji) assertion.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Reaction {
    pub id: i64,
    pub message_id: String,
    pub user_id: String,
    pub emoji: String,
    pub created_at: String,
}

/// All reactions with one emoji on one message. Derived, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReactionSummary {
    pub emoji: String,
    pub count: usize,
    pub users: Vec<String>,
}

/// Pin projection of a message. `pinned_by`/`pinned_at` are null while unpinned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PinState {
    pub message_id: String,
    pub is_pinned: bool,
    pub pinned_by: Option<String>,
    pub pinned_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactionUpdate {
    pub message_id: String,
    pub reactions: Vec<ReactionSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageView {
    pub id: String,
    pub channel_id: String,
    pub content: String,
    pub timestamp: String,
    pub user: Option<UserView>,
    pub reactions: Vec<ReactionSummary>,
    pub is_pinned: bool,
    pub pinned_by: Option<String>,
    pub pinned_at: Option<String>,
}

impl MessageView {
    pub fn new(message: Message, user: Option<UserView>, reactions: Vec<ReactionSummary>) -> Self {
        Self {
            id: message.id,
            channel_id: message.channel_id,
            content: message.content,
            timestamp: message.created_at,
            user,
            reactions,
            is_pinned: message.is_pinned,
            pinned_by: message.pinned_by,
            pinned_at: message.pinned_at,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    #[serde(alias = "channel_id")]
    pub channel_id: String,
    #[serde(alias = "user_id")]
    pub user_id: String,
    pub content: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PinMessageRequest {
    #[serde(alias = "is_pinned")]
    pub is_pinned: bool,
    #[serde(alias = "user_id")]
    pub user_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleReactionRequest {
    #[serde(alias = "message_id")]
    pub message_id: String,
    #[serde(alias = "user_id")]
    pub user_id: String,
    pub emoji: String,
}

#[derive(Debug, Deserialize)]
pub struct ChannelIdQuery {
    #[serde(alias = "channelId")]
    pub channel_id: String,
}
