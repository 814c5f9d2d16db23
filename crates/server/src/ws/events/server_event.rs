use serde::Serialize;

use crate::models::{MessageView, PinState, ReactionUpdate};
use crate::ws::gateway::ClientId;

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", content = "data")]
pub enum ServerEvent {
    #[serde(rename = "connected")]
    Connected {
        #[serde(rename = "clientId")]
        client_id: ClientId,
    },
    #[serde(rename = "new-message")]
    NewMessage(MessageView),
    #[serde(rename = "message-pinned")]
    MessagePinned(PinState),
    #[serde(rename = "reaction-added")]
    ReactionAdded(ReactionUpdate),
    #[serde(rename = "user_typing")]
    UserTyping(serde_json::Value),
    #[serde(rename = "error")]
    Error { message: String },
}

impl ServerEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Connected { .. } => "connected",
            Self::NewMessage(_) => "new-message",
            Self::MessagePinned(_) => "message-pinned",
            Self::ReactionAdded(_) => "reaction-added",
            Self::UserTyping(_) => "user_typing",
            Self::Error { .. } => "error",
        }
    }
}
