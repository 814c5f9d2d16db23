mod server_event;

pub use server_event::ServerEvent;

use serde::Deserialize;

// ── Client → Server Events ──
//
// Frames are `{"event": "<name>", "data": <payload>}`.

#[derive(Debug, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ClientEvent {
    /// Subscribe to a room, usually a workspace id.
    JoinWorkspace(String),
    LeaveWorkspace(String),
    /// Opaque typing payload, rebroadcast to everyone else as `user_typing`.
    Typing(serde_json::Value),
    Ping,
}
