//! Mutation core: every accepted write runs in one store transaction, commits, and only then
//! publishes its outward payload. Publishing is best-effort and never fails the caller.
//!
//! Transactions issue their first write before any read. A deferred SQLite transaction that
//! reads first cannot upgrade to a writer once another connection has committed.

mod messages;
mod pins;
mod reactions;
pub mod summary;

pub use messages::{list_messages, send_message};
pub use pins::toggle_pin;
pub use reactions::{toggle_reaction, ReactionOutcome, ToggledReaction};
pub use summary::summarize_reactions;

use sqlx::SqliteConnection;

use crate::config::BroadcastScope;
use crate::db;
use crate::ws::events::ServerEvent;
use crate::AppState;

/// Room a mutation on `channel_id` is published to, or `None` for every client.
async fn broadcast_room(
    state: &AppState,
    conn: &mut SqliteConnection,
    channel_id: &str,
) -> Result<Option<String>, sqlx::Error> {
    if state.config.broadcast_scope != BroadcastScope::Workspace {
        return Ok(None);
    }
    Ok(db::channels::find_by_id(conn, channel_id)
        .await?
        .and_then(|channel| channel.workspace_id))
}

async fn publish(state: &AppState, room: Option<&str>, event: ServerEvent) -> usize {
    let delivered = match room {
        Some(room) => state.gateway.broadcast_room(room, &event, None).await,
        None => state.gateway.broadcast_all(&event, None).await,
    };
    tracing::debug!("Published {} to {} subscriber(s)", event.name(), delivered);
    delivered
}
