use crate::chat::summary::summarize_reactions;
use crate::chat::{broadcast_room, publish};
use crate::db;
use crate::error::AppError;
use crate::models::ReactionUpdate;
use crate::ws::events::ServerEvent;
use crate::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReactionOutcome {
    Added,
    Removed,
}

#[derive(Debug, Clone)]
pub struct ToggledReaction {
    pub outcome: ReactionOutcome,
    pub update: ReactionUpdate,
}

/// Flip the (message, user, emoji) reaction and publish the message's new summary as
/// `reaction-added`.
///
/// The delete-or-insert runs inside one write transaction and the natural key carries a unique
/// index, so concurrent toggles of one key serialize and never leave a duplicate row.
pub async fn toggle_reaction(
    state: &AppState,
    message_id: &str,
    user_id: &str,
    emoji: &str,
) -> Result<ToggledReaction, AppError> {
    teamchat_shared::validation::validate_emoji(emoji).map_err(AppError::Validation)?;

    let mut tx = state.db.begin().await?;

    let outcome = if db::reactions::delete_one(&mut *tx, message_id, user_id, emoji).await? > 0 {
        ReactionOutcome::Removed
    } else {
        let now = db::now_timestamp();
        if db::reactions::insert_one(&mut *tx, message_id, user_id, emoji, &now).await? == 0 {
            if db::messages::find_by_id(&mut *tx, message_id).await?.is_none() {
                return Err(AppError::not_found("Message"));
            }
            if db::users::find_by_id(&mut *tx, user_id).await?.is_none() {
                return Err(AppError::not_found("User"));
            }
        }
        ReactionOutcome::Added
    };

    let rows = db::reactions::list_for_message(&mut *tx, message_id).await?;
    let room = match db::messages::find_by_id(&mut *tx, message_id).await? {
        Some(message) => broadcast_room(state, &mut *tx, &message.channel_id).await?,
        None => None,
    };
    tx.commit().await?;

    tracing::debug!(
        "Reaction {} by {} on {}: {:?}",
        emoji,
        user_id,
        message_id,
        outcome
    );

    let update = ReactionUpdate {
        message_id: message_id.to_string(),
        reactions: summarize_reactions(&rows),
    };
    publish(state, room.as_deref(), ServerEvent::ReactionAdded(update.clone())).await;

    Ok(ToggledReaction { outcome, update })
}
