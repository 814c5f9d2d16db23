use std::collections::HashMap;

use crate::chat::summary::{group_by_message, summarize_reactions};
use crate::chat::{broadcast_room, publish};
use crate::db;
use crate::error::AppError;
use crate::models::{Message, MessageView, UserView};
use crate::ws::events::ServerEvent;
use crate::AppState;

/// Persist a message, then publish it as `new-message`.
///
/// Both the channel and the author must exist; nothing is written otherwise.
pub async fn send_message(
    state: &AppState,
    channel_id: &str,
    user_id: &str,
    content: &str,
) -> Result<MessageView, AppError> {
    teamchat_shared::validation::validate_message_content(content).map_err(AppError::Validation)?;

    let message = Message {
        id: db::new_id(),
        channel_id: channel_id.to_string(),
        user_id: user_id.to_string(),
        content: content.to_string(),
        created_at: db::now_timestamp(),
        is_pinned: false,
        pinned_by: None,
        pinned_at: None,
    };

    let mut tx = state.db.begin().await?;

    if !db::messages::insert_checked(&mut *tx, &message).await? {
        return Err(if db::channels::find_by_id(&mut *tx, channel_id).await?.is_none() {
            AppError::not_found("Channel")
        } else {
            AppError::not_found("User")
        });
    }

    let author = db::users::find_by_id(&mut *tx, user_id).await?;
    let room = broadcast_room(state, &mut *tx, channel_id).await?;
    tx.commit().await?;

    tracing::debug!("Message {} stored in channel {}", message.id, channel_id);

    let view = MessageView::new(message, author.map(UserView::from), Vec::new());
    publish(state, room.as_deref(), ServerEvent::NewMessage(view.clone())).await;

    Ok(view)
}

/// Every message of a channel in creation order. Unknown channels yield an empty list.
pub async fn list_messages(state: &AppState, channel_id: &str) -> Result<Vec<MessageView>, AppError> {
    let messages = db::messages::list_for_channel(&state.db, channel_id).await?;
    if messages.is_empty() {
        return Ok(Vec::new());
    }

    let mut reactions =
        group_by_message(db::reactions::list_for_channel(&state.db, channel_id).await?);

    let authors: HashMap<String, UserView> = db::users::list_channel_authors(&state.db, channel_id)
        .await?
        .into_iter()
        .map(|u| (u.id.clone(), UserView::from(u)))
        .collect();

    Ok(messages
        .into_iter()
        .map(|message| {
            let summary = reactions
                .remove(&message.id)
                .map(|rows| summarize_reactions(&rows))
                .unwrap_or_default();
            let author = authors.get(&message.user_id).cloned();
            MessageView::new(message, author, summary)
        })
        .collect())
}
