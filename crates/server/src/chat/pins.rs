use crate::chat::{broadcast_room, publish};
use crate::db;
use crate::error::AppError;
use crate::models::PinState;
use crate::ws::events::ServerEvent;
use crate::AppState;

/// Set the pin projection to `is_pinned` and publish it as `message-pinned`.
///
/// This is an unconditional set, not a flip: repeating a call rewrites the same state (with the
/// latest caller and time when pinning) and publishes again. Concurrent conflicting calls on one
/// message are last-write-wins.
pub async fn toggle_pin(
    state: &AppState,
    message_id: &str,
    user_id: &str,
    is_pinned: bool,
) -> Result<PinState, AppError> {
    let pinned_by = is_pinned.then_some(user_id);
    let pinned_at = is_pinned.then(db::now_timestamp);

    let mut tx = state.db.begin().await?;

    let touched =
        db::messages::set_pin(&mut *tx, message_id, is_pinned, pinned_by, pinned_at.as_deref())
            .await?;

    let message = db::messages::find_by_id(&mut *tx, message_id)
        .await?
        .ok_or_else(|| AppError::not_found("Message"))?;
    if touched == 0 {
        return Err(AppError::not_found("User"));
    }

    let room = broadcast_room(state, &mut *tx, &message.channel_id).await?;
    tx.commit().await?;

    let pin = message.pin_state();
    tracing::debug!("Message {} pinned={} by {}", message_id, pin.is_pinned, user_id);

    publish(state, room.as_deref(), ServerEvent::MessagePinned(pin.clone())).await;

    Ok(pin)
}
