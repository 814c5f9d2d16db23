use crate::constants::*;

pub fn validate_workspace_name(name: &str) -> Result<(), String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err("Workspace name is required".into());
    }
    if trimmed.chars().count() > MAX_WORKSPACE_NAME_LENGTH {
        return Err(format!(
            "Workspace name must be at most {} characters",
            MAX_WORKSPACE_NAME_LENGTH
        ));
    }
    Ok(())
}

pub fn validate_channel_name(name: &str) -> Result<(), String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err("Channel name is required".into());
    }
    if trimmed.chars().count() > MAX_CHANNEL_NAME_LENGTH {
        return Err(format!(
            "Channel name must be at most {} characters",
            MAX_CHANNEL_NAME_LENGTH
        ));
    }
    if trimmed.chars().any(|c| c.is_control()) {
        return Err("Channel name cannot contain control characters".into());
    }
    Ok(())
}

pub fn validate_message_content(content: &str) -> Result<(), String> {
    if content.trim().is_empty() {
        return Err("Message content is required".into());
    }
    if content.len() > MAX_MESSAGE_LENGTH {
        return Err(format!(
            "Message must be at most {} bytes",
            MAX_MESSAGE_LENGTH
        ));
    }
    Ok(())
}

/// Emoji are compared byte-for-byte, so only shape is checked here.
pub fn validate_emoji(emoji: &str) -> Result<(), String> {
    if emoji.is_empty() {
        return Err("Emoji is required".into());
    }
    if emoji.len() > MAX_EMOJI_LENGTH {
        return Err("Emoji too long".into());
    }
    if emoji.chars().any(char::is_whitespace) {
        return Err("Emoji cannot contain whitespace".into());
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), String> {
    let mut parts = email.trim().split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err("A valid email address is required".into()),
    }
}
