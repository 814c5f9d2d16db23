use axum::{extract::State, Json};
use std::sync::Arc;

use crate::db;
use crate::error::AppError;
use crate::models::{CreateUserRequest, User, UserStatus, UserView};
use crate::routes::workspaces::create_owned_workspace;
use crate::AppState;

/// POST /users/me
///
/// Returns the user registered under `email`, creating it (plus a personal workspace it owns)
/// on first contact.
pub async fn get_or_create_user(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateUserRequest>,
) -> Result<Json<UserView>, AppError> {
    let email = body.email.trim();
    teamchat_shared::validation::validate_email(email).map_err(AppError::Validation)?;

    let name = match body.name.as_deref().map(str::trim) {
        Some(n) if !n.is_empty() => n.to_string(),
        _ => email.split('@').next().unwrap_or(email).to_string(),
    };

    let user = User {
        id: db::new_id(),
        name,
        email: email.to_string(),
        avatar: body.avatar.filter(|a| !a.is_empty()),
        status: UserStatus::default().as_str().to_string(),
        created_at: db::now_timestamp(),
    };

    let mut tx = state.db.begin().await?;

    if !db::users::insert(&mut *tx, &user).await? {
        let existing = db::users::find_by_email(&mut *tx, email)
            .await?
            .ok_or_else(|| AppError::not_found("User"))?;
        return Ok(Json(existing.into()));
    }

    create_owned_workspace(
        &mut tx,
        &user.id,
        &format!("{}'s Space", user.name),
        Some(teamchat_shared::constants::PERSONAL_WORKSPACE_DESCRIPTION.to_string()),
        true,
    )
    .await?;

    tx.commit().await?;

    tracing::info!("Created user {} ({})", user.id, user.email);
    Ok(Json(user.into()))
}
