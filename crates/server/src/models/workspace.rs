use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Workspace {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub owner_id: String,
    pub is_personal: bool,
    pub invite_code: String,
    pub created_at: String,
}

/// A workspace as seen from one user's membership list.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceSummary {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub role: String,
    pub is_personal: bool,
    pub invite_code: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberRole {
    Owner,
    Admin,
    #[default]
    Member,
}

impl MemberRole {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::Admin => "admin",
            Self::Member => "member",
        }
    }
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Channel {
    pub id: String,
    pub workspace_id: Option<String>,
    pub name: String,
    pub description: String,
    pub is_private: bool,
    pub created_at: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWorkspaceRequest {
    pub name: String,
    pub description: Option<String>,
    #[serde(default, alias = "is_personal")]
    pub is_personal: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedWorkspace {
    pub workspace_id: String,
    pub invite_code: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinWorkspaceRequest {
    #[serde(alias = "invite_code")]
    pub invite_code: String,
    #[serde(alias = "user_id")]
    pub user_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinedWorkspace {
    pub workspace_id: String,
    pub role: String,
}

#[derive(Debug, Deserialize)]
pub struct UserIdQuery {
    #[serde(alias = "userId")]
    pub user_id: String,
}

#[derive(Debug, Deserialize)]
pub struct WorkspaceIdQuery {
    #[serde(alias = "workspaceId")]
    pub workspace_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateChannelRequest {
    #[serde(default, alias = "workspace_id")]
    pub workspace_id: Option<String>,
    pub name: String,
    pub description: Option<String>,
    #[serde(default, alias = "is_private")]
    pub is_private: bool,
}
