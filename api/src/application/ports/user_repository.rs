use async_trait::async_trait;

use crate::domain::users::{User, UserType};

#[derive(Debug, Clone)]
pub struct UserRow {
    pub id: i64,
    pub username: String,
    pub name: String,
    pub user_type: UserType,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub password_hash: Option<String>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            username: row.username,
            name: row.name,
            user_type: row.user_type,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub name: String,
    pub password_hash: String,
    pub user_type: UserType,
}

/// Returned (inside `anyhow::Error`) when a write would duplicate a username.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("username already exists")]
pub struct UsernameConflict;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Inserts the user together with its student or staff row. Fails with
    /// `UsernameConflict` when the username is taken.
    async fn create_user(&self, new_user: &NewUser) -> anyhow::Result<UserRow>;
    async fn find_by_username(&self, username: &str) -> anyhow::Result<Option<UserRow>>;
    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<UserRow>>;
    async fn list_users(&self) -> anyhow::Result<Vec<UserRow>>;
    /// Fails with `UsernameConflict` when another user has `username`.
    async fn update_username(&self, id: i64, username: &str) -> anyhow::Result<Option<UserRow>>;
}
