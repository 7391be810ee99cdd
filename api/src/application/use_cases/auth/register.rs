use argon2::{
    Argon2,
    password_hash::{PasswordHasher, SaltString},
};
use password_hash::rand_core::OsRng;

use crate::application::ports::user_repository::{
    NewUser, UserRepository, UserRow, UsernameConflict,
};
use crate::domain::users::{UserType, UsernameError, validate_username};

pub const MIN_PASSWORD_LEN: usize = 4;

#[derive(thiserror::Error, Debug)]
pub enum RegisterError {
    #[error(transparent)]
    InvalidUsername(#[from] UsernameError),
    #[error("Name cannot be empty")]
    EmptyName,
    #[error("Password must be at least {} characters", MIN_PASSWORD_LEN)]
    WeakPassword,
    #[error("Username already taken")]
    UsernameTaken,
    #[error("failed to hash password: {0}")]
    Hashing(String),
    #[error("failed to store user")]
    Repository(#[source] anyhow::Error),
}

pub struct Register<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

#[derive(Debug, Clone)]
pub struct RegisterRequest {
    pub username: String,
    pub name: String,
    pub password: String,
    pub user_type: UserType,
}

impl<'a, R: UserRepository + ?Sized> Register<'a, R> {
    pub async fn execute(&self, req: &RegisterRequest) -> Result<UserRow, RegisterError> {
        let username = req.username.trim();
        validate_username(username)?;
        let name = req.name.trim();
        if name.is_empty() {
            return Err(RegisterError::EmptyName);
        }
        if req.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(RegisterError::WeakPassword);
        }
        if self
            .repo
            .find_by_username(username)
            .await
            .map_err(RegisterError::Repository)?
            .is_some()
        {
            return Err(RegisterError::UsernameTaken);
        }

        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(req.password.as_bytes(), &salt)
            .map_err(|e| RegisterError::Hashing(e.to_string()))?
            .to_string();
        let user = self
            .repo
            .create_user(&NewUser {
                username: username.to_string(),
                name: name.to_string(),
                password_hash: hash,
                user_type: req.user_type,
            })
            .await
            .map_err(|e| {
                if e.is::<UsernameConflict>() {
                    RegisterError::UsernameTaken
                } else {
                    RegisterError::Repository(e)
                }
            })?;
        tracing::info!(user_id = user.id, user_type = %user.user_type, "user_registered");
        Ok(UserRow {
            password_hash: None,
            ..user
        })
    }
}
