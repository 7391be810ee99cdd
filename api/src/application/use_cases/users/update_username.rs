use crate::application::ports::user_repository::{UserRepository, UsernameConflict};
use crate::domain::users::{User, UsernameError, validate_username};

#[derive(thiserror::Error, Debug)]
pub enum UpdateUsernameError {
    #[error(transparent)]
    InvalidUsername(#[from] UsernameError),
    #[error("Username already taken")]
    UsernameTaken,
    #[error("failed to update user")]
    Repository(#[source] anyhow::Error),
}

pub struct UpdateUsername<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: UserRepository + ?Sized> UpdateUsername<'a, R> {
    /// `Ok(None)` when no user has this id.
    pub async fn execute(
        &self,
        id: i64,
        username: &str,
    ) -> Result<Option<User>, UpdateUsernameError> {
        let username = username.trim();
        validate_username(username)?;
        if let Some(existing) = self
            .repo
            .find_by_username(username)
            .await
            .map_err(UpdateUsernameError::Repository)?
        {
            if existing.id != id {
                return Err(UpdateUsernameError::UsernameTaken);
            }
        }
        let row = self
            .repo
            .update_username(id, username)
            .await
            .map_err(|e| {
                if e.is::<UsernameConflict>() {
                    UpdateUsernameError::UsernameTaken
                } else {
                    UpdateUsernameError::Repository(e)
                }
            })?;
        Ok(row.map(User::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::user_repository::{NewUser, UserRepository};
    use crate::domain::users::UserType;
    use crate::infrastructure::memory::InMemoryStore;

    async fn seed(store: &InMemoryStore, username: &str) -> i64 {
        store
            .create_user(&NewUser {
                username: username.into(),
                name: "Bob User".into(),
                password_hash: "x".into(),
                user_type: UserType::Student,
            })
            .await
            .unwrap()
            .id
    }

    #[tokio::test]
    async fn renames_existing_user() {
        let store = InMemoryStore::new();
        let id = seed(&store, "bob").await;
        let user = UpdateUsername { repo: &store }
            .execute(id, "ronnie")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(user.username, "ronnie");
        assert_eq!(
            store.find_by_id(id).await.unwrap().unwrap().username,
            "ronnie"
        );
    }

    #[tokio::test]
    async fn unknown_id_and_taken_name() {
        let store = InMemoryStore::new();
        let bob = seed(&store, "bob").await;
        seed(&store, "rick").await;
        let uc = UpdateUsername { repo: &store };
        assert!(uc.execute(999, "nobody").await.unwrap().is_none());
        assert!(matches!(
            uc.execute(bob, "rick").await,
            Err(UpdateUsernameError::UsernameTaken)
        ));
        // keeping your own name is not a conflict
        assert!(uc.execute(bob, "bob").await.unwrap().is_some());
    }
}
