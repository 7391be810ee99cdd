pub mod auth;
pub mod staff;
pub mod students;
pub mod users;

#[cfg(test)]
pub(crate) mod test_support {
    use crate::application::ports::user_repository::{NewUser, UserRepository};
    use crate::domain::users::UserType;
    use crate::infrastructure::memory::InMemoryStore;

    /// Inserts a user directly, skipping password hashing.
    pub async fn seed_user(store: &InMemoryStore, username: &str, user_type: UserType) -> i64 {
        store
            .create_user(&NewUser {
                username: username.into(),
                name: username.replace('_', " "),
                password_hash: "unused".into(),
                user_type,
            })
            .await
            .unwrap()
            .id
    }
}
