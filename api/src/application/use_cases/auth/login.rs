use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordVerifier},
};

use crate::application::ports::user_repository::{UserRepository, UserRow};

pub struct Login<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

#[derive(Debug, Clone)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl<'a, R: UserRepository + ?Sized> Login<'a, R> {
    /// `None` covers both an unknown username and a wrong password.
    pub async fn execute(&self, req: &LoginRequest) -> anyhow::Result<Option<UserRow>> {
        let row = match self.repo.find_by_username(&req.username).await? {
            Some(r) => r,
            None => return Ok(None),
        };
        let hash = row.password_hash.clone().unwrap_or_default();
        let parsed = PasswordHash::new(&hash).map_err(|e| anyhow::anyhow!(e.to_string()))?;
        if Argon2::default()
            .verify_password(req.password.as_bytes(), &parsed)
            .is_ok()
        {
            Ok(Some(UserRow {
                password_hash: None,
                ..row
            }))
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::auth::register::{Register, RegisterRequest};
    use crate::domain::users::UserType;
    use crate::infrastructure::memory::InMemoryStore;

    async fn store_with_bob() -> InMemoryStore {
        let store = InMemoryStore::new();
        Register { repo: &store }
            .execute(&RegisterRequest {
                username: "bob".into(),
                name: "Bob User".into(),
                password: "bobpass".into(),
                user_type: UserType::Student,
            })
            .await
            .unwrap();
        store
    }

    #[tokio::test]
    async fn accepts_matching_credentials() {
        let store = store_with_bob().await;
        let user = Login { repo: &store }
            .execute(&LoginRequest {
                username: "bob".into(),
                password: "bobpass".into(),
            })
            .await
            .unwrap()
            .expect("login succeeds");
        assert_eq!(user.username, "bob");
        assert!(user.password_hash.is_none());
    }

    #[tokio::test]
    async fn rejects_wrong_password_and_unknown_user() {
        let store = store_with_bob().await;
        let uc = Login { repo: &store };
        let wrong = uc
            .execute(&LoginRequest {
                username: "bob".into(),
                password: "nope".into(),
            })
            .await
            .unwrap();
        assert!(wrong.is_none());
        let unknown = uc
            .execute(&LoginRequest {
                username: "invalid".into(),
                password: "wrong".into(),
            })
            .await
            .unwrap();
        assert!(unknown.is_none());
    }
}
