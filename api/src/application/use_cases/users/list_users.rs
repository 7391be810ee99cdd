use crate::application::ports::user_repository::UserRepository;
use crate::domain::users::User;

pub struct ListUsers<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: UserRepository + ?Sized> ListUsers<'a, R> {
    pub async fn execute(&self) -> anyhow::Result<Vec<User>> {
        let rows = self.repo.list_users().await?;
        Ok(rows.into_iter().map(User::from).collect())
    }
}
