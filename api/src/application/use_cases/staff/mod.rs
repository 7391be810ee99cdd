pub mod confirm_hours;
pub mod log_hours;
pub mod pending_confirmations;

use crate::application::ports::user_repository::UserRepository;
use crate::domain::users::UserType;

async fn is_staff<U: UserRepository + ?Sized>(users: &U, staff_id: i64) -> anyhow::Result<bool> {
    Ok(users
        .find_by_id(staff_id)
        .await?
        .is_some_and(|u| u.user_type == UserType::Staff))
}
