pub mod list_users;
pub mod update_username;
