pub mod add_hours;
pub mod get_accolades;
pub mod get_profile;
pub mod leaderboard;
pub mod request_confirmation;
