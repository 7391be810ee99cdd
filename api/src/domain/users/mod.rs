pub mod student;
pub mod user;

pub use student::{ACCOLADE_MILESTONES, HoursError, Student};
pub use user::{User, UserType, UsernameError, validate_username};
