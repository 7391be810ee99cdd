use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_.\-]{3,32}$").expect("valid username regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    Student,
    Staff,
}

impl UserType {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::Student => "student",
            UserType::Staff => "staff",
        }
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "student" => Ok(UserType::Student),
            "staff" => Ok(UserType::Staff),
            other => anyhow::bail!("unknown user_type: {other}"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub name: String,
    pub user_type: UserType,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl User {
    pub fn is_staff(&self) -> bool {
        self.user_type == UserType::Staff
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum UsernameError {
    #[error("Username must be 3-32 characters of letters, digits, '.', '_' or '-'")]
    Invalid,
}

pub fn validate_username(username: &str) -> Result<(), UsernameError> {
    if USERNAME_RE.is_match(username) {
        Ok(())
    } else {
        Err(UsernameError::Invalid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_type_round_trips_through_str() {
        assert_eq!("student".parse::<UserType>().unwrap(), UserType::Student);
        assert_eq!("staff".parse::<UserType>().unwrap(), UserType::Staff);
        assert_eq!(UserType::Staff.to_string(), "staff");
        assert!("admin".parse::<UserType>().is_err());
    }

    #[test]
    fn user_type_serializes_lowercase() {
        let json = serde_json::to_string(&UserType::Student).unwrap();
        assert_eq!(json, "\"student\"");
    }

    #[test]
    fn username_rules() {
        assert!(validate_username("apitest_student").is_ok());
        assert!(validate_username("mr.smith-2").is_ok());
        assert_eq!(validate_username("ab"), Err(UsernameError::Invalid));
        assert_eq!(validate_username("has space"), Err(UsernameError::Invalid));
        assert_eq!(validate_username(&"x".repeat(33)), Err(UsernameError::Invalid));
    }
}
