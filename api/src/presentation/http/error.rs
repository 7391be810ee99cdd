use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::application::use_cases::auth::register::RegisterError;
use crate::application::use_cases::staff::confirm_hours::ConfirmHoursError;
use crate::application::use_cases::staff::log_hours::LogHoursError;
use crate::application::use_cases::students::request_confirmation::RequestConfirmationError;
use crate::application::use_cases::users::update_username::UpdateUsernameError;

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Unauthorized(&'static str),
    #[error("{0}")]
    Forbidden(&'static str),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(err) = &self {
            tracing::error!(error = ?err, "request_failed");
        }
        let body = ErrorBody {
            error: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

impl From<RegisterError> for ApiError {
    fn from(err: RegisterError) -> Self {
        match err {
            RegisterError::InvalidUsername(_)
            | RegisterError::EmptyName
            | RegisterError::WeakPassword => ApiError::BadRequest(err.to_string()),
            RegisterError::UsernameTaken => ApiError::Conflict(err.to_string()),
            RegisterError::Hashing(msg) => ApiError::Internal(anyhow::anyhow!(msg)),
            RegisterError::Repository(e) => ApiError::Internal(e),
        }
    }
}

impl From<UpdateUsernameError> for ApiError {
    fn from(err: UpdateUsernameError) -> Self {
        match err {
            UpdateUsernameError::InvalidUsername(_) => ApiError::BadRequest(err.to_string()),
            UpdateUsernameError::UsernameTaken => ApiError::Conflict(err.to_string()),
            UpdateUsernameError::Repository(e) => ApiError::Internal(e),
        }
    }
}

impl From<RequestConfirmationError> for ApiError {
    fn from(err: RequestConfirmationError) -> Self {
        match err {
            RequestConfirmationError::StudentNotFound => ApiError::NotFound(err.to_string()),
            RequestConfirmationError::Repository(e) => ApiError::Internal(e),
        }
    }
}

impl From<LogHoursError> for ApiError {
    fn from(err: LogHoursError) -> Self {
        match err {
            LogHoursError::StaffNotFound => ApiError::Forbidden("Staff access required"),
            LogHoursError::StudentNotFound => ApiError::NotFound(err.to_string()),
            LogHoursError::InvalidHours(_) => ApiError::BadRequest(err.to_string()),
            LogHoursError::Repository(e) => ApiError::Internal(e),
        }
    }
}

impl From<ConfirmHoursError> for ApiError {
    fn from(err: ConfirmHoursError) -> Self {
        match err {
            ConfirmHoursError::StaffNotFound => ApiError::Forbidden("Staff access required"),
            ConfirmHoursError::StudentNotFound => ApiError::NotFound(err.to_string()),
            ConfirmHoursError::Repository(e) => ApiError::Internal(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::users::HoursError;

    #[test]
    fn maps_use_case_errors_to_status() {
        let e: ApiError = LogHoursError::StudentNotFound.into();
        assert_eq!(e.status(), StatusCode::NOT_FOUND);
        assert_eq!(e.to_string(), "Student not found");

        let e: ApiError = LogHoursError::InvalidHours(HoursError::Negative).into();
        assert_eq!(e.status(), StatusCode::BAD_REQUEST);

        let e: ApiError = RegisterError::UsernameTaken.into();
        assert_eq!(e.status(), StatusCode::CONFLICT);

        let e: ApiError = ConfirmHoursError::StaffNotFound.into();
        assert_eq!(e.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn internal_errors_hide_details() {
        let e = ApiError::from(anyhow::anyhow!("connection refused to 10.0.0.5"));
        assert_eq!(e.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(e.to_string(), "Internal server error");
    }
}
