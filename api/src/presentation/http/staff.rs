use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::application::use_cases::auth::register::{Register, RegisterRequest};
use crate::application::use_cases::staff::confirm_hours::ConfirmStudentHours;
use crate::application::use_cases::staff::log_hours::LogHours;
use crate::application::use_cases::staff::pending_confirmations::PendingConfirmations;
use crate::bootstrap::app_context::AppContext;
use crate::domain::users::UserType;
use crate::presentation::http::auth::{self, Bearer, UserResponse};
use crate::presentation::http::error::{ApiError, ErrorBody};
use crate::presentation::http::extract::JsonBody;
use crate::presentation::http::students::{StudentActionResponse, StudentResponse};

#[derive(Debug, Deserialize, ToSchema)]
pub struct LogHoursRequest {
    pub student_id: i64,
    pub hours: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ConfirmHoursRequest {
    pub student_id: i64,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateAccountRequest {
    pub username: String,
    pub name: String,
    pub password: String,
    pub user_type: UserType,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/staff/log-hours", post(log_hours))
        .route("/staff/confirm-hours", post(confirm_hours))
        .route("/staff/pending-confirmations", get(pending_confirmations))
        .route("/staff/accounts", post(create_account))
        .with_state(ctx)
}

#[utoipa::path(post, path = "/api/staff/log-hours", tag = "Staff", request_body = LogHoursRequest, responses(
    (status = 200, body = StudentActionResponse),
    (status = 400, body = ErrorBody),
    (status = 401, body = ErrorBody),
    (status = 403, body = ErrorBody),
    (status = 404, body = ErrorBody)
))]
pub async fn log_hours(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    JsonBody(req): JsonBody<LogHoursRequest>,
) -> Result<Json<StudentActionResponse>, ApiError> {
    let staff = auth::require_role(&ctx, bearer, UserType::Staff).await?;
    let users = ctx.user_repo();
    let students = ctx.student_repo();
    let uc = LogHours {
        users: users.as_ref(),
        students: students.as_ref(),
    };
    let student = uc.execute(staff.id, req.student_id, req.hours).await?;
    Ok(Json(StudentActionResponse {
        message: format!("Logged {} hours for {}", req.hours, student.name),
        student: student.into(),
    }))
}

#[utoipa::path(post, path = "/api/staff/confirm-hours", tag = "Staff", request_body = ConfirmHoursRequest, responses(
    (status = 200, body = StudentActionResponse),
    (status = 401, body = ErrorBody),
    (status = 403, body = ErrorBody),
    (status = 404, body = ErrorBody)
))]
pub async fn confirm_hours(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    JsonBody(req): JsonBody<ConfirmHoursRequest>,
) -> Result<Json<StudentActionResponse>, ApiError> {
    let staff = auth::require_role(&ctx, bearer, UserType::Staff).await?;
    let users = ctx.user_repo();
    let students = ctx.student_repo();
    let uc = ConfirmStudentHours {
        users: users.as_ref(),
        students: students.as_ref(),
    };
    let student = uc.execute(staff.id, req.student_id).await?;
    Ok(Json(StudentActionResponse {
        message: format!("Hours confirmed for {}", student.name),
        student: student.into(),
    }))
}

#[utoipa::path(get, path = "/api/staff/pending-confirmations", tag = "Staff", responses(
    (status = 200, body = [StudentResponse]),
    (status = 401, body = ErrorBody),
    (status = 403, body = ErrorBody)
))]
pub async fn pending_confirmations(
    State(ctx): State<AppContext>,
    bearer: Bearer,
) -> Result<Json<Vec<StudentResponse>>, ApiError> {
    auth::require_role(&ctx, bearer, UserType::Staff).await?;
    let repo = ctx.student_repo();
    let uc = PendingConfirmations {
        students: repo.as_ref(),
    };
    let pending = uc.execute().await?;
    Ok(Json(pending.into_iter().map(Into::into).collect()))
}

#[utoipa::path(post, path = "/api/staff/accounts", tag = "Staff", request_body = CreateAccountRequest, responses(
    (status = 201, body = UserResponse),
    (status = 400, body = ErrorBody),
    (status = 403, body = ErrorBody),
    (status = 409, body = ErrorBody)
))]
pub async fn create_account(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    JsonBody(req): JsonBody<CreateAccountRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let staff = auth::require_role(&ctx, bearer, UserType::Staff).await?;
    let repo = ctx.user_repo();
    let uc = Register {
        repo: repo.as_ref(),
    };
    let user = uc
        .execute(&RegisterRequest {
            username: req.username,
            name: req.name,
            password: req.password,
            user_type: req.user_type,
        })
        .await?;
    tracing::info!(created_by = staff.id, user_id = user.id, "account_created");
    Ok((StatusCode::CREATED, Json(user.into())))
}
