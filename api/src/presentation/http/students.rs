use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::application::dto::students::StudentProfileDto;
use crate::application::use_cases::students::get_accolades::GetAccolades;
use crate::application::use_cases::students::get_profile::GetStudentProfile;
use crate::application::use_cases::students::request_confirmation::RequestConfirmation;
use crate::bootstrap::app_context::AppContext;
use crate::domain::users::{ACCOLADE_MILESTONES, Student, UserType};
use crate::presentation::http::auth::{self, Bearer};
use crate::presentation::http::error::{ApiError, ErrorBody};

#[derive(Debug, Serialize, ToSchema)]
pub struct StudentResponse {
    pub id: i64,
    pub username: String,
    pub name: String,
    pub user_type: UserType,
    pub total_hours: i32,
    pub confirmation_requested: bool,
    pub accolades: Vec<i32>,
    pub next_milestone: Option<i32>,
}

impl From<StudentProfileDto> for StudentResponse {
    fn from(d: StudentProfileDto) -> Self {
        StudentResponse {
            id: d.student.id,
            username: d.student.username,
            name: d.student.name,
            user_type: UserType::Student,
            total_hours: d.student.total_hours,
            confirmation_requested: d.student.confirmation_requested,
            accolades: d.accolades,
            next_milestone: d.next_milestone,
        }
    }
}

impl From<Student> for StudentResponse {
    fn from(s: Student) -> Self {
        StudentProfileDto::from(s).into()
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StudentActionResponse {
    pub message: String,
    pub student: StudentResponse,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AccoladesResponse {
    pub total_hours: i32,
    pub accolades: Vec<i32>,
    /// Every milestone that can be earned
    pub milestones: Vec<i32>,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/students/me", get(get_me))
        .route(
            "/students/me/request-confirmation",
            post(request_confirmation),
        )
        .route("/students/me/accolades", get(get_accolades))
        .with_state(ctx)
}

#[utoipa::path(get, path = "/api/students/me", tag = "Students", responses(
    (status = 200, body = StudentResponse),
    (status = 401, body = ErrorBody),
    (status = 403, body = ErrorBody)
))]
pub async fn get_me(
    State(ctx): State<AppContext>,
    bearer: Bearer,
) -> Result<Json<StudentResponse>, ApiError> {
    let user = auth::require_role(&ctx, bearer, UserType::Student).await?;
    let repo = ctx.student_repo();
    let uc = GetStudentProfile {
        students: repo.as_ref(),
    };
    let profile = uc
        .execute(user.id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Student not found".into()))?;
    Ok(Json(profile.into()))
}

#[utoipa::path(post, path = "/api/students/me/request-confirmation", tag = "Students", responses(
    (status = 200, body = StudentActionResponse),
    (status = 401, body = ErrorBody),
    (status = 403, body = ErrorBody)
))]
pub async fn request_confirmation(
    State(ctx): State<AppContext>,
    bearer: Bearer,
) -> Result<Json<StudentActionResponse>, ApiError> {
    let user = auth::require_role(&ctx, bearer, UserType::Student).await?;
    let repo = ctx.student_repo();
    let uc = RequestConfirmation {
        students: repo.as_ref(),
    };
    let student = uc.execute(user.id).await?;
    Ok(Json(StudentActionResponse {
        message: "Confirmation request sent".into(),
        student: student.into(),
    }))
}

#[utoipa::path(get, path = "/api/students/me/accolades", tag = "Students", responses(
    (status = 200, body = AccoladesResponse),
    (status = 401, body = ErrorBody),
    (status = 403, body = ErrorBody)
))]
pub async fn get_accolades(
    State(ctx): State<AppContext>,
    bearer: Bearer,
) -> Result<Json<AccoladesResponse>, ApiError> {
    let user = auth::require_role(&ctx, bearer, UserType::Student).await?;
    let repo = ctx.student_repo();
    let uc = GetAccolades {
        students: repo.as_ref(),
    };
    let dto = uc
        .execute(user.id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Student not found".into()))?;
    Ok(Json(AccoladesResponse {
        total_hours: dto.total_hours,
        accolades: dto.accolades,
        milestones: ACCOLADE_MILESTONES.to_vec(),
    }))
}
