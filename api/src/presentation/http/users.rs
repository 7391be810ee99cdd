use axum::{
    Json, Router,
    extract::State,
    routing::{get, put},
};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::application::use_cases::users::list_users::ListUsers;
use crate::application::use_cases::users::update_username::UpdateUsername;
use crate::bootstrap::app_context::AppContext;
use crate::domain::users::UserType;
use crate::presentation::http::auth::{self, Bearer, UserResponse};
use crate::presentation::http::error::{ApiError, ErrorBody};
use crate::presentation::http::extract::{JsonBody, PathParam};

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateUserRequest {
    pub username: String,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/users", get(list_users))
        .route("/users/:id", put(update_user))
        .with_state(ctx)
}

#[utoipa::path(get, path = "/api/users", tag = "Users", responses(
    (status = 200, body = [UserResponse]),
    (status = 401, body = ErrorBody),
    (status = 403, body = ErrorBody)
))]
pub async fn list_users(
    State(ctx): State<AppContext>,
    bearer: Bearer,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    auth::require_role(&ctx, bearer, UserType::Staff).await?;
    let repo = ctx.user_repo();
    let uc = ListUsers {
        repo: repo.as_ref(),
    };
    let users = uc.execute().await?;
    Ok(Json(users.into_iter().map(Into::into).collect()))
}

#[utoipa::path(put, path = "/api/users/{id}", tag = "Users", request_body = UpdateUserRequest,
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, body = UserResponse),
        (status = 400, body = ErrorBody),
        (status = 403, body = ErrorBody),
        (status = 404, body = ErrorBody),
        (status = 409, body = ErrorBody)
    ))]
pub async fn update_user(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    PathParam(id): PathParam<i64>,
    JsonBody(req): JsonBody<UpdateUserRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    auth::require_role(&ctx, bearer, UserType::Staff).await?;
    let repo = ctx.user_repo();
    let uc = UpdateUsername {
        repo: repo.as_ref(),
    };
    let user = uc
        .execute(id, &req.username)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".into()))?;
    Ok(Json(user.into()))
}
