use axum::{
    Json, Router,
    extract::State,
    routing::get,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::application::dto::students::LeaderboardEntryDto;
use crate::application::use_cases::students::leaderboard::GetLeaderboard;
use crate::bootstrap::app_context::AppContext;
use crate::presentation::http::auth::{self, Bearer};
use crate::presentation::http::error::{ApiError, ErrorBody};
use crate::presentation::http::extract::QueryParams;

#[derive(Debug, Serialize, ToSchema)]
pub struct LeaderboardEntry {
    pub rank: usize,
    pub id: i64,
    pub username: String,
    pub name: String,
    pub total_hours: i32,
}

impl From<LeaderboardEntryDto> for LeaderboardEntry {
    fn from(d: LeaderboardEntryDto) -> Self {
        LeaderboardEntry {
            rank: d.rank,
            id: d.id,
            username: d.username,
            name: d.name,
            total_hours: d.total_hours,
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LeaderboardQuery {
    /// Maximum number of rows, capped by the server limit
    pub limit: Option<i64>,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/leaderboard", get(get_leaderboard))
        .with_state(ctx)
}

#[utoipa::path(get, path = "/api/leaderboard", tag = "Leaderboard",
    params(LeaderboardQuery),
    responses(
        (status = 200, body = [LeaderboardEntry]),
        (status = 400, body = ErrorBody),
        (status = 401, body = ErrorBody)
    ))]
pub async fn get_leaderboard(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    QueryParams(q): QueryParams<LeaderboardQuery>,
) -> Result<Json<Vec<LeaderboardEntry>>, ApiError> {
    auth::current_user(&ctx, bearer).await?;
    let limit = match q.limit {
        Some(n) if n < 1 => return Err(ApiError::BadRequest("limit must be positive".into())),
        Some(n) => n.min(ctx.cfg.leaderboard_limit),
        None => ctx.cfg.leaderboard_limit,
    };
    let repo = ctx.student_repo();
    let uc = GetLeaderboard {
        students: repo.as_ref(),
    };
    let entries = uc.execute(limit).await?;
    Ok(Json(entries.into_iter().map(Into::into).collect()))
}
