use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;
use utoipa::ToSchema;

use crate::infrastructure::db::PgPool;

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResp {
    pub status: &'static str,
    pub store: &'static str,
}

#[utoipa::path(
    get,
    path = "/api/health",
    tag = "Health",
    security(()),
    responses((status = 200, body = HealthResp))
)]
pub async fn health(State(pool): State<Option<PgPool>>) -> Json<HealthResp> {
    let Some(pool) = pool else {
        return Json(HealthResp {
            status: "ok",
            store: "memory",
        });
    };
    let db_ok = sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(&pool)
        .await
        .is_ok();
    let status = if db_ok { "ok" } else { "degraded" };
    Json(HealthResp {
        status,
        store: "postgres",
    })
}

pub fn routes(pool: Option<PgPool>) -> Router {
    Router::new().route("/health", get(health)).with_state(pool)
}
