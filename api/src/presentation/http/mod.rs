pub mod auth;
pub mod error;
pub mod extract;
pub mod health;
pub mod leaderboard;
pub mod staff;
pub mod students;
pub mod users;

use axum::Router;

use crate::bootstrap::app_context::AppContext;
use crate::infrastructure::db::PgPool;

/// Every `/api` route. Cross-cutting layers (CORS, tracing, docs) are added by the binary.
pub fn router(ctx: AppContext, pool: Option<PgPool>) -> Router {
    Router::new()
        .nest("/api", health::routes(pool))
        .nest("/api", auth::routes(ctx.clone()))
        .nest("/api", students::routes(ctx.clone()))
        .nest("/api", leaderboard::routes(ctx.clone()))
        .nest("/api", staff::routes(ctx.clone()))
        .nest("/api", users::routes(ctx))
}
