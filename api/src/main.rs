use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::MatchedPath;
use dotenvy::dotenv;
use http::HeaderValue;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use hours_api::bootstrap::app_context::{AppContext, AppServices};
use hours_api::bootstrap::config::{Config, StoreBackend};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
        paths(
            hours_api::presentation::http::auth::signup,
            hours_api::presentation::http::auth::login,
            hours_api::presentation::http::auth::logout,
            hours_api::presentation::http::auth::me,
            hours_api::presentation::http::students::get_me,
            hours_api::presentation::http::students::request_confirmation,
            hours_api::presentation::http::students::get_accolades,
            hours_api::presentation::http::leaderboard::get_leaderboard,
            hours_api::presentation::http::staff::log_hours,
            hours_api::presentation::http::staff::confirm_hours,
            hours_api::presentation::http::staff::pending_confirmations,
            hours_api::presentation::http::staff::create_account,
            hours_api::presentation::http::users::list_users,
            hours_api::presentation::http::users::update_user,
            hours_api::presentation::http::health::health,
        ),
        components(schemas(
            hours_api::domain::users::UserType,
            hours_api::presentation::http::error::ErrorBody,
            hours_api::presentation::http::auth::SignupRequest,
            hours_api::presentation::http::auth::LoginRequest,
            hours_api::presentation::http::auth::LoginResponse,
            hours_api::presentation::http::auth::UserResponse,
            hours_api::presentation::http::students::StudentResponse,
            hours_api::presentation::http::students::StudentActionResponse,
            hours_api::presentation::http::students::AccoladesResponse,
            hours_api::presentation::http::leaderboard::LeaderboardEntry,
            hours_api::presentation::http::staff::LogHoursRequest,
            hours_api::presentation::http::staff::ConfirmHoursRequest,
            hours_api::presentation::http::staff::CreateAccountRequest,
            hours_api::presentation::http::users::UpdateUserRequest,
            hours_api::presentation::http::health::HealthResp,
        )),
        tags(
            (name = "Auth", description = "Authentication"),
            (name = "Students", description = "Student profile, confirmation requests and accolades"),
            (name = "Leaderboard", description = "Students ranked by hours"),
            (name = "Staff", description = "Hour logging and confirmation"),
            (name = "Users", description = "User administration"),
            (name = "Health", description = "System health checks")
        )
    )]
struct ApiDoc;

fn build_cors(cfg: &Config) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([
            http::Method::GET,
            http::Method::POST,
            http::Method::PUT,
            http::Method::OPTIONS,
        ])
        .allow_headers([http::header::CONTENT_TYPE, http::header::AUTHORIZATION]);
    match cfg.frontend_url.as_deref().map(HeaderValue::from_str) {
        Some(Ok(v)) => base.allow_origin(v).allow_credentials(true),
        Some(Err(_)) => base
            .allow_origin(AllowOrigin::mirror_request())
            .allow_credentials(true),
        // In production, FRONTEND_URL is mandatory (enforced by Config), so this only denies
        None if cfg.is_production => base.allow_origin(AllowOrigin::exact(
            HeaderValue::from_static("http://invalid"),
        )),
        // Development convenience
        None => base
            .allow_origin(AllowOrigin::mirror_request())
            .allow_credentials(true),
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = ?e, "failed to listen for shutdown signal");
    }
    info!("shutdown_requested");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "hours_api=debug,axum=info,tower_http=info".into()),
        )
        .init();

    let cfg = Config::from_env()?;
    info!(?cfg, "Starting service hours backend");

    let (services, pool) = match cfg.store_backend {
        StoreBackend::Postgres => {
            let pool = hours_api::infrastructure::db::connect_pool(
                &cfg.database_url,
                cfg.db_max_connections,
            )
            .await?;
            hours_api::infrastructure::db::migrate(&pool).await?;
            let user_repo = Arc::new(
                hours_api::infrastructure::db::repositories::user_repository_sqlx::SqlxUserRepository::new(
                    pool.clone(),
                ),
            );
            let student_repo = Arc::new(
                hours_api::infrastructure::db::repositories::student_repository_sqlx::SqlxStudentRepository::new(
                    pool.clone(),
                ),
            );
            (AppServices::new(user_repo, student_repo), Some(pool))
        }
        StoreBackend::Memory => {
            tracing::warn!("store_backend_memory_data_is_not_persisted");
            (AppServices::in_memory(), None)
        }
    };

    let ctx = AppContext::new(cfg.clone(), services);
    hours_api::bootstrap::seed::ensure_bootstrap_staff(&ctx).await?;

    let app = hours_api::presentation::http::router(ctx, pool)
        .merge(SwaggerUi::new("/api/docs").url("/api/openapi.json", ApiDoc::openapi()))
        .layer(build_cors(&cfg))
        .layer(
            TraceLayer::new_for_http().make_span_with(|req: &http::Request<_>| {
                let method = req.method().clone();
                let uri = req.uri().clone();
                let matched = req
                    .extensions()
                    .get::<MatchedPath>()
                    .map(|p| p.as_str().to_string())
                    .unwrap_or_default();
                tracing::info_span!("http", %method, %uri, matched_path = %matched)
            }),
        );

    let api_addr = SocketAddr::from(([0, 0, 0, 0], cfg.api_port));
    info!(%api_addr, "HTTP API listening");
    let listener = tokio::net::TcpListener::bind(api_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
