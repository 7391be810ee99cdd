use crate::application::ports::user_repository::UserRow;
use crate::application::use_cases::auth::login::{Login as LoginUc, LoginRequest as LoginDto};
use crate::application::use_cases::auth::me::GetMe;
use crate::application::use_cases::auth::register::{
    Register as RegisterUc, RegisterRequest as RegisterDto,
};
use crate::bootstrap::app_context::AppContext;
use crate::bootstrap::config::Config;
use crate::domain::users::{User, UserType};
use crate::presentation::http::error::{ApiError, ErrorBody};
use crate::presentation::http::extract::JsonBody;
use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::{get, post},
};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct SignupRequest {
    pub username: String,
    pub name: String,
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub name: String,
    pub user_type: UserType,
}

impl From<UserRow> for UserResponse {
    fn from(row: UserRow) -> Self {
        UserResponse {
            id: row.id,
            username: row.username,
            name: row.name,
            user_type: row.user_type,
        }
    }
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        UserResponse {
            id: u.id,
            username: u.username,
            name: u.name,
            user_type: u.user_type,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: &'static str,
    pub user: UserResponse,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/me", get(me))
        .with_state(ctx)
}

#[utoipa::path(post, path = "/api/signup", tag = "Auth", request_body = SignupRequest, security(()), responses(
    (status = 201, body = UserResponse),
    (status = 400, body = ErrorBody),
    (status = 409, body = ErrorBody)
))]
pub async fn signup(
    State(ctx): State<AppContext>,
    JsonBody(req): JsonBody<SignupRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let repo = ctx.user_repo();
    let uc = RegisterUc {
        repo: repo.as_ref(),
    };
    let dto = RegisterDto {
        username: req.username,
        name: req.name,
        password: req.password,
        user_type: UserType::Student,
    };
    let user = uc.execute(&dto).await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

#[utoipa::path(post, path = "/api/login", tag = "Auth", request_body = LoginRequest, security(()), responses(
    (status = 200, body = LoginResponse),
    (status = 401, body = ErrorBody)
))]
pub async fn login(
    State(ctx): State<AppContext>,
    JsonBody(req): JsonBody<LoginRequest>,
) -> Result<(HeaderMap, Json<LoginResponse>), ApiError> {
    let repo = ctx.user_repo();
    let uc = LoginUc {
        repo: repo.as_ref(),
    };
    let dto = LoginDto {
        username: req.username,
        password: req.password,
    };
    let user = uc
        .execute(&dto)
        .await?
        .ok_or(ApiError::Unauthorized("Bad username or password"))?;
    let token = issue_token(&ctx.cfg, user.id)?;

    // Set HttpOnly cookie with the access token
    let mut headers = HeaderMap::new();
    let cookie = build_access_cookie(&token, ctx.cfg.jwt_expires_secs, secure_cookies(&ctx.cfg));
    if let Ok(v) = axum::http::HeaderValue::from_str(&cookie) {
        headers.insert(axum::http::header::SET_COOKIE, v);
    }
    tracing::info!(user_id = user.id, "login_succeeded");

    Ok((
        headers,
        Json(LoginResponse {
            access_token: token,
            token_type: "Bearer",
            user: user.into(),
        }),
    ))
}

#[utoipa::path(get, path = "/api/me", tag = "Auth", responses(
    (status = 200, body = UserResponse),
    (status = 401, body = ErrorBody)
))]
pub async fn me(
    State(ctx): State<AppContext>,
    bearer: Bearer,
) -> Result<Json<UserResponse>, ApiError> {
    let user = current_user(&ctx, bearer).await?;
    Ok(Json(user.into()))
}

#[utoipa::path(post, path = "/api/logout", tag = "Auth", security(()), responses((status = 204)))]
pub async fn logout(State(ctx): State<AppContext>) -> (HeaderMap, StatusCode) {
    // Clear cookie by setting it expired
    let mut headers = HeaderMap::new();
    let cookie = if secure_cookies(&ctx.cfg) {
        "access_token=; HttpOnly; Secure; Path=/; Max-Age=0; SameSite=Lax"
    } else {
        "access_token=; HttpOnly; Path=/; Max-Age=0; SameSite=Lax"
    };
    headers.insert(
        axum::http::header::SET_COOKIE,
        axum::http::HeaderValue::from_static(cookie),
    );
    (headers, StatusCode::NO_CONTENT)
}

// --- Bearer extractor & JWT utils ---
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

pub struct Bearer(pub String);

#[axum::async_trait]
impl<S> FromRequestParts<S> for Bearer
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // 1) Prefer Authorization header if present
        if let Some(auth) = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
        {
            if let Some(t) = auth.strip_prefix("Bearer ") {
                return Ok(Bearer(t.trim().to_string()));
            }
        }

        // 2) Fallback to HttpOnly cookie `access_token`
        if let Some(cookie_hdr) = parts
            .headers
            .get(axum::http::header::COOKIE)
            .and_then(|v| v.to_str().ok())
        {
            if let Some(token) = get_cookie(cookie_hdr, "access_token") {
                return Ok(Bearer(token));
            }
        }

        Err(ApiError::Unauthorized("Missing authorization token"))
    }
}

pub fn issue_token(cfg: &Config, user_id: i64) -> Result<String, ApiError> {
    let now = chrono::Utc::now().timestamp().max(0) as usize;
    let claims = Claims {
        sub: user_id.to_string(),
        exp: now + (cfg.jwt_expires_secs.max(0) as usize),
    };
    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(cfg.jwt_secret_pem.as_bytes()),
    )
    .map_err(|e| ApiError::Internal(e.into()))
}

pub fn validate_bearer(cfg: &Config, bearer: Bearer) -> Result<i64, ApiError> {
    let data = jsonwebtoken::decode::<Claims>(
        &bearer.0,
        &DecodingKey::from_secret(cfg.jwt_secret_pem.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| ApiError::Unauthorized("Invalid or expired token"))?;
    data.claims
        .sub
        .parse()
        .map_err(|_| ApiError::Unauthorized("Invalid or expired token"))
}

/// Resolves the token to a live user. Tokens whose user no longer exists are rejected.
pub async fn current_user(ctx: &AppContext, bearer: Bearer) -> Result<UserRow, ApiError> {
    let id = validate_bearer(&ctx.cfg, bearer)?;
    let repo = ctx.user_repo();
    let uc = GetMe {
        repo: repo.as_ref(),
    };
    uc.execute(id)
        .await?
        .ok_or(ApiError::Unauthorized("Invalid or expired token"))
}

pub async fn require_role(
    ctx: &AppContext,
    bearer: Bearer,
    role: UserType,
) -> Result<UserRow, ApiError> {
    let user = current_user(ctx, bearer).await?;
    if user.user_type != role {
        return Err(ApiError::Forbidden(match role {
            UserType::Student => "Student access required",
            UserType::Staff => "Staff access required",
        }));
    }
    Ok(user)
}

// --- Cookie helpers ---

fn secure_cookies(cfg: &Config) -> bool {
    cfg.frontend_url
        .as_deref()
        .is_some_and(|u| u.starts_with("https://"))
}

fn get_cookie(cookie_header: &str, name: &str) -> Option<String> {
    for part in cookie_header.split(';') {
        let kv = part.trim();
        if let Some((k, v)) = kv.split_once('=') {
            if k.trim() == name && !v.trim().is_empty() {
                return Some(v.trim().to_string());
            }
        }
    }
    None
}

fn build_access_cookie(token: &str, max_age_secs: i64, secure: bool) -> String {
    let secure_attr = if secure { "; Secure" } else { "" };
    format!(
        "access_token={}; HttpOnly{}; Path=/; Max-Age={}; SameSite=Lax",
        token,
        secure_attr,
        max_age_secs.max(0)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> Config {
        Config::from_lookup(|k| match k {
            "JWT_SECRET" => Some("unit-test-secret".into()),
            _ => None,
        })
        .unwrap()
    }

    #[test]
    fn issued_tokens_validate() {
        let cfg = cfg();
        let token = issue_token(&cfg, 42).unwrap();
        assert_eq!(validate_bearer(&cfg, Bearer(token)).unwrap(), 42);
    }

    #[test]
    fn rejects_foreign_and_garbage_tokens() {
        let cfg = cfg();
        let mut other = cfg.clone();
        other.jwt_secret_pem = "some-other-secret".into();
        let token = issue_token(&other, 7).unwrap();
        assert!(matches!(
            validate_bearer(&cfg, Bearer(token)),
            Err(ApiError::Unauthorized(_))
        ));
        assert!(validate_bearer(&cfg, Bearer("not-a-jwt".into())).is_err());
    }

    #[test]
    fn reads_access_token_cookie() {
        assert_eq!(
            get_cookie("theme=dark; access_token=abc.def", "access_token").as_deref(),
            Some("abc.def")
        );
        assert_eq!(get_cookie("access_token=", "access_token"), None);
        assert!(build_access_cookie("t", 60, true).contains("; Secure"));
    }
}
