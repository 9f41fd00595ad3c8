/// Login, logout and session introspection endpoints
use crate::{
    api::middleware::AUTH_COOKIE,
    auth::AuthUser,
    context::AppContext,
    error::{ApiError, ApiResult},
    metrics,
    users::UsuarioPublico,
};
use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};

/// Build auth routes
pub fn routes() -> Router<AppContext> {
    Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/logout", post(logout))
        .route("/api/auth/me", get(me))
}

/// Login request body
///
/// Fields are optional at the serde layer so a missing field is our 400,
/// not a deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Body for login and me responses
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub success: bool,
    pub user: UsuarioPublico,
}

/// Verify credentials and set the session cookie
async fn login(
    State(ctx): State<AppContext>,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> ApiResult<(CookieJar, Json<SessionResponse>)> {
    let email = req.email.as_deref().map(str::trim).unwrap_or_default();
    let password = req.password.as_deref().unwrap_or_default();

    if email.is_empty() || password.is_empty() {
        return Err(ApiError::Validation(
            "Email y contraseña son requeridos".to_string(),
        ));
    }

    ctx.login_limiter.check(email)?;

    let (usuario, token) = match ctx.users.authenticate(email, password).await {
        Ok(ok) => {
            metrics::record_login_attempt(true);
            ok
        }
        Err(e) => {
            metrics::record_login_attempt(false);
            return Err(e);
        }
    };

    tracing::info!(usuario = usuario.id, "login");

    let cookie = Cookie::build((AUTH_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(ctx.config.auth.cookie_secure)
        .max_age(time::Duration::hours(ctx.tokens.ttl_hours()))
        .build();

    Ok((
        jar.add(cookie),
        Json(SessionResponse {
            success: true,
            user: usuario.into(),
        }),
    ))
}

/// Clear the session cookie
///
/// Tokens are stateless; logout only removes the cookie client-side.
async fn logout(jar: CookieJar) -> (CookieJar, Json<serde_json::Value>) {
    let stale = Cookie::build((AUTH_COOKIE, "")).path("/").build();

    (
        jar.remove(stale),
        Json(serde_json::json!({ "success": true })),
    )
}

/// Current session, re-fetched from the database
async fn me(
    State(ctx): State<AppContext>,
    AuthUser(claims): AuthUser,
) -> ApiResult<Json<SessionResponse>> {
    let usuario = ctx
        .users
        .get_by_id(claims.sub)
        .await?
        .ok_or_else(|| ApiError::NotFound("Usuario no encontrado".to_string()))?;

    Ok(Json(SessionResponse {
        success: true,
        user: usuario.into(),
    }))
}
