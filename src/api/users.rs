/// User endpoints
use crate::{
    auth::{AdminUser, AuthUser},
    context::AppContext,
    error::{ApiError, ApiResult},
    users::{UsuarioConDepartamento, UsuarioPublico},
};
use axum::{extract::State, routing::get, Json, Router};

/// Build user routes
pub fn routes() -> Router<AppContext> {
    Router::new()
        .route("/api/user/current", get(current_user))
        .route("/api/usuarios", get(list_usuarios))
}

/// Current user with the department name merged in
///
/// Bumps ultimo_acceso after the read, so the response carries the pre-call
/// value. The bump is best-effort: a failure is logged and the request still
/// succeeds.
async fn current_user(
    State(ctx): State<AppContext>,
    AuthUser(claims): AuthUser,
) -> ApiResult<Json<UsuarioConDepartamento>> {
    let usuario = ctx
        .users
        .get_con_departamento(claims.sub)
        .await?
        .ok_or_else(|| ApiError::NotFound("Usuario no encontrado".to_string()))?;

    if let Err(e) = ctx.users.touch_ultimo_acceso(claims.sub).await {
        tracing::warn!(usuario = claims.sub, "ultimo_acceso update failed: {}", e);
    }

    Ok(Json(usuario))
}

/// All users, sanitized; admin only
async fn list_usuarios(
    State(ctx): State<AppContext>,
    AdminUser(_admin): AdminUser,
) -> ApiResult<Json<Vec<UsuarioPublico>>> {
    Ok(Json(ctx.users.list().await?))
}
