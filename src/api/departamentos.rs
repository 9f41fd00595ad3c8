/// Department endpoints
use crate::{
    auth::AuthUser,
    context::AppContext,
    departamentos::Departamento,
    error::ApiResult,
};
use axum::{extract::State, routing::get, Json, Router};

/// Build department routes
pub fn routes() -> Router<AppContext> {
    Router::new().route("/api/departamentos", get(list_departamentos))
}

async fn list_departamentos(
    State(ctx): State<AppContext>,
    AuthUser(_claims): AuthUser,
) -> ApiResult<Json<Vec<Departamento>>> {
    Ok(Json(ctx.departamentos.list().await?))
}
