/// Camera endpoints
use crate::{
    auth::AuthUser,
    camaras::{Camara, NuevaCamara},
    context::AppContext,
    error::{ApiError, ApiResult},
};
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use validator::Validate;

/// Build camera routes
pub fn routes() -> Router<AppContext> {
    Router::new().route("/api/camaras", get(list_camaras).post(create_camara))
}

async fn list_camaras(
    State(ctx): State<AppContext>,
    AuthUser(_claims): AuthUser,
) -> ApiResult<Json<Vec<Camara>>> {
    Ok(Json(ctx.camaras.list().await?))
}

async fn create_camara(
    State(ctx): State<AppContext>,
    AuthUser(_claims): AuthUser,
    Json(nueva): Json<NuevaCamara>,
) -> ApiResult<(StatusCode, Json<Camara>)> {
    nueva
        .validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    let camara = ctx.camaras.create(nueva).await?;

    tracing::info!(camara = %camara.codigo, "cámara registrada");

    Ok((StatusCode::CREATED, Json(camara)))
}
