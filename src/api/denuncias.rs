/// Complaint endpoints, for both complaint tables
use crate::{
    auth::AuthUser,
    context::AppContext,
    denuncias::{AmpliacionRequest, Denuncia, DenunciaFiltro, DenunciaKind, NuevaDenuncia},
    error::{ApiError, ApiResult},
    metrics,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use validator::Validate;

/// Build complaint routes
///
/// The two tables expose mirrored route sets; each route is bound to its
/// DenunciaKind here, never derived from the request.
pub fn routes() -> Router<AppContext> {
    Router::new()
        .route(
            "/api/denuncias",
            get(list_comunes).post(create_comun),
        )
        .route("/api/denuncias/:id", get(get_comun))
        .route("/api/denuncias/:id/ampliacion", post(ampliar_comun))
        .route(
            "/api/denuncias-formales",
            get(list_formales).post(create_formal),
        )
        .route("/api/denuncias-formales/:id", get(get_formal))
        .route("/api/denuncias-formales/:id/ampliacion", post(ampliar_formal))
}

/// Body of a successful amendment
#[derive(Debug, Serialize)]
pub struct AmpliacionResponse {
    pub success: bool,
    pub denuncia: Denuncia,
}

async fn list(
    ctx: AppContext,
    kind: DenunciaKind,
    filtro: DenunciaFiltro,
) -> ApiResult<Json<Vec<Denuncia>>> {
    Ok(Json(ctx.denuncias.list(kind, &filtro).await?))
}

async fn get_one(ctx: AppContext, kind: DenunciaKind, id: i32) -> ApiResult<Json<Denuncia>> {
    Ok(Json(ctx.denuncias.get(kind, id).await?))
}

async fn create(
    ctx: AppContext,
    kind: DenunciaKind,
    claims_sub: i32,
    nueva: NuevaDenuncia,
) -> ApiResult<(StatusCode, Json<Denuncia>)> {
    nueva
        .validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    let denuncia = ctx.denuncias.create(kind, nueva, Some(claims_sub)).await?;

    tracing::info!(denuncia = denuncia.id, tabla = kind.tabla(), "denuncia creada");

    Ok((StatusCode::CREATED, Json(denuncia)))
}

async fn ampliar(
    ctx: AppContext,
    kind: DenunciaKind,
    id: i32,
    autor: &str,
    req: AmpliacionRequest,
) -> ApiResult<Json<AmpliacionResponse>> {
    let denuncia = ctx
        .denuncias
        .append_ampliacion(kind, id, autor, &req.ampliacion)
        .await?;

    metrics::record_ampliacion(kind.etiqueta());
    tracing::info!(denuncia = id, tabla = kind.tabla(), "ampliación registrada");

    Ok(Json(AmpliacionResponse {
        success: true,
        denuncia,
    }))
}

async fn list_comunes(
    State(ctx): State<AppContext>,
    AuthUser(_claims): AuthUser,
    Query(filtro): Query<DenunciaFiltro>,
) -> ApiResult<Json<Vec<Denuncia>>> {
    list(ctx, DenunciaKind::Comun, filtro).await
}

async fn list_formales(
    State(ctx): State<AppContext>,
    AuthUser(_claims): AuthUser,
    Query(filtro): Query<DenunciaFiltro>,
) -> ApiResult<Json<Vec<Denuncia>>> {
    list(ctx, DenunciaKind::Formal, filtro).await
}

async fn get_comun(
    State(ctx): State<AppContext>,
    AuthUser(_claims): AuthUser,
    Path(id): Path<i32>,
) -> ApiResult<Json<Denuncia>> {
    get_one(ctx, DenunciaKind::Comun, id).await
}

async fn get_formal(
    State(ctx): State<AppContext>,
    AuthUser(_claims): AuthUser,
    Path(id): Path<i32>,
) -> ApiResult<Json<Denuncia>> {
    get_one(ctx, DenunciaKind::Formal, id).await
}

async fn create_comun(
    State(ctx): State<AppContext>,
    AuthUser(claims): AuthUser,
    Json(nueva): Json<NuevaDenuncia>,
) -> ApiResult<(StatusCode, Json<Denuncia>)> {
    create(ctx, DenunciaKind::Comun, claims.sub, nueva).await
}

async fn create_formal(
    State(ctx): State<AppContext>,
    AuthUser(claims): AuthUser,
    Json(nueva): Json<NuevaDenuncia>,
) -> ApiResult<(StatusCode, Json<Denuncia>)> {
    create(ctx, DenunciaKind::Formal, claims.sub, nueva).await
}

async fn ampliar_comun(
    State(ctx): State<AppContext>,
    AuthUser(claims): AuthUser,
    Path(id): Path<i32>,
    Json(req): Json<AmpliacionRequest>,
) -> ApiResult<Json<AmpliacionResponse>> {
    ampliar(ctx, DenunciaKind::Comun, id, &claims.nombre, req).await
}

async fn ampliar_formal(
    State(ctx): State<AppContext>,
    AuthUser(claims): AuthUser,
    Path(id): Path<i32>,
    Json(req): Json<AmpliacionRequest>,
) -> ApiResult<Json<AmpliacionResponse>> {
    ampliar(ctx, DenunciaKind::Formal, id, &claims.nombre, req).await
}
