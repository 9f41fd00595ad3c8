/// HTTP server setup and routing
use crate::{
    api::middleware::dashboard_gate,
    context::AppContext,
    error::{ApiError, ApiResult},
    metrics,
};
use axum::{
    http::{header, Method, StatusCode},
    middleware,
    response::Json,
    routing::get,
    Router,
};
use serde_json::json;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing::info;

/// Build the main application router
/// Returns Router<()> because state is already provided
pub fn build_router(ctx: AppContext) -> Router {
    // Create CORS layer
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    // Prebuilt dashboard assets; the gate in front decides who gets them
    let dashboard = ServeDir::new(&ctx.config.service.static_dir);

    Router::new()
        // Liveness endpoint (no database touch)
        .route("/health", get(health_check))
        // Prometheus text exposition
        .route("/metrics", get(render_metrics))
        // JSON API
        .merge(crate::api::routes())
        // Static dashboard, behind the route gate below
        .nest_service("/dashboard", dashboard)
        // Provide state - converts Router<AppContext> to Router<()>
        .with_state(ctx.clone())
        // Route gate: security headers + redirect for /dashboard/*
        .layer(middleware::from_fn_with_state(ctx, dashboard_gate))
        // Request metrics (method, path, status, latency)
        .layer(middleware::from_fn(metrics::track_http))
        .layer(cors)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .fallback(not_found)
}

/// Health check handler
async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Metrics handler
async fn render_metrics() -> String {
    metrics::render_metrics()
}

/// 404 handler
async fn not_found() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "Not found" })),
    )
}

/// Start the HTTP server
pub async fn serve(ctx: AppContext) -> ApiResult<()> {
    let addr = ctx.bind_addr();

    info!("Sistema de denuncias escuchando en {}", addr);
    info!(
        "   Base de datos: {}",
        ctx.config.database.provider.name()
    );
    info!("   Entorno: {}", ctx.config.service.environment);

    let app = build_router(ctx);

    // Create TCP listener
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| ApiError::Internal(format!("Failed to bind to {}: {}", addr, e)))?;

    // Axum 0.7: Router<()> can be passed directly to serve
    axum::serve(listener, app)
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    Ok(())
}
