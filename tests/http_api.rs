/// Router-level tests over a lazy pool
///
/// Everything here resolves before any query runs, so no database is needed:
/// auth rejections, input validation, the dashboard gate and the fallback.
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use chrono::Utc;
use denuncias_server::{
    config::{
        AuthConfig, DatabaseConfig, DatabaseProvider, RateLimitConfig, ServerConfig,
        ServiceConfig,
    },
    context::AppContext,
    server::build_router,
    users::Usuario,
};
use sqlx::postgres::PgPoolOptions;
use tower::ServiceExt;

const SECRET: &str = "clave-de-prueba-de-al-menos-32-bytes!!";

fn test_config() -> ServerConfig {
    ServerConfig {
        service: ServiceConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            static_dir: "./public".to_string(),
            environment: "test".to_string(),
        },
        database: DatabaseConfig {
            provider: DatabaseProvider::Postgres {
                host: "localhost".to_string(),
                port: 5432,
                database: "nunca_conecta".to_string(),
                user: "nadie".to_string(),
                password: String::new(),
                url: None,
            },
            max_connections: 2,
            connect_timeout_secs: 5,
        },
        auth: AuthConfig {
            jwt_secret: SECRET.to_string(),
            token_ttl_hours: 24,
            cookie_secure: false,
        },
        rate_limit: RateLimitConfig {
            enabled: false,
            login_attempts_per_minute: 10,
        },
    }
}

fn test_app() -> (Router, AppContext) {
    let pool = PgPoolOptions::new()
        .connect_lazy("postgres://nadie@localhost/nunca_conecta")
        .unwrap();
    let ctx = AppContext::with_pool(test_config(), pool);
    (build_router(ctx.clone()), ctx)
}

fn token_for(ctx: &AppContext) -> String {
    let usuario = Usuario {
        id: 1,
        email: "ana@policia.gob.ar".to_string(),
        password: "hash".to_string(),
        nombre: "Ana".to_string(),
        apellido: "Gómez".to_string(),
        dni: None,
        telefono: None,
        rol: "operador".to_string(),
        departamento_id: None,
        activo: true,
        ultimo_acceso: None,
        fecha_creacion: Utc::now(),
    };
    ctx.tokens.issue(&usuario).unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_health() {
    let (app, _ctx) = test_app();

    let response = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let (app, _ctx) = test_app();

    let response = app.oneshot(get("/metrics")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_fallback_es_json() {
    let (app, _ctx) = test_app();

    let response = app.oneshot(get("/no/existe")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["error"], "Not found");
}

#[tokio::test]
async fn test_login_sin_campos() {
    let (app, _ctx) = test_app();

    for body in ["{}", r#"{"email":"a@x.com"}"#, r#"{"password":"x"}"#] {
        let response = app
            .clone()
            .oneshot(post_json("/api/auth/login", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        // No cookie on failure
        assert!(response.headers().get(header::SET_COOKIE).is_none());
    }
}

#[tokio::test]
async fn test_login_campos_en_blanco() {
    let (app, _ctx) = test_app();

    let response = app
        .oneshot(post_json(
            "/api/auth/login",
            r#"{"email":"   ","password":"x"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_rutas_protegidas_sin_token() {
    let (app, _ctx) = test_app();

    for uri in [
        "/api/auth/me",
        "/api/user/current",
        "/api/camaras",
        "/api/denuncias",
        "/api/denuncias-formales",
        "/api/departamentos",
        "/api/usuarios",
    ] {
        let response = app.clone().oneshot(get(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "uri: {uri}");

        let json = body_json(response).await;
        assert!(json["error"].is_string(), "uri: {uri}");
    }
}

#[tokio::test]
async fn test_token_invalido_da_401() {
    let (app, _ctx) = test_app();

    let request = Request::builder()
        .uri("/api/auth/me")
        .header(header::COOKIE, "auth-token=no.es.jwt")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_ampliacion_sin_token() {
    let (app, _ctx) = test_app();

    let response = app
        .oneshot(post_json(
            "/api/denuncias/5/ampliacion",
            r#"{"ampliacion":"texto"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// The blank check runs before any query, so the lazy pool never connects.
#[tokio::test]
async fn test_ampliacion_en_blanco_da_400() {
    let (app, ctx) = test_app();
    let token = token_for(&ctx);

    for uri in [
        "/api/denuncias/5/ampliacion",
        "/api/denuncias-formales/5/ampliacion",
    ] {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::from(r#"{"ampliacion":"   "}"#))
            .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "uri: {uri}");
    }
}

#[tokio::test]
async fn test_dashboard_sin_cookie_redirige() {
    let (app, _ctx) = test_app();

    let response = app.oneshot(get("/dashboard/index.html")).await.unwrap();
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.headers()[header::LOCATION], "/");

    // Security headers go on the redirect too
    assert_eq!(response.headers()["x-frame-options"], "DENY");
    assert_eq!(response.headers()["x-content-type-options"], "nosniff");
    assert_eq!(
        response.headers()["referrer-policy"],
        "strict-origin-when-cross-origin"
    );
    assert_eq!(
        response.headers()["permissions-policy"],
        "camera=(), microphone=(), geolocation=()"
    );
}

#[tokio::test]
async fn test_dashboard_con_cookie_invalida_redirige() {
    let (app, _ctx) = test_app();

    let request = Request::builder()
        .uri("/dashboard/index.html")
        .header(header::COOKIE, "auth-token=basura")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
}

#[tokio::test]
async fn test_dashboard_con_cookie_valida_pasa() {
    let (app, ctx) = test_app();
    let token = token_for(&ctx);

    let request = Request::builder()
        .uri("/dashboard/index.html")
        .header(header::COOKIE, format!("auth-token={token}"))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    // Past the gate; ServeDir answers (404 here, the assets are not built)
    assert_ne!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.headers()["x-frame-options"], "DENY");
}

#[tokio::test]
async fn test_rutas_fuera_del_dashboard_sin_headers_de_gate() {
    let (app, _ctx) = test_app();

    let response = app.oneshot(get("/health")).await.unwrap();
    assert!(response.headers().get("x-frame-options").is_none());
}
