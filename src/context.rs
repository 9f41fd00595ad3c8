/// Application context and dependency injection
use crate::{
    auth::TokenCodec,
    camaras::CamaraManager,
    config::ServerConfig,
    db,
    denuncias::DenunciaManager,
    departamentos::DepartamentoManager,
    error::ApiResult,
    rate_limit::LoginRateLimiter,
    users::UserManager,
};
use sqlx::PgPool;
use std::sync::Arc;

/// Application context holding all shared services
///
/// Built once in main and handed to the router as axum state. The pool and
/// the Arc'd managers are the only state shared across requests.
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<ServerConfig>,
    pub db: PgPool,
    pub tokens: Arc<TokenCodec>,
    pub users: Arc<UserManager>,
    pub denuncias: Arc<DenunciaManager>,
    pub camaras: Arc<CamaraManager>,
    pub departamentos: Arc<DepartamentoManager>,
    pub login_limiter: Arc<LoginRateLimiter>,
}

impl AppContext {
    /// Create a new application context from configuration
    pub async fn new(config: ServerConfig) -> ApiResult<Self> {
        // Validate configuration
        config.validate()?;

        // Connect, migrate, ping
        let pool = db::create_pool(&config.database).await?;
        db::run_migrations(&pool).await?;
        db::test_connection(&pool).await?;

        Ok(Self::with_pool(config, pool))
    }

    /// Assemble the context over an existing pool
    ///
    /// Skips migrations and the startup ping; used by the router tests with
    /// a lazy pool and by anything embedding the service.
    pub fn with_pool(config: ServerConfig, pool: PgPool) -> Self {
        let tokens = Arc::new(TokenCodec::new(
            &config.auth.jwt_secret,
            config.auth.token_ttl_hours,
        ));

        let users = Arc::new(UserManager::new(pool.clone(), Arc::clone(&tokens)));
        let denuncias = Arc::new(DenunciaManager::new(pool.clone()));
        let camaras = Arc::new(CamaraManager::new(pool.clone()));
        let departamentos = Arc::new(DepartamentoManager::new(pool.clone()));
        let login_limiter = Arc::new(LoginRateLimiter::new(&config.rate_limit));

        Self {
            config: Arc::new(config),
            db: pool,
            tokens,
            users,
            denuncias,
            camaras,
            departamentos,
            login_limiter,
        }
    }

    /// Address the HTTP listener binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.config.service.host, self.config.service.port)
    }
}
