/// Configuration management for the denuncias backend
use crate::error::{ApiError, ApiResult};
use serde::{Deserialize, Serialize};
use std::env;

/// Main server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub service: ServiceConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub rate_limit: RateLimitConfig,
}

/// Service-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub host: String,
    pub port: u16,
    /// Directory with the prebuilt dashboard assets
    pub static_dir: String,
    pub environment: String,
}

impl ServiceConfig {
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub provider: DatabaseProvider,
    pub max_connections: u32,
    pub connect_timeout_secs: u64,
}

/// Connection settings per hosting provider
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "provider", rename_all = "lowercase")]
pub enum DatabaseProvider {
    Postgres {
        host: String,
        port: u16,
        database: String,
        user: String,
        password: String,
        /// Full connection string; takes precedence over the parts above
        url: Option<String>,
    },
    Supabase {
        url: String,
    },
    Neon {
        url: String,
    },
}

impl DatabaseProvider {
    pub fn name(&self) -> &'static str {
        match self {
            DatabaseProvider::Postgres { .. } => "postgres",
            DatabaseProvider::Supabase { .. } => "supabase",
            DatabaseProvider::Neon { .. } => "neon",
        }
    }
}

/// Authentication configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
    /// Whether the auth-token cookie carries the Secure attribute
    pub cookie_secure: bool,
}

/// Login rate limiting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    pub enabled: bool,
    pub login_attempts_per_minute: u32,
}

impl ServerConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> ApiResult<Self> {
        dotenv::dotenv().ok();

        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .map_err(|_| ApiError::Validation("Invalid port number".to_string()))?;
        let static_dir = env::var("STATIC_DIR").unwrap_or_else(|_| "./public".to_string());
        let environment = env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        let provider = match env::var("DATABASE_PROVIDER")
            .unwrap_or_else(|_| "postgres".to_string())
            .to_lowercase()
            .as_str()
        {
            "postgres" => DatabaseProvider::Postgres {
                host: env::var("POSTGRES_HOST").unwrap_or_else(|_| "localhost".to_string()),
                port: env::var("POSTGRES_PORT")
                    .unwrap_or_else(|_| "5432".to_string())
                    .parse()
                    .map_err(|_| {
                        ApiError::Validation("Invalid POSTGRES_PORT".to_string())
                    })?,
                database: env::var("POSTGRES_DB").unwrap_or_else(|_| "denuncias".to_string()),
                user: env::var("POSTGRES_USER").unwrap_or_else(|_| "postgres".to_string()),
                password: env::var("POSTGRES_PASSWORD").unwrap_or_default(),
                url: env::var("DATABASE_URL").ok(),
            },
            "supabase" => DatabaseProvider::Supabase {
                url: env::var("SUPABASE_DB_URL").map_err(|_| {
                    ApiError::Validation(
                        "SUPABASE_DB_URL required for the supabase provider".to_string(),
                    )
                })?,
            },
            "neon" => DatabaseProvider::Neon {
                url: env::var("NEON_DATABASE_URL").map_err(|_| {
                    ApiError::Validation(
                        "NEON_DATABASE_URL required for the neon provider".to_string(),
                    )
                })?,
            },
            other => {
                return Err(ApiError::Validation(format!(
                    "Unknown DATABASE_PROVIDER: {other}"
                )))
            }
        };

        let max_connections = env::var("POSTGRES_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .unwrap_or(10);
        let connect_timeout_secs = env::var("POSTGRES_CONNECT_TIMEOUT")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .unwrap_or(30);

        let jwt_secret = env::var("JWT_SECRET")
            .map_err(|_| ApiError::Validation("JWT_SECRET required".to_string()))?;
        let token_ttl_hours = env::var("TOKEN_TTL_HOURS")
            .unwrap_or_else(|_| "24".to_string())
            .parse()
            .unwrap_or(24);
        let cookie_secure = env::var("COOKIE_SECURE")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(environment == "production");

        let rate_limit_enabled = env::var("RATE_LIMIT_ENABLED")
            .unwrap_or_else(|_| "true".to_string())
            .parse()
            .unwrap_or(true);
        let login_attempts_per_minute = env::var("LOGIN_ATTEMPTS_PER_MINUTE")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .unwrap_or(10);

        Ok(ServerConfig {
            service: ServiceConfig {
                host,
                port,
                static_dir,
                environment,
            },
            database: DatabaseConfig {
                provider,
                max_connections,
                connect_timeout_secs,
            },
            auth: AuthConfig {
                jwt_secret,
                token_ttl_hours,
                cookie_secure,
            },
            rate_limit: RateLimitConfig {
                enabled: rate_limit_enabled,
                login_attempts_per_minute,
            },
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> ApiResult<()> {
        if self.service.host.is_empty() {
            return Err(ApiError::Validation("Host cannot be empty".to_string()));
        }

        if self.auth.jwt_secret.len() < 32 {
            return Err(ApiError::Validation(
                "JWT secret must be at least 32 characters".to_string(),
            ));
        }

        if self.auth.token_ttl_hours < 1 {
            return Err(ApiError::Validation(
                "Token TTL must be at least one hour".to_string(),
            ));
        }

        Ok(())
    }
}
