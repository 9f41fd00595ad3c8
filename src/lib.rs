/// Sistema de Gestión de Denuncias - backend
///
/// Case-management service for police complaint intake: authentication,
/// complaint/camera/department records and the append-only amendment
/// workflow, over PostgreSQL.

pub mod api;
pub mod auth;
pub mod camaras;
pub mod config;
pub mod context;
pub mod db;
pub mod denuncias;
pub mod departamentos;
pub mod error;
pub mod metrics;
pub mod rate_limit;
pub mod roles;
pub mod server;
pub mod users;
