/// API routes and handlers
pub mod auth;
pub mod camaras;
pub mod denuncias;
pub mod departamentos;
pub mod middleware;
pub mod users;

use crate::context::AppContext;
use axum::Router;

/// Build API routes
pub fn routes() -> Router<AppContext> {
    Router::new()
        .merge(auth::routes())
        .merge(users::routes())
        .merge(denuncias::routes())
        .merge(camaras::routes())
        .merge(departamentos::routes())
}
