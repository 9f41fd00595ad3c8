/// Authentication extractors and token utilities
pub mod token;

pub use token::{Claims, TokenCodec, TokenError};

use crate::{
    api::middleware::extract_token, context::AppContext, error::ApiError, roles::Rol,
    users::Usuario,
};
use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

/// Authenticated identity taken from a verified token
///
/// Trusts the claims as-is, no database read. Read routes and the amendment
/// append use this; attribution comes from the verified claims.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

#[async_trait]
impl FromRequestParts<AppContext> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppContext,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_token(&parts.headers)
            .ok_or_else(|| ApiError::Unauthorized("No autorizado".to_string()))?;

        let claims = state.tokens.verify(&token).map_err(|e| {
            tracing::debug!("token verification failed: {}", e);
            ApiError::Unauthorized("Token inválido o expirado".to_string())
        })?;

        Ok(AuthUser(claims))
    }
}

/// Admin identity, re-fetched from the database on every request
///
/// Sensitive routes re-read the user row so activo or rol changes since
/// login take effect immediately, without waiting for the token to expire.
#[derive(Debug, Clone)]
pub struct AdminUser(pub Usuario);

#[async_trait]
impl FromRequestParts<AppContext> for AdminUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppContext,
    ) -> Result<Self, Self::Rejection> {
        let AuthUser(claims) = AuthUser::from_request_parts(parts, state).await?;

        let usuario = state
            .users
            .get_by_id(claims.sub)
            .await?
            .ok_or_else(|| ApiError::Unauthorized("Usuario no encontrado".to_string()))?;

        if !usuario.activo {
            return Err(ApiError::Unauthorized("Cuenta desactivada".to_string()));
        }

        let rol = Rol::from_str(&usuario.rol)
            .map_err(|_| ApiError::Forbidden("Requiere rol de administrador".to_string()))?;
        if !rol.puede_actuar_como(Rol::Admin) {
            return Err(ApiError::Forbidden(
                "Requiere rol de administrador".to_string(),
            ));
        }

        Ok(AdminUser(usuario))
    }
}
