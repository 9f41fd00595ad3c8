/// Session token issuance and verification
use crate::error::{ApiError, ApiResult};
use crate::users::Usuario;
use chrono::Utc;
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Claims carried by the session token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: i32,
    pub email: String,
    /// Display name, used for amendment attribution
    pub nombre: String,
    pub rol: String,
    pub departamento_id: Option<i32>,
    pub iat: i64,
    pub exp: i64,
}

/// Verification failures are values; the guard maps them to 401
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token expirado")]
    Expirado,
    #[error("Token inválido")]
    Invalido,
}

/// Issues and verifies the signed session token (HS256)
///
/// The signing secret is loaded once at process start and never rotated at
/// runtime. Tokens are stateless: nothing is persisted server-side and there
/// is no revocation list; logout merely clears the cookie.
pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl_hours: i64,
}

impl TokenCodec {
    pub fn new(secret: &str, ttl_hours: i64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Zero leeway: a token past its expiry instant is invalid
        validation.leeway = 0;

        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl_hours,
        }
    }

    pub fn ttl_hours(&self) -> i64 {
        self.ttl_hours
    }

    /// Issue a signed token for the given user
    pub fn issue(&self, usuario: &Usuario) -> ApiResult<String> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: usuario.id,
            email: usuario.email.clone(),
            nombre: usuario.nombre_completo(),
            rol: usuario.rol.clone(),
            departamento_id: usuario.departamento_id,
            iat: now,
            exp: now + self.ttl_hours * 3600,
        };

        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| ApiError::Internal(format!("Token signing failed: {}", e)))
    }

    /// Check signature and expiry; never panics on malformed input
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expirado,
                _ => TokenError::Invalido,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    const SECRET: &str = "clave-de-prueba-de-al-menos-32-bytes!!";

    fn usuario() -> Usuario {
        Usuario {
            id: 7,
            email: "ana@policia.gob.ar".to_string(),
            password: "hash".to_string(),
            nombre: "Ana".to_string(),
            apellido: "Gómez".to_string(),
            dni: Some("30123456".to_string()),
            telefono: None,
            rol: "operador".to_string(),
            departamento_id: Some(3),
            activo: true,
            ultimo_acceso: None,
            fecha_creacion: Utc::now(),
        }
    }

    #[test]
    fn test_issue_and_verify_roundtrip() {
        let codec = TokenCodec::new(SECRET, 24);
        let token = codec.issue(&usuario()).unwrap();

        let claims = codec.verify(&token).unwrap();
        assert_eq!(claims.sub, 7);
        assert_eq!(claims.email, "ana@policia.gob.ar");
        assert_eq!(claims.nombre, "Ana Gómez");
        assert_eq!(claims.rol, "operador");
        assert_eq!(claims.departamento_id, Some(3));
        assert_eq!(claims.exp - claims.iat, 24 * 3600);
    }

    #[test]
    fn test_expired_token_is_invalid() {
        let vencido = TokenCodec::new(SECRET, -1);
        let token = vencido.issue(&usuario()).unwrap();

        let codec = TokenCodec::new(SECRET, 24);
        assert_eq!(codec.verify(&token).unwrap_err(), TokenError::Expirado);
    }

    #[test]
    fn test_malformed_tokens_never_panic() {
        let codec = TokenCodec::new(SECRET, 24);

        for basura in ["", "x", "no.es.jwt", "a.b", "ey.ey.ey.ey"] {
            assert_eq!(codec.verify(basura).unwrap_err(), TokenError::Invalido);
        }
    }

    #[test]
    fn test_wrong_secret_is_invalid() {
        let codec = TokenCodec::new(SECRET, 24);
        let otro = TokenCodec::new("otra-clave-distinta-de-32-bytes!!!!!", 24);

        let token = otro.issue(&usuario()).unwrap();
        assert_eq!(codec.verify(&token).unwrap_err(), TokenError::Invalido);
    }

    #[test]
    fn test_tampered_token_is_invalid() {
        let codec = TokenCodec::new(SECRET, 24);
        let token = codec.issue(&usuario()).unwrap();

        let mut alterado = token.clone();
        alterado.truncate(token.len() - 2);
        alterado.push_str("xx");

        assert_eq!(codec.verify(&alterado).unwrap_err(), TokenError::Invalido);
    }

    #[test]
    fn test_sin_departamento() {
        let codec = TokenCodec::new(SECRET, 24);
        let mut u = usuario();
        u.departamento_id = None;

        let claims = codec.verify(&codec.issue(&u).unwrap()).unwrap();
        assert_eq!(claims.departamento_id, None);
    }
}
