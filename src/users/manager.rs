/// User lookup and credential verification
use super::{password, Usuario, UsuarioConDepartamento, UsuarioPublico};
use crate::auth::TokenCodec;
use crate::error::{ApiError, ApiResult};
use sqlx::PgPool;
use std::sync::Arc;

const CREDENCIALES_INVALIDAS: &str = "Credenciales inválidas";

const COLUMNAS: &str = "id, email, password, nombre, apellido, dni, telefono, rol, \
                        departamento_id, activo, ultimo_acceso, fecha_creacion";

/// Account operations over the usuarios table
pub struct UserManager {
    db: PgPool,
    tokens: Arc<TokenCodec>,
}

impl UserManager {
    pub fn new(db: PgPool, tokens: Arc<TokenCodec>) -> Self {
        Self { db, tokens }
    }

    /// Verify credentials and issue a session token
    ///
    /// Unknown email and wrong password share one generic error so accounts
    /// cannot be enumerated. The activo check runs only after the password
    /// check succeeds.
    pub async fn authenticate(&self, email: &str, plain: &str) -> ApiResult<(Usuario, String)> {
        let usuario = sqlx::query_as::<_, Usuario>(&format!(
            "SELECT {COLUMNAS} FROM usuarios WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.db)
        .await?;

        let Some(usuario) = usuario else {
            return Err(ApiError::Unauthorized(CREDENCIALES_INVALIDAS.to_string()));
        };

        if !password::verify_password(plain, &usuario.password) {
            return Err(ApiError::Unauthorized(CREDENCIALES_INVALIDAS.to_string()));
        }

        if !usuario.activo {
            return Err(ApiError::Unauthorized("Cuenta desactivada".to_string()));
        }

        let token = self.tokens.issue(&usuario)?;

        Ok((usuario, token))
    }

    pub async fn get_by_id(&self, id: i32) -> ApiResult<Option<Usuario>> {
        let usuario = sqlx::query_as::<_, Usuario>(&format!(
            "SELECT {COLUMNAS} FROM usuarios WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await?;

        Ok(usuario)
    }

    /// User row with its department name merged in
    pub async fn get_con_departamento(
        &self,
        id: i32,
    ) -> ApiResult<Option<UsuarioConDepartamento>> {
        let usuario = sqlx::query_as::<_, UsuarioConDepartamento>(
            "SELECT u.id, u.email, u.nombre, u.apellido, u.dni, u.telefono, u.rol, \
             u.departamento_id, d.nombre AS departamento, u.activo, u.ultimo_acceso, \
             u.fecha_creacion \
             FROM usuarios u \
             LEFT JOIN departamentos d ON d.id = u.departamento_id \
             WHERE u.id = $1",
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;

        Ok(usuario)
    }

    /// Best-effort last-access bump; callers log failures and move on
    pub async fn touch_ultimo_acceso(&self, id: i32) -> ApiResult<()> {
        sqlx::query("UPDATE usuarios SET ultimo_acceso = NOW() WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        Ok(())
    }

    /// All users, sanitized, for the admin panel
    pub async fn list(&self) -> ApiResult<Vec<UsuarioPublico>> {
        let usuarios = sqlx::query_as::<_, Usuario>(&format!(
            "SELECT {COLUMNAS} FROM usuarios ORDER BY apellido, nombre"
        ))
        .fetch_all(&self.db)
        .await?;

        Ok(usuarios.into_iter().map(UsuarioPublico::from).collect())
    }
}
