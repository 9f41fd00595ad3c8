/// Camera queries and code generation
use super::{Camara, NuevaCamara};
use crate::error::{ApiError, ApiResult};
use sqlx::PgPool;
use uuid::Uuid;

/// Camera operations over the camaras table
pub struct CamaraManager {
    db: PgPool,
}

impl CamaraManager {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn list(&self) -> ApiResult<Vec<Camara>> {
        let camaras = sqlx::query_as::<_, Camara>(
            "SELECT id, codigo, nombre, ubicacion, latitud, longitud, estado, \
             departamento_id, fecha_creacion FROM camaras ORDER BY codigo",
        )
        .fetch_all(&self.db)
        .await?;

        Ok(camaras)
    }

    /// Insert a camera, generating a code when none is given
    pub async fn create(&self, nueva: NuevaCamara) -> ApiResult<Camara> {
        let codigo = normalizar_codigo(nueva.codigo.as_deref());

        sqlx::query_as::<_, Camara>(
            "INSERT INTO camaras (codigo, nombre, ubicacion, latitud, longitud, estado, \
             departamento_id) VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING id, codigo, nombre, ubicacion, latitud, longitud, estado, \
             departamento_id, fecha_creacion",
        )
        .bind(&codigo)
        .bind(&nueva.nombre)
        .bind(&nueva.ubicacion)
        .bind(nueva.latitud)
        .bind(nueva.longitud)
        .bind(nueva.estado.as_deref().unwrap_or("activa"))
        .bind(nueva.departamento_id)
        .fetch_one(&self.db)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                ApiError::Validation(format!("Código de cámara duplicado: {}", codigo))
            }
            _ => ApiError::Database(e),
        })
    }
}

/// Trimmed caller code, or a generated CAM-XXXXXXXX one
fn normalizar_codigo(codigo: Option<&str>) -> String {
    match codigo.map(str::trim) {
        Some(c) if !c.is_empty() => c.to_string(),
        _ => {
            let id = Uuid::new_v4().simple().to_string();
            format!("CAM-{}", id[..8].to_uppercase())
        }
    }
}
