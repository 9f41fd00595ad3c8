/// Complaint queries and the atomic amendment appender
use super::{Denuncia, DenunciaFiltro, DenunciaKind, NuevaDenuncia};
use crate::error::{ApiError, ApiResult};
use chrono::{DateTime, Local};
use sqlx::PgPool;

const COLUMNAS: &str = "id, denunciante, dni, tipo, departamento, division, fecha, estado, \
                        descripcion, creado_por, fecha_creacion, fecha_actualizacion";

const NO_ENCONTRADA: &str = "Denuncia no encontrada";

/// Complaint operations over the two complaint tables
pub struct DenunciaManager {
    db: PgPool,
}

impl DenunciaManager {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn list(
        &self,
        kind: DenunciaKind,
        filtro: &DenunciaFiltro,
    ) -> ApiResult<Vec<Denuncia>> {
        let limite = filtro.limite.unwrap_or(100).clamp(1, 500);

        let denuncias = match &filtro.estado {
            Some(estado) => {
                sqlx::query_as::<_, Denuncia>(&format!(
                    "SELECT {COLUMNAS} FROM {} WHERE estado = $1 \
                     ORDER BY fecha_creacion DESC LIMIT $2",
                    kind.tabla()
                ))
                .bind(estado)
                .bind(limite)
                .fetch_all(&self.db)
                .await?
            }
            None => {
                sqlx::query_as::<_, Denuncia>(&format!(
                    "SELECT {COLUMNAS} FROM {} ORDER BY fecha_creacion DESC LIMIT $1",
                    kind.tabla()
                ))
                .bind(limite)
                .fetch_all(&self.db)
                .await?
            }
        };

        Ok(denuncias)
    }

    pub async fn get(&self, kind: DenunciaKind, id: i32) -> ApiResult<Denuncia> {
        sqlx::query_as::<_, Denuncia>(&format!(
            "SELECT {COLUMNAS} FROM {} WHERE id = $1",
            kind.tabla()
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| ApiError::NotFound(NO_ENCONTRADA.to_string()))
    }

    pub async fn create(
        &self,
        kind: DenunciaKind,
        nueva: NuevaDenuncia,
        creado_por: Option<i32>,
    ) -> ApiResult<Denuncia> {
        let denuncia = sqlx::query_as::<_, Denuncia>(&format!(
            "INSERT INTO {} (denunciante, dni, tipo, departamento, division, fecha, estado, \
             descripcion, creado_por) \
             VALUES ($1, $2, $3, $4, $5, COALESCE($6, CURRENT_DATE), $7, $8, $9) \
             RETURNING {COLUMNAS}",
            kind.tabla()
        ))
        .bind(&nueva.denunciante)
        .bind(&nueva.dni)
        .bind(&nueva.tipo)
        .bind(&nueva.departamento)
        .bind(&nueva.division)
        .bind(nueva.fecha)
        .bind(nueva.estado.as_deref().unwrap_or("pendiente"))
        .bind(&nueva.descripcion)
        .bind(creado_por)
        .fetch_one(&self.db)
        .await?;

        Ok(denuncia)
    }

    /// Append an attributed, timestamped block to the description
    ///
    /// One statement with server-side concatenation: concurrent amendments
    /// to the same row serialize inside the database and both survive. The
    /// block text travels as a bound parameter.
    pub async fn append_ampliacion(
        &self,
        kind: DenunciaKind,
        id: i32,
        autor: &str,
        texto: &str,
    ) -> ApiResult<Denuncia> {
        let texto = texto.trim();
        if texto.is_empty() {
            return Err(ApiError::Validation(
                "La ampliación no puede estar vacía".to_string(),
            ));
        }

        let bloque = formatear_bloque(autor, texto, Local::now());

        sqlx::query_as::<_, Denuncia>(&format!(
            "UPDATE {} SET descripcion = COALESCE(descripcion, '') || $2, \
             fecha_actualizacion = NOW() WHERE id = $1 RETURNING {COLUMNAS}",
            kind.tabla()
        ))
        .bind(id)
        .bind(&bloque)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| ApiError::NotFound(NO_ENCONTRADA.to_string()))
    }
}

/// Block layout: separator, localized timestamp, author, body
fn formatear_bloque(autor: &str, texto: &str, cuando: DateTime<Local>) -> String {
    let autor = autor.trim();
    let autor = if autor.is_empty() { "Usuario" } else { autor };

    format!(
        "\n\n--- AMPLIACIÓN ({}) por {} ---\n{}",
        cuando.format("%d/%m/%Y %H:%M"),
        autor,
        texto
    )
}
