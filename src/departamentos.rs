/// Department catalogue
use crate::error::ApiResult;
use serde::Serialize;
use sqlx::{FromRow, PgPool};

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Departamento {
    pub id: i32,
    pub nombre: String,
}

/// Read-only lookups over the departamentos table
pub struct DepartamentoManager {
    db: PgPool,
}

impl DepartamentoManager {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn list(&self) -> ApiResult<Vec<Departamento>> {
        let departamentos = sqlx::query_as::<_, Departamento>(
            "SELECT id, nombre FROM departamentos ORDER BY nombre",
        )
        .fetch_all(&self.db)
        .await?;

        Ok(departamentos)
    }
}
