/// Complaint records: rows, payloads and the two structurally identical tables
pub mod manager;

pub use manager::DenunciaManager;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Which complaint table an operation targets
///
/// Table names come from this closed enum only; they are never built from
/// request input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenunciaKind {
    Comun,
    Formal,
}

impl DenunciaKind {
    pub fn tabla(&self) -> &'static str {
        match self {
            DenunciaKind::Comun => "denuncias",
            DenunciaKind::Formal => "denuncias_formales",
        }
    }

    /// Metric label
    pub fn etiqueta(&self) -> &'static str {
        match self {
            DenunciaKind::Comun => "comun",
            DenunciaKind::Formal => "formal",
        }
    }
}

/// Database row shared by denuncias and denuncias_formales
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Denuncia {
    pub id: i32,
    pub denunciante: String,
    pub dni: Option<String>,
    pub tipo: String,
    pub departamento: Option<String>,
    pub division: Option<String>,
    pub fecha: NaiveDate,
    pub estado: String,
    pub descripcion: Option<String>,
    pub creado_por: Option<i32>,
    pub fecha_creacion: DateTime<Utc>,
    pub fecha_actualizacion: DateTime<Utc>,
}

/// Create payload
#[derive(Debug, Deserialize, Validate)]
pub struct NuevaDenuncia {
    #[validate(length(min = 1, message = "El denunciante es requerido"))]
    pub denunciante: String,
    pub dni: Option<String>,
    #[validate(length(min = 1, message = "El tipo es requerido"))]
    pub tipo: String,
    pub departamento: Option<String>,
    pub division: Option<String>,
    pub fecha: Option<NaiveDate>,
    pub estado: Option<String>,
    #[validate(length(min = 1, message = "La descripción es requerida"))]
    pub descripcion: String,
}

/// Amendment payload; blank text is rejected by the appender
#[derive(Debug, Deserialize)]
pub struct AmpliacionRequest {
    #[serde(default)]
    pub ampliacion: String,
}

/// List filters
#[derive(Debug, Default, Deserialize)]
pub struct DenunciaFiltro {
    pub estado: Option<String>,
    pub limite: Option<i64>,
}
