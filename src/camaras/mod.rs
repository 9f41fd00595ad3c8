/// Camera records
pub mod manager;

pub use manager::CamaraManager;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Database row for the camaras table
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Camara {
    pub id: i32,
    pub codigo: String,
    pub nombre: String,
    pub ubicacion: Option<String>,
    pub latitud: Option<f64>,
    pub longitud: Option<f64>,
    pub estado: String,
    pub departamento_id: Option<i32>,
    pub fecha_creacion: DateTime<Utc>,
}

/// Create payload; codigo is generated when absent or blank
#[derive(Debug, Deserialize, Validate)]
pub struct NuevaCamara {
    pub codigo: Option<String>,
    #[validate(length(min = 1, message = "El nombre es requerido"))]
    pub nombre: String,
    pub ubicacion: Option<String>,
    pub latitud: Option<f64>,
    pub longitud: Option<f64>,
    pub estado: Option<String>,
    pub departamento_id: Option<i32>,
}
