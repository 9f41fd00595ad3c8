/// User accounts: rows, sanitized projections and the manager
pub mod manager;
pub mod password;

pub use manager::UserManager;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Database row for the usuarios table
///
/// Deliberately not Serialize: only the sanitized projections below cross
/// the HTTP boundary.
#[derive(Debug, Clone, FromRow)]
pub struct Usuario {
    pub id: i32,
    pub email: String,
    /// Argon2 PHC string
    pub password: String,
    pub nombre: String,
    pub apellido: String,
    pub dni: Option<String>,
    pub telefono: Option<String>,
    pub rol: String,
    pub departamento_id: Option<i32>,
    pub activo: bool,
    pub ultimo_acceso: Option<DateTime<Utc>>,
    pub fecha_creacion: DateTime<Utc>,
}

impl Usuario {
    /// Display name carried in token claims and amendment attribution
    pub fn nombre_completo(&self) -> String {
        format!("{} {}", self.nombre, self.apellido)
            .trim()
            .to_string()
    }
}

/// Sanitized user shape returned by the API (no password hash)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsuarioPublico {
    pub id: i32,
    pub email: String,
    pub nombre: String,
    pub apellido: String,
    pub dni: Option<String>,
    pub telefono: Option<String>,
    pub rol: String,
    pub departamento_id: Option<i32>,
    pub activo: bool,
    pub ultimo_acceso: Option<DateTime<Utc>>,
    pub fecha_creacion: DateTime<Utc>,
}

impl From<Usuario> for UsuarioPublico {
    fn from(u: Usuario) -> Self {
        UsuarioPublico {
            id: u.id,
            email: u.email,
            nombre: u.nombre,
            apellido: u.apellido,
            dni: u.dni,
            telefono: u.telefono,
            rol: u.rol,
            departamento_id: u.departamento_id,
            activo: u.activo,
            ultimo_acceso: u.ultimo_acceso,
            fecha_creacion: u.fecha_creacion,
        }
    }
}

/// User row with the department name merged in, for /api/user/current
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct UsuarioConDepartamento {
    pub id: i32,
    pub email: String,
    pub nombre: String,
    pub apellido: String,
    pub dni: Option<String>,
    pub telefono: Option<String>,
    pub rol: String,
    pub departamento_id: Option<i32>,
    pub departamento: Option<String>,
    pub activo: bool,
    pub ultimo_acceso: Option<DateTime<Utc>>,
    pub fecha_creacion: DateTime<Utc>,
}
