/// User role levels
use crate::error::{ApiError, ApiResult};
use serde::{Deserialize, Serialize};

/// Role hierarchy; stored as lowercase text on the usuarios row
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rol {
    /// Carga y consulta denuncias
    Operador,
    /// Supervisa el trabajo de su departamento
    Supervisor,
    /// Acceso total, administra usuarios
    Admin,
}

impl Rol {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rol::Operador => "operador",
            Rol::Supervisor => "supervisor",
            Rol::Admin => "admin",
        }
    }

    pub fn from_str(s: &str) -> ApiResult<Self> {
        match s.to_lowercase().as_str() {
            "operador" => Ok(Rol::Operador),
            "supervisor" => Ok(Rol::Supervisor),
            "admin" => Ok(Rol::Admin),
            _ => Err(ApiError::Validation(format!("Rol inválido: {}", s))),
        }
    }

    /// Check if this role can perform actions requiring another role
    pub fn puede_actuar_como(&self, requerido: Rol) -> bool {
        self >= &requerido
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jerarquia_de_roles() {
        assert!(Rol::Admin > Rol::Supervisor);
        assert!(Rol::Supervisor > Rol::Operador);

        assert!(Rol::Admin.puede_actuar_como(Rol::Supervisor));
        assert!(Rol::Admin.puede_actuar_como(Rol::Operador));
        assert!(Rol::Supervisor.puede_actuar_como(Rol::Operador));

        assert!(!Rol::Operador.puede_actuar_como(Rol::Supervisor));
        assert!(!Rol::Supervisor.puede_actuar_como(Rol::Admin));
    }

    #[test]
    fn test_rol_from_str() {
        assert_eq!(Rol::from_str("operador").unwrap(), Rol::Operador);
        assert_eq!(Rol::from_str("supervisor").unwrap(), Rol::Supervisor);
        assert_eq!(Rol::from_str("admin").unwrap(), Rol::Admin);
        assert_eq!(Rol::from_str("ADMIN").unwrap(), Rol::Admin);

        assert!(Rol::from_str("jefe").is_err());
    }
}
