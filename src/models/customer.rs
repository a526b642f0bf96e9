//! Modelo de Customer

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Credencial placeholder asignada cuando el cliente se crea desde una
/// solicitud de alquiler en lugar de un registro explícito.
/// NOTA: la credencial se guarda en texto plano, igual que en el
/// sistema original. Inseguro a propósito; queda señalado, no
/// corregido aquí.
pub const PLACEHOLDER_PASSWORD: &str = "changepassword123";

/// Customer - mapea exactamente a la tabla customers
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Customer {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub phone: String,
    pub address: String,
    pub license_number: String,
}

impl Customer {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_name() {
        let customer = Customer {
            id: Uuid::new_v4(),
            first_name: "Ana".to_string(),
            last_name: "Reyes".to_string(),
            email: "ana@example.com".to_string(),
            password: PLACEHOLDER_PASSWORD.to_string(),
            phone: "09171234567".to_string(),
            address: "123 Main St".to_string(),
            license_number: "D01-23-456789".to_string(),
        };
        assert_eq!(customer.full_name(), "Ana Reyes");
    }
}
