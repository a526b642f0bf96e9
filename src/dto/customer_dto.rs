//! DTOs de Customer

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::Customer;

/// Request de registro de cliente (API móvil)
#[derive(Debug, Deserialize, Validate)]
pub struct SignupCustomerRequest {
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,

    #[validate(length(min = 1, max = 100))]
    pub last_name: String,

    #[validate(email)]
    pub email: String,

    #[validate(length(min = 8, max = 255))]
    pub password: String,

    #[validate(length(min = 7, max = 20))]
    pub phone: String,

    #[validate(length(min = 1, max = 255))]
    pub address: String,

    #[validate(length(min = 1, max = 50))]
    pub license_number: String,
}

/// Response de cliente (sin password)
#[derive(Debug, Serialize)]
pub struct CustomerResponse {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub license_number: String,
}

impl From<Customer> for CustomerResponse {
    fn from(customer: Customer) -> Self {
        Self {
            id: customer.id,
            first_name: customer.first_name,
            last_name: customer.last_name,
            email: customer.email,
            phone: customer.phone,
            address: customer.address,
            license_number: customer.license_number,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_invalid_email() {
        let request = SignupCustomerRequest {
            first_name: "Ana".to_string(),
            last_name: "Reyes".to_string(),
            email: "not-an-email".to_string(),
            password: "supersecret".to_string(),
            phone: "09171234567".to_string(),
            address: "123 Main St".to_string(),
            license_number: "D01-23-456789".to_string(),
        };
        assert!(request.validate().is_err());
    }
}
