//! DTOs del ciclo de alquiler
//!
//! El submit llega desde el cliente móvil con los datos de contacto
//! completos; el cliente se resuelve por email único en el engine.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::{RentalRequest, RentalTransaction};

/// Datos de contacto del cliente que acompañan a la solicitud
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CustomerData {
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,

    #[validate(length(min = 1, max = 100))]
    pub last_name: String,

    #[validate(email)]
    pub email: String,

    #[validate(length(min = 7, max = 20))]
    pub phone: String,

    #[validate(length(min = 1, max = 255))]
    pub address: String,

    #[validate(length(min = 1, max = 50))]
    pub license_number: String,
}

/// Request de solicitud de alquiler (API móvil)
#[derive(Debug, Deserialize, Validate)]
pub struct SubmitRentalRequest {
    pub car_id: Uuid,

    #[validate]
    pub customer_data: CustomerData,

    pub pickup_date: NaiveDate,
    pub return_date: NaiveDate,
}

/// Response de creación de solicitud
#[derive(Debug, Serialize)]
pub struct SubmitRentalResponse {
    pub request_id: Uuid,
}

/// Response de solicitud de alquiler
#[derive(Debug, Serialize)]
pub struct RentalRequestResponse {
    pub id: Uuid,
    pub car_id: Uuid,
    pub customer_id: Uuid,
    pub pickup_date: NaiveDate,
    pub return_date: NaiveDate,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl From<RentalRequest> for RentalRequestResponse {
    fn from(request: RentalRequest) -> Self {
        Self {
            id: request.id,
            car_id: request.car_id,
            customer_id: request.customer_id,
            pickup_date: request.pickup_date,
            return_date: request.return_date,
            status: request.status,
            created_at: request.created_at,
        }
    }
}

/// Response de aprobación: la transacción creada y el nuevo estado
/// del coche
#[derive(Debug, Serialize)]
pub struct ApproveRentalResponse {
    pub transaction_id: Uuid,
    pub total_cost: Decimal,
    pub car_status: String,
}

/// Response de transacción de alquiler
#[derive(Debug, Serialize)]
pub struct RentalTransactionResponse {
    pub id: Uuid,
    pub car_id: Uuid,
    pub customer_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_cost: Decimal,
    pub status: String,
}

impl From<RentalTransaction> for RentalTransactionResponse {
    fn from(transaction: RentalTransaction) -> Self {
        Self {
            id: transaction.id,
            car_id: transaction.car_id,
            customer_id: transaction.customer_id,
            start_date: transaction.start_date,
            end_date: transaction.end_date,
            total_cost: transaction.total_cost,
            status: transaction.status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_customer_data() -> CustomerData {
        CustomerData {
            first_name: "Ana".to_string(),
            last_name: "Reyes".to_string(),
            email: "ana@example.com".to_string(),
            phone: "09171234567".to_string(),
            address: "123 Main St".to_string(),
            license_number: "D01-23-456789".to_string(),
        }
    }

    #[test]
    fn test_valid_submit_request() {
        let request = SubmitRentalRequest {
            car_id: Uuid::new_v4(),
            customer_data: valid_customer_data(),
            pickup_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            return_date: NaiveDate::from_ymd_opt(2024, 1, 4).unwrap(),
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_nested_customer_validation_is_enforced() {
        let mut customer_data = valid_customer_data();
        customer_data.email = "broken".to_string();
        let request = SubmitRentalRequest {
            car_id: Uuid::new_v4(),
            customer_data,
            pickup_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            return_date: NaiveDate::from_ymd_opt(2024, 1, 4).unwrap(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_rejects_missing_required_fields() {
        let mut customer_data = valid_customer_data();
        customer_data.license_number = String::new();
        let request = SubmitRentalRequest {
            car_id: Uuid::new_v4(),
            customer_data,
            pickup_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            return_date: NaiveDate::from_ymd_opt(2024, 1, 4).unwrap(),
        };
        assert!(request.validate().is_err());
    }
}
