//! DTOs de Car

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::Car;
use crate::utils::validation::{validate_plate_number, validate_positive_decimal};

/// Request para crear un nuevo coche
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCarRequest {
    #[validate(length(min = 1, max = 100))]
    pub brand: String,

    #[validate(length(min = 1, max = 100))]
    pub model: String,

    #[validate(range(min = 1900, max = 2100))]
    pub year: i32,

    #[validate(custom = "validate_plate_number")]
    pub plate_number: String,

    /// sedan, suv, van, etc.
    #[validate(length(min = 1, max = 50))]
    pub car_type: String,

    #[validate(custom = "validate_positive_decimal")]
    pub rental_rate_per_day: Decimal,

    pub image_url: Option<String>,
}

/// Request para actualizar un coche existente
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCarRequest {
    #[validate(length(min = 1, max = 100))]
    pub brand: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub model: Option<String>,

    #[validate(range(min = 1900, max = 2100))]
    pub year: Option<i32>,

    #[validate(custom = "validate_plate_number")]
    pub plate_number: Option<String>,

    #[validate(length(min = 1, max = 50))]
    pub car_type: Option<String>,

    /// Available / Rented / Maintenance; se valida contra CarStatus
    pub status: Option<String>,

    #[validate(custom = "validate_positive_decimal")]
    pub rental_rate_per_day: Option<Decimal>,

    pub image_url: Option<String>,
}

/// Filtros para el listado de coches (API móvil)
#[derive(Debug, Deserialize)]
pub struct CarFilters {
    pub status: Option<String>,
}

/// Response de coche para la API
#[derive(Debug, Serialize)]
pub struct CarResponse {
    pub id: Uuid,
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub plate_number: String,
    pub car_type: String,
    pub status: String,
    pub rental_rate_per_day: Decimal,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Car> for CarResponse {
    fn from(car: Car) -> Self {
        Self {
            id: car.id,
            brand: car.brand,
            model: car.model,
            year: car.year,
            plate_number: car.plate_number,
            car_type: car.car_type,
            status: car.status,
            rental_rate_per_day: car.rental_rate_per_day,
            image_url: car.image_url,
            created_at: car.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> CreateCarRequest {
        CreateCarRequest {
            brand: "Toyota".to_string(),
            model: "Vios".to_string(),
            year: 2022,
            plate_number: "ABC-1234".to_string(),
            car_type: "sedan".to_string(),
            rental_rate_per_day: Decimal::new(4999, 2),
            image_url: None,
        }
    }

    #[test]
    fn test_valid_create_request() {
        assert!(valid_request().validate().is_ok());
    }

    #[test]
    fn test_rejects_empty_brand() {
        let mut request = valid_request();
        request.brand = String::new();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_rejects_non_positive_rate() {
        let mut request = valid_request();
        request.rental_rate_per_day = Decimal::ZERO;
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_plate() {
        let mut request = valid_request();
        request.plate_number = "A".to_string();
        assert!(request.validate().is_err());
    }
}
