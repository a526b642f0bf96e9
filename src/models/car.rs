//! Modelo de Car
//!
//! Este módulo contiene el struct Car y su enum de estado.
//! Mapea exactamente al schema PostgreSQL con primary key 'id'.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::utils::errors::{AppError, AppResult};

/// Estado del coche. `status` es la única fuente de verdad de
/// disponibilidad: nunca `Rented` sin exactamente una transacción
/// ONGOING que referencie el coche.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CarStatus {
    Available,
    Rented,
    Maintenance,
}

impl CarStatus {
    /// Forma canónica persistida en la base de datos
    pub fn as_str(&self) -> &'static str {
        match self {
            CarStatus::Available => "Available",
            CarStatus::Rented => "Rented",
            CarStatus::Maintenance => "Maintenance",
        }
    }

    /// Parseo case-insensitive. La fuente mezclaba vocabularios de
    /// estado; aquí se normaliza a una sola forma canónica.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "available" => Some(CarStatus::Available),
            "rented" => Some(CarStatus::Rented),
            "maintenance" => Some(CarStatus::Maintenance),
            _ => None,
        }
    }
}

impl std::fmt::Display for CarStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Car principal - mapea exactamente a la tabla cars
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Car {
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

impl Car {
    /// Estado tipado del coche; una fila con estado desconocido es un
    /// error interno, no un valor por defecto.
    pub fn car_status(&self) -> AppResult<CarStatus> {
        CarStatus::parse(&self.status)
            .ok_or_else(|| AppError::Internal(format!("unknown car status '{}'", self.status)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(CarStatus::parse("available"), Some(CarStatus::Available));
        assert_eq!(CarStatus::parse("RENTED"), Some(CarStatus::Rented));
        assert_eq!(CarStatus::parse(" Maintenance "), Some(CarStatus::Maintenance));
        assert_eq!(CarStatus::parse("scrapped"), None);
    }

    #[test]
    fn test_canonical_form_round_trips() {
        for status in [CarStatus::Available, CarStatus::Rented, CarStatus::Maintenance] {
            assert_eq!(CarStatus::parse(status.as_str()), Some(status));
        }
    }
}
