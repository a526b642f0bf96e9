//! Modelo de RentalTransaction
//!
//! Una transacción solo nace de una aprobación. Como máximo una
//! transacción ONGOING puede existir por coche.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::utils::errors::{AppError, AppResult};

/// Estado de la transacción. La fuente escribía 'Ongoing' y 'ONGOING'
/// según la versión; aquí una sola forma canónica en mayúsculas y
/// parseo case-insensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionStatus {
    Ongoing,
    Completed,
    Cancelled,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Ongoing => "ONGOING",
            TransactionStatus::Completed => "COMPLETED",
            TransactionStatus::Cancelled => "CANCELLED",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "ongoing" => Some(TransactionStatus::Ongoing),
            "completed" => Some(TransactionStatus::Completed),
            "cancelled" => Some(TransactionStatus::Cancelled),
            _ => None,
        }
    }
}

impl std::fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// RentalTransaction - mapea exactamente a la tabla rental_transactions
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RentalTransaction {
    pub id: Uuid,
    pub car_id: Uuid,
    pub customer_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_cost: Decimal,
    pub status: String,
}

impl RentalTransaction {
    pub fn transaction_status(&self) -> AppResult<TransactionStatus> {
        TransactionStatus::parse(&self.status).ok_or_else(|| {
            AppError::Internal(format!("unknown transaction status '{}'", self.status))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_handles_legacy_mixed_case() {
        // Datos históricos escritos como 'Ongoing'/'Completed'
        assert_eq!(TransactionStatus::parse("Ongoing"), Some(TransactionStatus::Ongoing));
        assert_eq!(TransactionStatus::parse("ONGOING"), Some(TransactionStatus::Ongoing));
        assert_eq!(TransactionStatus::parse("Completed"), Some(TransactionStatus::Completed));
        assert_eq!(TransactionStatus::parse("COMPLETED"), Some(TransactionStatus::Completed));
    }

    #[test]
    fn test_canonical_form_is_uppercase() {
        assert_eq!(TransactionStatus::Ongoing.as_str(), "ONGOING");
        assert_eq!(TransactionStatus::Completed.as_str(), "COMPLETED");
        assert_eq!(TransactionStatus::Cancelled.as_str(), "CANCELLED");
    }
}
