//! Modelo de RentalRequest
//!
//! Una solicitud la crea el cliente y solo la muta la decisión del
//! staff. Una vez APPROVED/REJECTED/CANCELLED el estado es terminal.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::utils::errors::{AppError, AppResult};

/// Estado de la solicitud de alquiler. Forma canónica en mayúsculas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
    Cancelled,
    Completed,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "PENDING",
            RequestStatus::Approved => "APPROVED",
            RequestStatus::Rejected => "REJECTED",
            RequestStatus::Cancelled => "CANCELLED",
            RequestStatus::Completed => "COMPLETED",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pending" => Some(RequestStatus::Pending),
            "approved" => Some(RequestStatus::Approved),
            "rejected" => Some(RequestStatus::Rejected),
            "cancelled" => Some(RequestStatus::Cancelled),
            "completed" => Some(RequestStatus::Completed),
            _ => None,
        }
    }

    /// Solo una solicitud PENDING admite decisión de staff
    pub fn is_decidable(&self) -> bool {
        matches!(self, RequestStatus::Pending)
    }

    /// APPROVED/REJECTED/CANCELLED son terminales
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            RequestStatus::Approved | RequestStatus::Rejected | RequestStatus::Cancelled
        )
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// RentalRequest - mapea exactamente a la tabla rental_requests
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RentalRequest {
    pub id: Uuid,
    pub car_id: Uuid,
    pub customer_id: Uuid,
    pub pickup_date: NaiveDate,
    pub return_date: NaiveDate,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl RentalRequest {
    pub fn request_status(&self) -> AppResult<RequestStatus> {
        RequestStatus::parse(&self.status)
            .ok_or_else(|| AppError::Internal(format!("unknown request status '{}'", self.status)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_pending_is_decidable() {
        assert!(RequestStatus::Pending.is_decidable());
        assert!(!RequestStatus::Approved.is_decidable());
        assert!(!RequestStatus::Rejected.is_decidable());
        assert!(!RequestStatus::Cancelled.is_decidable());
        assert!(!RequestStatus::Completed.is_decidable());
    }

    #[test]
    fn test_terminal_states() {
        assert!(RequestStatus::Approved.is_terminal());
        assert!(RequestStatus::Rejected.is_terminal());
        assert!(RequestStatus::Cancelled.is_terminal());
        assert!(!RequestStatus::Pending.is_terminal());
    }

    #[test]
    fn test_parse_accepts_any_casing() {
        assert_eq!(RequestStatus::parse("PENDING"), Some(RequestStatus::Pending));
        assert_eq!(RequestStatus::parse("pending"), Some(RequestStatus::Pending));
        assert_eq!(RequestStatus::parse("Approved"), Some(RequestStatus::Approved));
        assert_eq!(RequestStatus::parse("nope"), None);
    }

    #[test]
    fn test_canonical_form_is_uppercase() {
        assert_eq!(RequestStatus::Pending.as_str(), "PENDING");
        assert_eq!(RequestStatus::Approved.as_str(), "APPROVED");
    }
}
