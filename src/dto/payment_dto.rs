//! DTOs de Payment

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::Payment;
use crate::utils::validation::{validate_payment_method, validate_positive_decimal};

/// Request para registrar un pago contra una transacción
#[derive(Debug, Deserialize, Validate)]
pub struct SubmitPaymentRequest {
    pub transaction_id: Uuid,

    #[validate(custom = "validate_positive_decimal")]
    pub amount_paid: Decimal,

    /// Cash, GCash, Card, etc.
    #[validate(custom = "validate_payment_method")]
    pub method: String,

    /// Fecha del pago; si falta se usa la fecha actual
    pub payment_date: Option<NaiveDate>,
}

/// Response de pago
#[derive(Debug, Serialize)]
pub struct PaymentResponse {
    pub id: Uuid,
    pub transaction_id: Uuid,
    pub amount_paid: Decimal,
    pub payment_date: NaiveDate,
    pub method: String,
}

impl From<Payment> for PaymentResponse {
    fn from(payment: Payment) -> Self {
        Self {
            id: payment.id,
            transaction_id: payment.transaction_id,
            amount_paid: payment.amount_paid,
            payment_date: payment.payment_date,
            method: payment.method,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_zero_amount() {
        let request = SubmitPaymentRequest {
            transaction_id: Uuid::new_v4(),
            amount_paid: Decimal::ZERO,
            method: "Cash".to_string(),
            payment_date: None,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_accepts_valid_payment() {
        let request = SubmitPaymentRequest {
            transaction_id: Uuid::new_v4(),
            amount_paid: Decimal::new(14997, 2),
            method: "GCash".to_string(),
            payment_date: NaiveDate::from_ymd_opt(2024, 1, 4),
        };
        assert!(request.validate().is_ok());
    }
}
