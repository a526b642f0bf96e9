//! Modelo de Payment
//!
//! Filas append-only contra una transacción. No hay lógica de pasarela
//! ni de saldos; el pago es solo un registro del libro mayor.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Payment - mapea exactamente a la tabla payments
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Payment {
    pub id: Uuid,
    pub transaction_id: Uuid,
    pub amount_paid: Decimal,
    pub payment_date: NaiveDate,
    pub method: String,
}
