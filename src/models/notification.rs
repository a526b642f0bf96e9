//! Modelo de Notification
//!
//! Canal lateral del ciclo de vida: los eventos de solicitud se
//! persisten como mensajes leído/no-leído, ordenados del más reciente
//! al más antiguo.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Notification - mapea exactamente a la tabla notifications
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Notification {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub request_id: Uuid,
    pub title: String,
    pub message: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}
