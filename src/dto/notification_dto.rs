//! DTOs de Notification

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::Notification;

/// Request para marcar una notificación como leída. El customer_id
/// debe coincidir con el dueño de la notificación.
#[derive(Debug, Deserialize)]
pub struct MarkReadRequest {
    pub customer_id: Uuid,
}

/// Response de notificación
#[derive(Debug, Serialize)]
pub struct NotificationResponse {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub request_id: Uuid,
    pub title: String,
    pub message: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Notification> for NotificationResponse {
    fn from(notification: Notification) -> Self {
        Self {
            id: notification.id,
            customer_id: notification.customer_id,
            request_id: notification.request_id,
            title: notification.title,
            message: notification.message,
            is_read: notification.is_read,
            created_at: notification.created_at,
        }
    }
}
