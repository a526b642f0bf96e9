use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Notification;
use crate::utils::errors::{AppError, AppResult};

pub struct NotificationRepository {
    pool: PgPool,
}

impl NotificationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Notificaciones de un cliente, las más recientes primero
    pub async fn find_for_customer(&self, customer_id: Uuid) -> AppResult<Vec<Notification>> {
        let notifications = sqlx::query_as::<_, Notification>(
            "SELECT * FROM notifications WHERE customer_id = $1 ORDER BY created_at DESC",
        )
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(notifications)
    }

    /// Marca como leída. Falla con Forbidden si la notificación no
    /// pertenece al cliente indicado.
    pub async fn mark_as_read(&self, id: Uuid, customer_id: Uuid) -> AppResult<Notification> {
        let notification =
            sqlx::query_as::<_, Notification>("SELECT * FROM notifications WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?
                .ok_or_else(|| AppError::NotFound("Notification not found".to_string()))?;

        if notification.customer_id != customer_id {
            return Err(AppError::Forbidden(
                "Notification does not belong to this customer".to_string(),
            ));
        }

        let notification = sqlx::query_as::<_, Notification>(
            "UPDATE notifications SET is_read = TRUE WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(notification)
    }
}
