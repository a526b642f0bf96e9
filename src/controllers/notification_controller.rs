//! Controller del sink de notificaciones

use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::notification_dto::NotificationResponse;
use crate::repositories::notification_repository::NotificationRepository;
use crate::utils::errors::AppResult;

pub struct NotificationController {
    repository: NotificationRepository,
}

impl NotificationController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: NotificationRepository::new(pool),
        }
    }

    /// Notificaciones del cliente, las más recientes primero
    pub async fn list_for_customer(
        &self,
        customer_id: Uuid,
    ) -> AppResult<Vec<NotificationResponse>> {
        let notifications = self.repository.find_for_customer(customer_id).await?;
        Ok(notifications
            .into_iter()
            .map(NotificationResponse::from)
            .collect())
    }

    /// Marca como leída; Forbidden si el cliente no es el dueño
    pub async fn mark_as_read(
        &self,
        notification_id: Uuid,
        customer_id: Uuid,
    ) -> AppResult<NotificationResponse> {
        let notification = self
            .repository
            .mark_as_read(notification_id, customer_id)
            .await?;
        Ok(NotificationResponse::from(notification))
    }
}
