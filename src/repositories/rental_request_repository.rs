use sqlx::PgPool;

use crate::models::{RentalRequest, RequestStatus};
use crate::utils::errors::AppResult;

pub struct RentalRequestRepository {
    pool: PgPool,
}

impl RentalRequestRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Worklist de staff: solicitudes pendientes, las de pickup más
    /// próximo primero.
    pub async fn find_pending(&self) -> AppResult<Vec<RentalRequest>> {
        let requests = sqlx::query_as::<_, RentalRequest>(
            "SELECT * FROM rental_requests WHERE status = $1 ORDER BY pickup_date ASC",
        )
        .bind(RequestStatus::Pending.as_str())
        .fetch_all(&self.pool)
        .await?;

        Ok(requests)
    }
}
