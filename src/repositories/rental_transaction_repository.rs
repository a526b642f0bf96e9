use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{RentalTransaction, TransactionStatus};
use crate::utils::errors::AppResult;

pub struct RentalTransactionRepository {
    pool: PgPool,
}

impl RentalTransactionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<RentalTransaction>> {
        let transaction = sqlx::query_as::<_, RentalTransaction>(
            "SELECT * FROM rental_transactions WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(transaction)
    }

    /// Cierto si el coche tiene una transacción ONGOING que lo
    /// referencia. Usado por el CRUD de coches para impedir cambios
    /// manuales de estado que contradigan al ciclo de alquiler.
    pub async fn has_ongoing_for_car(&self, car_id: Uuid) -> AppResult<bool> {
        let (exists,): (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM rental_transactions WHERE car_id = $1 AND status = $2)",
        )
        .bind(car_id)
        .bind(TransactionStatus::Ongoing.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    /// Worklist de staff: alquileres en curso, los que vencen antes
    /// primero.
    pub async fn find_active(&self) -> AppResult<Vec<RentalTransaction>> {
        let transactions = sqlx::query_as::<_, RentalTransaction>(
            "SELECT * FROM rental_transactions WHERE status = $1 ORDER BY end_date ASC",
        )
        .bind(TransactionStatus::Ongoing.as_str())
        .fetch_all(&self.pool)
        .await?;

        Ok(transactions)
    }

}
