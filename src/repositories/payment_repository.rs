use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Payment;
use crate::utils::errors::AppResult;

pub struct PaymentRepository {
    pool: PgPool,
}

impl PaymentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserta una fila del libro mayor. Append-only: no hay update ni
    /// delete de pagos.
    pub async fn create(
        &self,
        transaction_id: Uuid,
        amount_paid: Decimal,
        payment_date: NaiveDate,
        method: String,
    ) -> AppResult<Payment> {
        let payment = sqlx::query_as::<_, Payment>(
            r#"
            INSERT INTO payments (id, transaction_id, amount_paid, payment_date, method)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(transaction_id)
        .bind(amount_paid)
        .bind(payment_date)
        .bind(method)
        .fetch_one(&self.pool)
        .await?;

        Ok(payment)
    }

    pub async fn find_by_transaction(&self, transaction_id: Uuid) -> AppResult<Vec<Payment>> {
        let payments = sqlx::query_as::<_, Payment>(
            "SELECT * FROM payments WHERE transaction_id = $1 ORDER BY payment_date ASC",
        )
        .bind(transaction_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(payments)
    }
}
