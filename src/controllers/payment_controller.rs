//! Controller de pagos
//!
//! El pago es solo un asiento del libro mayor contra una transacción
//! existente; no hay captura real ni lógica de saldos.

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::payment_dto::{PaymentResponse, SubmitPaymentRequest};
use crate::dto::ApiResponse;
use crate::repositories::payment_repository::PaymentRepository;
use crate::repositories::rental_transaction_repository::RentalTransactionRepository;
use crate::utils::errors::{AppError, AppResult};

pub struct PaymentController {
    payments: PaymentRepository,
    transactions: RentalTransactionRepository,
}

impl PaymentController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            payments: PaymentRepository::new(pool.clone()),
            transactions: RentalTransactionRepository::new(pool),
        }
    }

    pub async fn submit(
        &self,
        request: SubmitPaymentRequest,
    ) -> AppResult<ApiResponse<PaymentResponse>> {
        request.validate()?;

        let transaction = self
            .transactions
            .find_by_id(request.transaction_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "Rental transaction with id '{}' not found",
                    request.transaction_id
                ))
            })?;

        let payment_date = request
            .payment_date
            .unwrap_or_else(|| Utc::now().date_naive());

        let payment = self
            .payments
            .create(transaction.id, request.amount_paid, payment_date, request.method)
            .await?;

        log::info!(
            "Payment {} of {} recorded against transaction {}",
            payment.id,
            payment.amount_paid,
            transaction.id
        );

        Ok(ApiResponse::success_with_message(
            PaymentResponse::from(payment),
            "Payment recorded successfully".to_string(),
        ))
    }

    pub async fn list_for_transaction(
        &self,
        transaction_id: Uuid,
    ) -> AppResult<Vec<PaymentResponse>> {
        let transaction = self
            .transactions
            .find_by_id(transaction_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "Rental transaction with id '{}' not found",
                    transaction_id
                ))
            })?;

        let payments = self.payments.find_by_transaction(transaction.id).await?;
        Ok(payments.into_iter().map(PaymentResponse::from).collect())
    }
}
