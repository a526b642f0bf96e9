//! Engine del ciclo de alquiler
//!
//! Máquina de estados sobre la tríada {RentalRequest, RentalTransaction,
//! Car.status}. Cada operación es una unidad de trabajo serializable:
//! las precondiciones se leen con `SELECT ... FOR UPDATE` y las tres
//! mutaciones de una aprobación (solicitud, transacción, coche) se
//! confirman o se revierten juntas. Dos approve concurrentes sobre la
//! misma solicitud serializan por la fila; el perdedor observa
//! InvalidState.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::rental_dto::{
    ApproveRentalResponse, RentalRequestResponse, RentalTransactionResponse,
    SubmitRentalRequest, SubmitRentalResponse,
};
use crate::models::{
    customer::PLACEHOLDER_PASSWORD, Car, CarStatus, Customer, RentalRequest, RentalTransaction,
    RequestStatus, TransactionStatus,
};
use crate::repositories::rental_request_repository::RentalRequestRepository;
use crate::repositories::rental_transaction_repository::RentalTransactionRepository;
use crate::utils::errors::{invalid_state_error, AppError, AppResult};

const UNIQUE_VIOLATION: &str = "23505";

/// Duración del alquiler en días completos. Una duración no positiva
/// es un error tipado que se reporta al caller; la fuente original lo
/// tragaba con un log y un redirect, lo cual era un bug.
pub fn rental_duration_days(pickup_date: NaiveDate, return_date: NaiveDate) -> AppResult<i64> {
    let days = (return_date - pickup_date).num_days();
    if days <= 0 {
        return Err(AppError::Computation(format!(
            "rental duration must be positive: pickup {} to return {} is {} days",
            pickup_date, return_date, days
        )));
    }
    Ok(days)
}

/// total_cost = días × tarifa diaria, en aritmética decimal exacta
pub fn compute_total_cost(rate_per_day: Decimal, days: i64) -> AppResult<Decimal> {
    if rate_per_day <= Decimal::ZERO {
        return Err(AppError::Computation(format!(
            "rental rate must be positive, got {}",
            rate_per_day
        )));
    }
    Ok(rate_per_day * Decimal::from(days))
}

/// Decisión de aprobación ya validada: duración y coste de la
/// transacción a crear.
#[derive(Debug, PartialEq)]
pub struct ApprovalPlan {
    pub days: i64,
    pub total_cost: Decimal,
}

/// Precondiciones de Approve, separadas del I/O:
/// - la solicitud debe seguir PENDING;
/// - el coche debe estar Available (aprobar sobre Rented o
///   Maintenance doble-reservaría);
/// - Car.status es un cache desnormalizado de las transacciones
///   ONGOING; si está Available pero existe una ONGOING, mejor abortar
///   que agravar la inconsistencia;
/// - la duración y la tarifa deben producir un coste válido.
pub fn plan_approval(
    request_status: RequestStatus,
    car_status: CarStatus,
    ongoing_count: i64,
    pickup_date: NaiveDate,
    return_date: NaiveDate,
    rate_per_day: Decimal,
) -> AppResult<ApprovalPlan> {
    if !request_status.is_decidable() {
        return Err(invalid_state_error(
            "RentalRequest",
            RequestStatus::Pending.as_str(),
            request_status.as_str(),
        ));
    }

    if car_status != CarStatus::Available {
        return Err(invalid_state_error(
            "Car",
            CarStatus::Available.as_str(),
            car_status.as_str(),
        ));
    }

    if ongoing_count > 0 {
        return Err(AppError::Internal(format!(
            "car is marked Available but has {} ongoing transactions",
            ongoing_count
        )));
    }

    let days = rental_duration_days(pickup_date, return_date)?;
    let total_cost = compute_total_cost(rate_per_day, days)?;

    Ok(ApprovalPlan { days, total_cost })
}

/// Precondición de Complete: solo una transacción ONGOING se completa
pub fn ensure_completable(status: TransactionStatus) -> AppResult<()> {
    if status != TransactionStatus::Ongoing {
        return Err(invalid_state_error(
            "RentalTransaction",
            TransactionStatus::Ongoing.as_str(),
            status.as_str(),
        ));
    }
    Ok(())
}

/// Mensaje de conflicto para el alta de cliente en Submit. El mismo
/// código 23505 puede venir de la unicidad de email (un submit
/// concurrente con el mismo email) o de la de license_number; el
/// nombre del constraint distingue cuál.
fn customer_conflict_message(constraint: Option<&str>, email: &str, license_number: &str) -> String {
    match constraint {
        Some(name) if name.contains("email") => {
            format!("Email '{}' is already registered", email)
        }
        Some(name) if name.contains("license") => format!(
            "License number '{}' is already registered to another customer",
            license_number
        ),
        _ => format!(
            "Customer with email '{}' or license number '{}' already exists",
            email, license_number
        ),
    }
}

pub struct RentalController {
    pool: PgPool,
}

impl RentalController {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Submit: crea una solicitud PENDING. Resuelve el cliente por
    /// email único (actualiza campos de contacto si existe, crea con
    /// credencial placeholder si no) y el coche por id. Sin efecto
    /// sobre Car.status: un coche puede acumular solicitudes
    /// pendientes.
    pub async fn submit(&self, request: SubmitRentalRequest) -> AppResult<SubmitRentalResponse> {
        request.validate()?;

        let mut tx = self.pool.begin().await?;

        let car = sqlx::query_as::<_, Car>("SELECT * FROM cars WHERE id = $1")
            .bind(request.car_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Car with id '{}' not found", request.car_id))
            })?;

        let data = &request.customer_data;
        let existing =
            sqlx::query_as::<_, Customer>("SELECT * FROM customers WHERE email = $1")
                .bind(&data.email)
                .fetch_optional(&mut *tx)
                .await?;

        let customer = match existing {
            Some(customer) => {
                // Mismo email: se actualizan los campos mutables en vez
                // de duplicar. license_number es único y no se toca.
                sqlx::query_as::<_, Customer>(
                    r#"
                    UPDATE customers
                    SET first_name = $2, last_name = $3, phone = $4, address = $5
                    WHERE id = $1
                    RETURNING *
                    "#,
                )
                .bind(customer.id)
                .bind(&data.first_name)
                .bind(&data.last_name)
                .bind(&data.phone)
                .bind(&data.address)
                .fetch_one(&mut *tx)
                .await?
            }
            None => sqlx::query_as::<_, Customer>(
                r#"
                INSERT INTO customers (id, first_name, last_name, email, password, phone, address, license_number)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                RETURNING *
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(&data.first_name)
            .bind(&data.last_name)
            .bind(&data.email)
            .bind(PLACEHOLDER_PASSWORD)
            .bind(&data.phone)
            .bind(&data.address)
            .bind(&data.license_number)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| match &e {
                sqlx::Error::Database(db) if db.code().as_deref() == Some(UNIQUE_VIOLATION) => {
                    AppError::Conflict(customer_conflict_message(
                        db.constraint(),
                        &data.email,
                        &data.license_number,
                    ))
                }
                _ => AppError::Database(e),
            })?,
        };

        let rental_request = sqlx::query_as::<_, RentalRequest>(
            r#"
            INSERT INTO rental_requests (id, car_id, customer_id, pickup_date, return_date, status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(car.id)
        .bind(customer.id)
        .bind(request.pickup_date)
        .bind(request.return_date)
        .bind(RequestStatus::Pending.as_str())
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await?;

        self.notify(
            &mut tx,
            customer.id,
            rental_request.id,
            "Rental request submitted",
            &format!(
                "Hi {}, your rental request for {} {} ({}) from {} to {} is pending review.",
                customer.full_name(),
                car.brand,
                car.model,
                car.plate_number,
                request.pickup_date,
                request.return_date
            ),
        )
        .await?;

        tx.commit().await?;

        log::info!(
            "Rental request {} submitted for car {} by customer {}",
            rental_request.id,
            car.id,
            customer.id
        );

        Ok(SubmitRentalResponse {
            request_id: rental_request.id,
        })
    }

    /// Approve: PENDING → APPROVED + transacción ONGOING + coche Rented,
    /// las tres mutaciones en una unidad atómica.
    pub async fn approve(&self, request_id: Uuid) -> AppResult<ApproveRentalResponse> {
        let mut tx = self.pool.begin().await?;

        let request = sqlx::query_as::<_, RentalRequest>(
            "SELECT * FROM rental_requests WHERE id = $1 FOR UPDATE",
        )
        .bind(request_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("Rental request with id '{}' not found", request_id))
        })?;

        // El coche se bloquea también: approve y complete sobre el
        // mismo coche serializan por esta fila.
        let car = sqlx::query_as::<_, Car>("SELECT * FROM cars WHERE id = $1 FOR UPDATE")
            .bind(request.car_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Car with id '{}' not found", request.car_id))
            })?;

        let (ongoing_count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM rental_transactions WHERE car_id = $1 AND status = $2",
        )
        .bind(car.id)
        .bind(TransactionStatus::Ongoing.as_str())
        .fetch_one(&mut *tx)
        .await?;

        // Un error aquí revierte la transacción: la solicitud queda
        // PENDING y ni transacción ni coche se tocan.
        let plan = plan_approval(
            request.request_status()?,
            car.car_status()?,
            ongoing_count,
            request.pickup_date,
            request.return_date,
            car.rental_rate_per_day,
        )?;
        let total_cost = plan.total_cost;

        sqlx::query("UPDATE rental_requests SET status = $2 WHERE id = $1")
            .bind(request.id)
            .bind(RequestStatus::Approved.as_str())
            .execute(&mut *tx)
            .await?;

        let transaction = sqlx::query_as::<_, RentalTransaction>(
            r#"
            INSERT INTO rental_transactions (id, car_id, customer_id, start_date, end_date, total_cost, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(car.id)
        .bind(request.customer_id)
        .bind(request.pickup_date)
        .bind(request.return_date)
        .bind(total_cost)
        .bind(TransactionStatus::Ongoing.as_str())
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("UPDATE cars SET status = $2 WHERE id = $1")
            .bind(car.id)
            .bind(CarStatus::Rented.as_str())
            .execute(&mut *tx)
            .await?;

        self.notify(
            &mut tx,
            request.customer_id,
            request.id,
            "Rental request approved",
            &format!(
                "Your rental request for {} {} ({}) was approved. Total cost: {}.",
                car.brand, car.model, car.plate_number, total_cost
            ),
        )
        .await?;

        tx.commit().await?;

        log::info!(
            "Rental request {} approved: transaction {} created, car {} rented, total cost {}",
            request.id,
            transaction.id,
            car.id,
            total_cost
        );

        Ok(ApproveRentalResponse {
            transaction_id: transaction.id,
            total_cost,
            car_status: CarStatus::Rented.as_str().to_string(),
        })
    }

    /// Reject: PENDING → REJECTED. Sin mutación de transacción ni de
    /// coche.
    pub async fn reject(&self, request_id: Uuid) -> AppResult<RentalRequestResponse> {
        let mut tx = self.pool.begin().await?;

        let request = sqlx::query_as::<_, RentalRequest>(
            "SELECT * FROM rental_requests WHERE id = $1 FOR UPDATE",
        )
        .bind(request_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("Rental request with id '{}' not found", request_id))
        })?;

        let status = request.request_status()?;
        if !status.is_decidable() {
            return Err(invalid_state_error(
                "RentalRequest",
                RequestStatus::Pending.as_str(),
                status.as_str(),
            ));
        }

        let request = sqlx::query_as::<_, RentalRequest>(
            "UPDATE rental_requests SET status = $2 WHERE id = $1 RETURNING *",
        )
        .bind(request.id)
        .bind(RequestStatus::Rejected.as_str())
        .fetch_one(&mut *tx)
        .await?;

        self.notify(
            &mut tx,
            request.customer_id,
            request.id,
            "Rental request rejected",
            "Your rental request was rejected by our staff.",
        )
        .await?;

        tx.commit().await?;

        log::info!("Rental request {} rejected", request.id);

        Ok(RentalRequestResponse::from(request))
    }

    /// Complete: transacción ONGOING → COMPLETED y su coche vuelve a
    /// Available, atómicamente.
    pub async fn complete(&self, transaction_id: Uuid) -> AppResult<RentalTransactionResponse> {
        let mut tx = self.pool.begin().await?;

        let transaction = sqlx::query_as::<_, RentalTransaction>(
            "SELECT * FROM rental_transactions WHERE id = $1 FOR UPDATE",
        )
        .bind(transaction_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "Rental transaction with id '{}' not found",
                transaction_id
            ))
        })?;

        ensure_completable(transaction.transaction_status()?)?;

        sqlx::query("SELECT id FROM cars WHERE id = $1 FOR UPDATE")
            .bind(transaction.car_id)
            .execute(&mut *tx)
            .await?;

        let transaction = sqlx::query_as::<_, RentalTransaction>(
            "UPDATE rental_transactions SET status = $2 WHERE id = $1 RETURNING *",
        )
        .bind(transaction.id)
        .bind(TransactionStatus::Completed.as_str())
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("UPDATE cars SET status = $2 WHERE id = $1")
            .bind(transaction.car_id)
            .bind(CarStatus::Available.as_str())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        log::info!(
            "Rental transaction {} completed, car {} available again",
            transaction.id,
            transaction.car_id
        );

        Ok(RentalTransactionResponse::from(transaction))
    }

    /// Proyección read-only: solicitudes pendientes por urgencia
    pub async fn list_pending(&self) -> AppResult<Vec<RentalRequestResponse>> {
        let repository = RentalRequestRepository::new(self.pool.clone());
        let requests = repository.find_pending().await?;
        Ok(requests.into_iter().map(RentalRequestResponse::from).collect())
    }

    /// Proyección read-only: alquileres en curso por fecha de fin
    pub async fn list_active(&self) -> AppResult<Vec<RentalTransactionResponse>> {
        let repository = RentalTransactionRepository::new(self.pool.clone());
        let transactions = repository.find_active().await?;
        Ok(transactions
            .into_iter()
            .map(RentalTransactionResponse::from)
            .collect())
    }

    /// Inserta la notificación dentro de la misma transacción que la
    /// mutación del ciclo de vida que la origina.
    async fn notify(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        customer_id: Uuid,
        request_id: Uuid,
        title: &str,
        message: &str,
    ) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO notifications (id, customer_id, request_id, title, message, is_read, created_at)
            VALUES ($1, $2, $3, $4, $5, FALSE, $6)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(customer_id)
        .bind(request_id)
        .bind(title)
        .bind(message)
        .bind(Utc::now())
        .execute(&mut **tx)
        .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_duration_in_whole_days() {
        assert_eq!(
            rental_duration_days(date(2024, 1, 1), date(2024, 1, 4)).unwrap(),
            3
        );
        assert_eq!(
            rental_duration_days(date(2024, 1, 1), date(2024, 1, 2)).unwrap(),
            1
        );
    }

    #[test]
    fn test_non_positive_duration_is_reported() {
        // pickup == return
        let err = rental_duration_days(date(2024, 1, 4), date(2024, 1, 4)).unwrap_err();
        assert!(matches!(err, AppError::Computation(_)));

        // pickup > return
        let err = rental_duration_days(date(2024, 1, 5), date(2024, 1, 4)).unwrap_err();
        assert!(matches!(err, AppError::Computation(_)));
    }

    #[test]
    fn test_total_cost_has_no_float_drift() {
        // 49.99 × 3 días = exactamente 149.97
        let rate: Decimal = "49.99".parse().unwrap();
        let cost = compute_total_cost(rate, 3).unwrap();
        assert_eq!(cost, "149.97".parse::<Decimal>().unwrap());
    }

    #[test]
    fn test_total_cost_scales_with_days() {
        let rate = Decimal::new(10000, 2); // 100.00
        assert_eq!(compute_total_cost(rate, 1).unwrap(), Decimal::new(10000, 2));
        assert_eq!(compute_total_cost(rate, 30).unwrap(), Decimal::new(300000, 2));
    }

    #[test]
    fn test_malformed_rate_is_reported() {
        let err = compute_total_cost(Decimal::ZERO, 3).unwrap_err();
        assert!(matches!(err, AppError::Computation(_)));

        let err = compute_total_cost(Decimal::new(-100, 2), 3).unwrap_err();
        assert!(matches!(err, AppError::Computation(_)));
    }

    fn rate() -> Decimal {
        "49.99".parse().unwrap()
    }

    #[test]
    fn test_approval_plan_for_pending_request_and_available_car() {
        let plan = plan_approval(
            RequestStatus::Pending,
            CarStatus::Available,
            0,
            date(2024, 1, 1),
            date(2024, 1, 4),
            rate(),
        )
        .unwrap();

        assert_eq!(plan.days, 3);
        assert_eq!(plan.total_cost, "149.97".parse::<Decimal>().unwrap());
    }

    #[test]
    fn test_only_pending_requests_are_approvable() {
        // Una solicitud ya decidida no se vuelve a aprobar: es el
        // estado que observa el perdedor de dos approve concurrentes.
        for status in [
            RequestStatus::Approved,
            RequestStatus::Rejected,
            RequestStatus::Cancelled,
            RequestStatus::Completed,
        ] {
            let err = plan_approval(
                status,
                CarStatus::Available,
                0,
                date(2024, 1, 1),
                date(2024, 1, 4),
                rate(),
            )
            .unwrap_err();
            assert!(matches!(err, AppError::InvalidState(_)), "{:?}", status);
        }
    }

    #[test]
    fn test_non_available_car_blocks_approval() {
        for status in [CarStatus::Rented, CarStatus::Maintenance] {
            let err = plan_approval(
                RequestStatus::Pending,
                status,
                0,
                date(2024, 1, 1),
                date(2024, 1, 4),
                rate(),
            )
            .unwrap_err();
            assert!(matches!(err, AppError::InvalidState(_)), "{:?}", status);
        }
    }

    #[test]
    fn test_status_drift_aborts_approval() {
        // Coche Available con una transacción ONGOING: inconsistencia,
        // no doble reserva
        let err = plan_approval(
            RequestStatus::Pending,
            CarStatus::Available,
            1,
            date(2024, 1, 1),
            date(2024, 1, 4),
            rate(),
        )
        .unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
    }

    #[test]
    fn test_bad_dates_abort_approval() {
        let err = plan_approval(
            RequestStatus::Pending,
            CarStatus::Available,
            0,
            date(2024, 1, 4),
            date(2024, 1, 1),
            rate(),
        )
        .unwrap_err();
        assert!(matches!(err, AppError::Computation(_)));
    }

    #[test]
    fn test_only_ongoing_transactions_complete() {
        assert!(ensure_completable(TransactionStatus::Ongoing).is_ok());

        for status in [TransactionStatus::Completed, TransactionStatus::Cancelled] {
            let err = ensure_completable(status).unwrap_err();
            assert!(matches!(err, AppError::InvalidState(_)), "{:?}", status);
        }
    }

    #[test]
    fn test_customer_conflict_names_the_colliding_field() {
        let email = "ana@example.com";
        let license = "D01-23-456789";

        let msg = customer_conflict_message(Some("customers_email_key"), email, license);
        assert!(msg.contains(email));
        assert!(!msg.contains(license));

        let msg = customer_conflict_message(Some("customers_license_number_key"), email, license);
        assert!(msg.contains(license));
        assert!(!msg.contains(email));

        // Sin nombre de constraint se mencionan ambos campos
        let msg = customer_conflict_message(None, email, license);
        assert!(msg.contains(email));
        assert!(msg.contains(license));
    }
}
