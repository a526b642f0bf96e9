//! Controller de inventario de coches (CRUD de staff)

use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::car_dto::{CarFilters, CarResponse, CreateCarRequest, UpdateCarRequest};
use crate::dto::ApiResponse;
use crate::models::CarStatus;
use crate::repositories::car_repository::CarRepository;
use crate::repositories::rental_transaction_repository::RentalTransactionRepository;
use crate::utils::errors::{conflict_error, not_found_error, AppError, AppResult};
use crate::utils::validation::validate_not_empty;

/// Gate para el cambio manual de estado vía CRUD. `Rented` solo lo
/// asigna el ciclo de alquiler, y ningún cambio manual es válido
/// mientras el coche tenga una transacción ONGOING: lo contrario
/// desalinearía Car.status de la verdad derivada de las transacciones.
pub fn validate_manual_status_change(requested: CarStatus, has_ongoing: bool) -> AppResult<()> {
    if requested == CarStatus::Rented {
        return Err(AppError::BadRequest(
            "car status 'Rented' is assigned by the rental lifecycle and cannot be set directly"
                .to_string(),
        ));
    }

    if has_ongoing {
        return Err(AppError::InvalidState(
            "car has an ongoing rental transaction; its status changes when the rental completes"
                .to_string(),
        ));
    }

    Ok(())
}

pub struct CarController {
    repository: CarRepository,
    transactions: RentalTransactionRepository,
}

impl CarController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: CarRepository::new(pool.clone()),
            transactions: RentalTransactionRepository::new(pool),
        }
    }

    pub async fn create(&self, request: CreateCarRequest) -> AppResult<ApiResponse<CarResponse>> {
        request.validate()?;

        if validate_not_empty(&request.plate_number).is_err() {
            return Err(AppError::BadRequest("plate_number is required".to_string()));
        }

        if self.repository.plate_number_exists(&request.plate_number).await? {
            return Err(conflict_error("Car", "plate number", &request.plate_number));
        }

        let car = self
            .repository
            .create(
                request.brand,
                request.model,
                request.year,
                request.plate_number,
                request.car_type,
                request.rental_rate_per_day,
                request.image_url,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            CarResponse::from(car),
            "Car created successfully".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<CarResponse> {
        let car = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Car", &id.to_string()))?;

        Ok(CarResponse::from(car))
    }

    /// Listado con filtro opcional de estado (también usado por la API
    /// móvil para mostrar la flota)
    pub async fn list(&self, filters: CarFilters) -> AppResult<Vec<CarResponse>> {
        let status = match filters.status.as_deref() {
            Some(raw) => Some(CarStatus::parse(raw).ok_or_else(|| {
                AppError::BadRequest(format!("unknown car status '{}'", raw))
            })?),
            None => None,
        };

        let cars = self.repository.find_all(status).await?;
        Ok(cars.into_iter().map(CarResponse::from).collect())
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateCarRequest,
    ) -> AppResult<ApiResponse<CarResponse>> {
        request.validate()?;

        let status = match request.status.as_deref() {
            Some(raw) => Some(CarStatus::parse(raw).ok_or_else(|| {
                AppError::BadRequest(format!("unknown car status '{}'", raw))
            })?),
            None => None,
        };

        if let Some(requested) = status {
            let has_ongoing = self.transactions.has_ongoing_for_car(id).await?;
            validate_manual_status_change(requested, has_ongoing)?;
        }

        let car = self
            .repository
            .update(
                id,
                request.brand,
                request.model,
                request.year,
                request.plate_number,
                request.car_type,
                status,
                request.rental_rate_per_day,
                request.image_url,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            CarResponse::from(car),
            "Car updated successfully".to_string(),
        ))
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.repository.delete(id).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rented_is_never_manually_assignable() {
        let err = validate_manual_status_change(CarStatus::Rented, false).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));

        let err = validate_manual_status_change(CarStatus::Rented, true).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn test_ongoing_rental_blocks_manual_status_change() {
        // Marcar Available (o Maintenance) un coche con alquiler en
        // curso fabricaría la inconsistencia que approve aborta
        for status in [CarStatus::Available, CarStatus::Maintenance] {
            let err = validate_manual_status_change(status, true).unwrap_err();
            assert!(matches!(err, AppError::InvalidState(_)), "{:?}", status);
        }
    }

    #[test]
    fn test_manual_status_change_without_ongoing_rental() {
        assert!(validate_manual_status_change(CarStatus::Available, false).is_ok());
        assert!(validate_manual_status_change(CarStatus::Maintenance, false).is_ok());
    }
}
