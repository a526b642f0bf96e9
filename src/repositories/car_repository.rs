use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Car, CarStatus};
use crate::utils::errors::{AppError, AppResult};

/// Código de violación de foreign key en PostgreSQL
const FK_VIOLATION: &str = "23503";
/// Código de violación de unicidad en PostgreSQL
const UNIQUE_VIOLATION: &str = "23505";

/// Mapea la violación de unicidad de plate_number a Conflict tanto en
/// create como en update; cualquier otro error de base de datos pasa
/// sin transformar.
fn plate_conflict(e: sqlx::Error, plate_number: &str) -> AppError {
    match &e {
        sqlx::Error::Database(db) if db.code().as_deref() == Some(UNIQUE_VIOLATION) => {
            AppError::Conflict(format!(
                "Car with plate number '{}' already exists",
                plate_number
            ))
        }
        _ => AppError::Database(e),
    }
}

pub struct CarRepository {
    pool: PgPool,
}

impl CarRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        brand: String,
        model: String,
        year: i32,
        plate_number: String,
        car_type: String,
        rental_rate_per_day: Decimal,
        image_url: Option<String>,
    ) -> AppResult<Car> {
        let car = sqlx::query_as::<_, Car>(
            r#"
            INSERT INTO cars (id, brand, model, year, plate_number, car_type, status, rental_rate_per_day, image_url, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(brand)
        .bind(model)
        .bind(year)
        .bind(&plate_number)
        .bind(car_type)
        .bind(CarStatus::Available.as_str())
        .bind(rental_rate_per_day)
        .bind(image_url)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| plate_conflict(e, &plate_number))?;

        Ok(car)
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Car>> {
        let car = sqlx::query_as::<_, Car>("SELECT * FROM cars WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(car)
    }

    pub async fn find_all(&self, status: Option<CarStatus>) -> AppResult<Vec<Car>> {
        let cars = match status {
            Some(status) => {
                sqlx::query_as::<_, Car>(
                    "SELECT * FROM cars WHERE status = $1 ORDER BY created_at DESC",
                )
                .bind(status.as_str())
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Car>("SELECT * FROM cars ORDER BY created_at DESC")
                    .fetch_all(&self.pool)
                    .await?
            }
        };

        Ok(cars)
    }

    pub async fn plate_number_exists(&self, plate_number: &str) -> AppResult<bool> {
        let result: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM cars WHERE plate_number = $1)")
                .bind(plate_number)
                .fetch_one(&self.pool)
                .await?;

        Ok(result.0)
    }

    /// Actualización parcial en una sola sentencia: los campos no
    /// enviados llegan como NULL y COALESCE conserva el valor actual,
    /// así dos updates concurrentes no se pisan los campos del otro.
    pub async fn update(
        &self,
        id: Uuid,
        brand: Option<String>,
        model: Option<String>,
        year: Option<i32>,
        plate_number: Option<String>,
        car_type: Option<String>,
        status: Option<CarStatus>,
        rental_rate_per_day: Option<Decimal>,
        image_url: Option<String>,
    ) -> AppResult<Car> {
        let requested_plate = plate_number.clone().unwrap_or_default();

        let car = sqlx::query_as::<_, Car>(
            r#"
            UPDATE cars
            SET brand = COALESCE($2, brand),
                model = COALESCE($3, model),
                year = COALESCE($4, year),
                plate_number = COALESCE($5, plate_number),
                car_type = COALESCE($6, car_type),
                status = COALESCE($7, status),
                rental_rate_per_day = COALESCE($8, rental_rate_per_day),
                image_url = COALESCE($9, image_url)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(brand)
        .bind(model)
        .bind(year)
        .bind(plate_number)
        .bind(car_type)
        .bind(status.map(|s| s.as_str().to_string()))
        .bind(rental_rate_per_day)
        .bind(image_url)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| plate_conflict(e, &requested_plate))?
        .ok_or_else(|| AppError::NotFound("Car not found".to_string()))?;

        Ok(car)
    }

    /// Borrado físico. Las solicitudes de alquiler referencian al coche
    /// con ON DELETE RESTRICT, así que el borrado se bloquea mientras
    /// existan solicitudes.
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM cars WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| match &e {
                sqlx::Error::Database(db) if db.code().as_deref() == Some(FK_VIOLATION) => {
                    AppError::Conflict(
                        "Car is referenced by rental requests and cannot be deleted".to_string(),
                    )
                }
                _ => AppError::Database(e),
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Car not found".to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_unique_violation_errors_stay_database_errors() {
        let err = plate_conflict(sqlx::Error::RowNotFound, "ABC-1234");
        assert!(matches!(err, AppError::Database(_)));
    }
}
