use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Customer;
use crate::utils::errors::{AppError, AppResult};

const UNIQUE_VIOLATION: &str = "23505";

pub struct CustomerRepository {
    pool: PgPool,
}

impl CustomerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Customer>> {
        let customer = sqlx::query_as::<_, Customer>("SELECT * FROM customers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(customer)
    }

    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<Customer>> {
        let customer = sqlx::query_as::<_, Customer>("SELECT * FROM customers WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(customer)
    }

    pub async fn create(
        &self,
        first_name: String,
        last_name: String,
        email: String,
        password: String,
        phone: String,
        address: String,
        license_number: String,
    ) -> AppResult<Customer> {
        let customer = sqlx::query_as::<_, Customer>(
            r#"
            INSERT INTO customers (id, first_name, last_name, email, password, phone, address, license_number)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(first_name)
        .bind(last_name)
        .bind(&email)
        .bind(password)
        .bind(phone)
        .bind(address)
        .bind(&license_number)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.code().as_deref() == Some(UNIQUE_VIOLATION) => {
                AppError::Conflict(format!(
                    "Customer with email '{}' or license '{}' already exists",
                    email, license_number
                ))
            }
            _ => AppError::Database(e),
        })?;

        Ok(customer)
    }
}
