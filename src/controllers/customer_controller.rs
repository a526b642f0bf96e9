//! Controller de clientes (registro desde la app móvil)

use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::customer_dto::{CustomerResponse, SignupCustomerRequest};
use crate::dto::ApiResponse;
use crate::repositories::customer_repository::CustomerRepository;
use crate::utils::errors::{conflict_error, not_found_error, AppResult};

pub struct CustomerController {
    repository: CustomerRepository,
}

impl CustomerController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: CustomerRepository::new(pool),
        }
    }

    /// Alta explícita de cliente. La credencial se guarda tal cual
    /// llega, como en el sistema original; señalado como inseguro, no
    /// corregido aquí.
    pub async fn signup(
        &self,
        request: SignupCustomerRequest,
    ) -> AppResult<ApiResponse<CustomerResponse>> {
        request.validate()?;

        if self.repository.find_by_email(&request.email).await?.is_some() {
            return Err(conflict_error("Customer", "email", &request.email));
        }

        let customer = self
            .repository
            .create(
                request.first_name,
                request.last_name,
                request.email,
                request.password,
                request.phone,
                request.address,
                request.license_number,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            CustomerResponse::from(customer),
            "Customer registered successfully".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<CustomerResponse> {
        let customer = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Customer", &id.to_string()))?;

        Ok(CustomerResponse::from(customer))
    }
}
