//! DTOs de la API
//!
//! Structs tipados de request/response con validación a nivel de campo.
//! Sustituyen la asignación reflexiva de atributos del sistema original.

pub mod car_dto;
pub mod customer_dto;
pub mod notification_dto;
pub mod payment_dto;
pub mod rental_dto;

use serde::Serialize;

// Response genérica
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    pub fn success_with_message(data: T, message: String) -> Self {
        Self {
            success: true,
            message: Some(message),
            data: Some(data),
        }
    }
}

