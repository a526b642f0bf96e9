//! Acceso a datos
//!
//! Un repositorio por entidad sobre queries sqlx en runtime. Las
//! mutaciones del ciclo de vida que necesitan atomicidad viven en el
//! RentalController, dentro de una transacción SQL explícita.

pub mod car_repository;
pub mod customer_repository;
pub mod notification_repository;
pub mod payment_repository;
pub mod rental_request_repository;
pub mod rental_transaction_repository;
