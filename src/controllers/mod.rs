//! Lógica de negocio
//!
//! El RentalController es el engine del ciclo de vida; el resto son
//! CRUD finos sobre sus repositorios.

pub mod car_controller;
pub mod customer_controller;
pub mod notification_controller;
pub mod payment_controller;
pub mod rental_controller;
