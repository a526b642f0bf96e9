//! Modelos de dominio
//!
//! Una entidad por módulo, con su enum de estado canónico donde aplica.

pub mod car;
pub mod customer;
pub mod notification;
pub mod payment;
pub mod rental_request;
pub mod rental_transaction;

pub use car::{Car, CarStatus};
pub use customer::Customer;
pub use notification::Notification;
pub use payment::Payment;
pub use rental_request::{RentalRequest, RequestStatus};
pub use rental_transaction::{RentalTransaction, TransactionStatus};
