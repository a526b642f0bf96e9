//! Routers de la API

pub mod car_routes;
pub mod customer_routes;
pub mod notification_routes;
pub mod payment_routes;
pub mod rental_routes;

use axum::Router;

use crate::state::AppState;

/// Crear el router principal de la API
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/api/car", car_routes::create_car_router())
        .nest("/api/customer", customer_routes::create_customer_router())
        .nest("/api/rental", rental_routes::create_rental_router())
        .nest("/api/payment", payment_routes::create_payment_router())
        .nest(
            "/api/notification",
            notification_routes::create_notification_router(),
        )
}
