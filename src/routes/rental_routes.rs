use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::rental_controller::RentalController;
use crate::dto::rental_dto::{
    ApproveRentalResponse, RentalRequestResponse, RentalTransactionResponse,
    SubmitRentalRequest, SubmitRentalResponse,
};
use crate::dto::ApiResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_rental_router() -> Router<AppState> {
    Router::new()
        .route("/request", post(submit_rental_request))
        .route("/pending", get(list_pending_requests))
        .route("/active", get(list_active_rentals))
        .route("/approve/:id", post(approve_rental_request))
        .route("/reject/:id", post(reject_rental_request))
        .route("/complete/:id", post(complete_rental_transaction))
}

/// Submit de solicitud desde la app móvil
async fn submit_rental_request(
    State(state): State<AppState>,
    Json(request): Json<SubmitRentalRequest>,
) -> Result<(StatusCode, Json<SubmitRentalResponse>), AppError> {
    let controller = RentalController::new(state.pool.clone());
    let response = controller.submit(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Worklist de staff: solicitudes PENDING por pickup_date
async fn list_pending_requests(
    State(state): State<AppState>,
) -> Result<Json<Vec<RentalRequestResponse>>, AppError> {
    let controller = RentalController::new(state.pool.clone());
    let response = controller.list_pending().await?;
    Ok(Json(response))
}

/// Worklist de staff: transacciones ONGOING por end_date
async fn list_active_rentals(
    State(state): State<AppState>,
) -> Result<Json<Vec<RentalTransactionResponse>>, AppError> {
    let controller = RentalController::new(state.pool.clone());
    let response = controller.list_active().await?;
    Ok(Json(response))
}

async fn approve_rental_request(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ApproveRentalResponse>>, AppError> {
    let controller = RentalController::new(state.pool.clone());
    let response = controller.approve(id).await?;
    Ok(Json(ApiResponse::success_with_message(
        response,
        "Rental request approved".to_string(),
    )))
}

async fn reject_rental_request(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<RentalRequestResponse>>, AppError> {
    let controller = RentalController::new(state.pool.clone());
    let response = controller.reject(id).await?;
    Ok(Json(ApiResponse::success_with_message(
        response,
        "Rental request rejected".to_string(),
    )))
}

async fn complete_rental_transaction(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<RentalTransactionResponse>>, AppError> {
    let controller = RentalController::new(state.pool.clone());
    let response = controller.complete(id).await?;
    Ok(Json(ApiResponse::success_with_message(
        response,
        "Rental transaction completed".to_string(),
    )))
}
