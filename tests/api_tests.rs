use axum::{
    body::Body,
    routing::{get, post},
    Json, Router,
};
use http::{header, Request, StatusCode};
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn test_health_check() {
    let app = create_test_app();
    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["service"], "car-rental-backend");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let app = create_test_app();
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/no-such-thing")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_submit_requires_json_body() {
    let app = create_test_app();
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/rental/request")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    // Cuerpo malformado: error de cliente, nunca 500
    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn test_submit_accepts_well_formed_request() {
    let app = create_test_app();
    let payload = json!({
        "car_id": "550e8400-e29b-41d4-a716-446655440000",
        "customer_data": {
            "first_name": "Ana",
            "last_name": "Reyes",
            "email": "ana@example.com",
            "phone": "09171234567",
            "address": "123 Main St",
            "license_number": "D01-23-456789"
        },
        "pickup_date": "2024-01-01",
        "return_date": "2024-01-04"
    });

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/rental/request")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert!(body["request_id"].is_string());
}

// Router de test con la misma superficie que la app real, sin base de
// datos detrás
fn create_test_app() -> Router {
    Router::new()
        .route(
            "/health",
            get(|| async {
                Json(json!({
                    "service": "car-rental-backend",
                    "status": "healthy",
                }))
            }),
        )
        .route(
            "/api/rental/request",
            post(|Json(payload): Json<serde_json::Value>| async move {
                // Eco mínimo del contrato de submit
                let _ = &payload["car_id"];
                (
                    StatusCode::CREATED,
                    Json(json!({
                        "request_id": "7d0bbf4e-2a1c-4f52-9e0d-1f1fbb2a9f10"
                    })),
                )
            }),
        )
}
