mod config;
mod controllers;
mod database;
mod dto;
mod middleware;
mod models;
mod repositories;
mod routes;
mod state;
mod utils;

use anyhow::Result;
use axum::{extract::State, response::Json, routing::get, Router};
use dotenvy::dotenv;
use serde_json::json;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info};

use config::environment::EnvironmentConfig;
use database::DatabaseConnection;
use middleware::cors::{cors_middleware, cors_middleware_with_origins};
use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    let config = EnvironmentConfig::default();

    // Configurar logging
    let log_level = if config.is_development() {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt().with_max_level(log_level).init();

    info!("🚗 Car Rental Backend");
    info!("=====================");

    // Inicializar base de datos
    let db_connection = match DatabaseConnection::new_default().await {
        Ok(conn) => conn,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };

    if let Err(e) = db_connection.run_migrations().await {
        error!("❌ Error ejecutando migraciones: {}", e);
        return Err(anyhow::anyhow!("Error de migraciones: {}", e));
    }

    let pool = db_connection.pool().clone();

    // CORS: orígenes específicos en producción, permisivo en desarrollo
    let cors = if config.cors_origins.is_empty() {
        cors_middleware()
    } else {
        cors_middleware_with_origins(config.cors_origins.clone())
    };

    let app_state = AppState::new(pool, config.clone());

    let app = Router::new()
        .route("/health", get(health_endpoint))
        .merge(routes::create_api_router())
        .layer(cors)
        .with_state(app_state);

    let addr: SocketAddr = config.server_url().parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("🚗 Inventario - Car:");
    info!("   POST /api/car - Crear coche");
    info!("   GET  /api/car - Listar coches (?status=Available)");
    info!("   GET  /api/car/:id - Obtener coche");
    info!("   PUT  /api/car/:id - Actualizar coche");
    info!("   DELETE /api/car/:id - Eliminar coche");
    info!("📋 Ciclo de alquiler - Rental:");
    info!("   POST /api/rental/request - Enviar solicitud (móvil)");
    info!("   GET  /api/rental/pending - Solicitudes pendientes (staff)");
    info!("   GET  /api/rental/active - Alquileres en curso (staff)");
    info!("   POST /api/rental/approve/:id - Aprobar solicitud (staff)");
    info!("   POST /api/rental/reject/:id - Rechazar solicitud (staff)");
    info!("   POST /api/rental/complete/:id - Completar transacción (staff)");
    info!("👤 Clientes - Customer:");
    info!("   POST /api/customer/signup - Registrar cliente (móvil)");
    info!("   GET  /api/customer/:id - Obtener cliente");
    info!("💰 Pagos - Payment:");
    info!("   POST /api/payment - Registrar pago (móvil)");
    info!("   GET  /api/payment/transaction/:id - Pagos de una transacción");
    info!("🔔 Notificaciones - Notification:");
    info!("   GET  /api/notification/customer/:id - Listar notificaciones");
    info!("   POST /api/notification/:id/read - Marcar como leída");

    // Iniciar servidor en background
    let server_handle = tokio::spawn(async move {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                error!("❌ Error del servidor: {}", e);
                anyhow::Error::from(e)
            })
    });

    // Esperar a que el servidor termine
    if let Err(e) = server_handle.await? {
        error!("❌ Servidor terminó con error: {}", e);
    }

    info!("👋 Servidor terminado");
    Ok(())
}

/// Health check simple
async fn health_endpoint(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "service": "car-rental-backend",
        "status": "healthy",
        "environment": state.config.environment,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
