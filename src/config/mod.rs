//! Configuración de la aplicación

pub mod database;
pub mod environment;
