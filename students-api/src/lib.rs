//! HTTP API for student records.
//!
//! [`build_router`] wires the student handlers over any [`Storage`]
//! implementation. The binary adds config loading and graceful shutdown
//! around it.

pub mod config;
pub mod error;
pub mod handlers;
pub mod response;
pub mod server;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use students_db::Storage;
use tower_http::trace::TraceLayer;

pub use config::{
    config_path_from_env, resolve_config_path, AppConfig, ConfigError, HttpServerConfig,
    CONFIG_PATH_VAR,
};
pub use error::{ApiError, ApiResult};
pub use response::{CreatedResponse, ErrorResponse, StatusResponse};
pub use server::{serve, shutdown_signal, ServeError, SHUTDOWN_DEADLINE};

/// State shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn Storage>,
}

impl AppState {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }
}

/// Build the HTTP API router over the given store.
pub fn build_router(storage: Arc<dyn Storage>) -> Router {
    Router::new()
        .route("/api/students", post(handlers::create).get(handlers::list))
        .route(
            "/api/students/{id}",
            get(handlers::get_by_id)
                .put(handlers::update)
                .patch(handlers::update),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(AppState::new(storage))
}
