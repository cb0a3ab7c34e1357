pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::export::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Export API
        .route(
            "/api/v1/cv/export/pdf",
            post(handlers::handle_export_pdf).get(handlers::handle_export_stored_pdf),
        )
        .route("/api/v1/cv/layout", post(handlers::handle_layout))
        .with_state(state)
}
