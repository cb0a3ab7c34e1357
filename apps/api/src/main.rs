mod config;
mod document;
mod errors;
mod export;
mod layout;
mod models;
mod records;
mod render;
mod routes;
mod session;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::records::HttpRecordSource;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Harvard CV API v{}", env!("CARGO_PKG_VERSION"));

    let record_source = Arc::new(HttpRecordSource::new(config.profile_service_url.clone()));
    info!("Record source: {}", config.profile_service_url);

    let state = AppState::new(config.render.clone(), record_source);

    let render = state.renderer.options();
    info!(
        "Render options: {:?} {}x{}pt, margin {}pt, body {}pt, sections {:?}",
        render.font_family,
        render.page_width,
        render.page_height,
        render.margin,
        render.body_font_size,
        render.section_order
    );

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the web client's host is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
