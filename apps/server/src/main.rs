// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Floorgen Server - floor plan generation over HTTP.
//!
//! A project description (building type, budget, parcel) goes in; a set of
//! seeded design variants comes out as JSON, each with zones, corridors,
//! doors, windows, parking and an area summary.
//!
//! # Endpoints
//!
//! - `GET /` - API information
//! - `GET /api/v1/health` - Health check
//! - `POST /api/v1/generate-plans` - Generate design variants

use anyhow::Context;
use axum::{
    routing::{get, post},
    Router,
};
use floorgen_layout::{LayoutConfig, LayoutEngine};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};

mod config;
mod error;
mod routes;
mod services;
mod types;

use config::Config;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<LayoutEngine>,
    pub config: Arc<Config>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,tower_http=debug,floorgen_layout=debug".into()),
        )
        .pretty()
        .init();

    let config = Config::from_env();

    tracing::info!(
        port = config.port,
        worker_threads = config.worker_threads,
        max_variants = config.max_variants,
        layout_config = ?config.layout_config,
        "Starting Floorgen Server"
    );

    // Initialize rayon thread pool
    rayon::ThreadPoolBuilder::new()
        .num_threads(config.worker_threads)
        .build_global()
        .context("Failed to initialize rayon thread pool")?;

    let layout_config = match &config.layout_config {
        Some(path) => LayoutConfig::from_path(path)
            .with_context(|| format!("Failed to load layout tables from {}", path.display()))?,
        None => LayoutConfig::default(),
    };

    let state = AppState {
        engine: Arc::new(LayoutEngine::new(layout_config)),
        config: Arc::new(config.clone()),
    };

    // Build router
    let app = Router::new()
        // Root endpoint - API information
        .route("/", get(routes::health::info))
        // Health check
        .route("/api/v1/health", get(routes::health::check))
        // Generation
        .route("/api/v1/generate-plans", post(routes::generate::generate))
        // Middleware
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.request_timeout_secs,
        )))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
