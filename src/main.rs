// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firebase Services API Server
//!
//! Initializes Firebase from the environment and serves generic document
//! CRUD over HTTP.

use firebase_services::{
    config::{Config, RuntimeMode},
    firebase::{AnalyticsOutcome, ExecutionContext, FirebaseServices, InitPolicy},
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env();
    tracing::info!(
        port = config.port,
        production = config.mode == RuntimeMode::Production,
        "Starting Firebase Services API"
    );

    // Missing settings are fatal outside production
    let policy = InitPolicy::for_mode(config.mode, ExecutionContext::Server);
    let services = FirebaseServices::initialize(&config.firebase, policy)
        .await
        .inspect_err(|e| tracing::error!(error = %e, "Firebase initialization failed"))?;

    match services.analytics_outcome() {
        AnalyticsOutcome::Enabled => tracing::info!("Analytics enabled"),
        AnalyticsOutcome::Skipped(reason) => tracing::debug!(reason, "Analytics skipped"),
        AnalyticsOutcome::Failed(e) => {
            tracing::warn!(error = %e, "Analytics initialization failed, continuing without it")
        }
    }

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        services,
    });

    // Build router
    let app = firebase_services::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("firebase_services=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
