// ABOUTME: HTTP server exposing the workout planner as a JSON API
// ABOUTME: Serves POST /api/plan and GET /health with graceful shutdown on Ctrl+C
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Workout Architect API Server
//!
//! Stateless: callers keep the transcript and send it back with every turn.

use anyhow::{Context, Result};
use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};
use workout_architect::{
    config::AppConfig, external::WgerClient, logging, planning::WorkoutPlanner, routes,
};

#[derive(Parser)]
#[command(name = "workout-architect-server")]
#[command(about = "Workout Architect - conversational workout planning API")]
struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // .env may carry the logging settings
    let _ = dotenvy::dotenv();
    logging::init_from_env()?;
    info!("Starting Workout Architect API");

    let mut config = AppConfig::from_env().context("Failed to load configuration")?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    info!("{}", config.summary());

    let catalog = Arc::new(WgerClient::new(config.catalog.clone())?);
    let planner = Arc::new(WorkoutPlanner::from_config(&config, catalog)?);
    let app = routes::router(planner);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.http_port));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
    }
    info!("Shutdown signal received");
}
