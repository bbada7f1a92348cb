// ABOUTME: HTTP server binary for the StreakFit API
// ABOUTME: Loads configuration, opens the database and serves the REST routes until shutdown
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! # StreakFit API Server Binary
//!
//! Starts the REST API for workout templates, sessions, activity streaks
//! and exercise search.

use anyhow::{Context, Result};
use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use streakfit::{
    config::ServerConfig, context::ServerResources, database::Database,
    database_plugins::DatabaseProvider, logging, routes,
};
use tokio::net::TcpListener;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "streakfit-server")]
#[command(about = "StreakFit API - workout templates, sessions and activity streaks")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration from environment
    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }

    logging::init_from_env()?;

    info!("Starting StreakFit API");
    info!("{}", config.summary());

    let database = Database::new(&config.database.url, config.database.max_connections).await?;
    info!("Database initialized: {}", config.database.url);

    let database: Arc<dyn DatabaseProvider> = Arc::new(database);
    let resources = Arc::new(ServerResources::new(database, Arc::new(config.clone())));
    let app = routes::router(resources);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.http_port));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Server listening on http://{addr}");
    display_available_endpoints(config.http_port);

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("Server error: {e}");
        return Err(e.into());
    }

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {e}");
        return;
    }
    info!("Shutdown signal received");
}

#[allow(clippy::cognitive_complexity)]
fn display_available_endpoints(port: u16) {
    let base = format!("http://127.0.0.1:{port}");
    info!("=== Available API Endpoints ===");
    info!("   Health:            GET    {base}/health");
    info!("   Register:          POST   {base}/api/auth/register");
    info!("   Login:             POST   {base}/api/auth/login");
    info!("   Workouts:          GET    {base}/api/workouts");
    info!("   Start Workout:     POST   {base}/api/workouts/start");
    info!("   Finish Workout:    POST   {base}/api/workouts/finish");
    info!("   Activity Summary:  GET    {base}/api/workouts/activity");
    info!("   Exercise Search:   GET    {base}/api/exercises");
    info!("=== End of Endpoint List ===");
}
