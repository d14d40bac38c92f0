//! # occulightd — occupancy light daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Parse configuration (CLI arg, env vars, config file)
//! - Initialise `tracing` with the configured filter
//! - Populate the virtual integration with every configured sensor and light
//! - Start one [`Controller`] per light group
//! - Build the axum router over the groups' status channels
//! - Bind to a TCP port and serve
//! - Handle graceful shutdown (SIGINT), stopping controllers after the server
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It only wires; domain logic lives in the inner crates.

mod config;

use std::sync::Arc;

use anyhow::Context;
use tokio::sync::watch;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use occulight_adapter_http_axum::router;
use occulight_adapter_http_axum::state::AppState;
use occulight_adapter_virtual::VirtualHome;
use occulight_app::controller::Controller;
use occulight_domain::group::LightGroup;
use occulight_domain::sensor::SensorState;

use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let path = Config::path_from_env();
    let config =
        Config::load(&path).with_context(|| format!("failed to load configuration from {path}"))?;

    let filter = EnvFilter::try_new(&config.logging.filter)
        .with_context(|| format!("invalid log filter {:?}", config.logging.filter))?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let groups = config.light_groups()?;
    if groups.is_empty() {
        warn!(config = %path, "no light groups configured");
    }

    // Integration
    let home = Arc::new(VirtualHome::new());
    populate(&home, &groups);

    // Controllers
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let mut statuses = Vec::with_capacity(groups.len());
    let mut tasks = Vec::with_capacity(groups.len());
    for group in groups {
        let name = group.name.clone();
        match Controller::start(group, Arc::clone(&home), &home).await {
            Ok(controller) => {
                statuses.push(controller.status());
                let mut stop = shutdown_rx.clone();
                tasks.push(tokio::spawn(controller.run_until(async move {
                    let _ = stop.wait_for(|stopping| *stopping).await;
                })));
            }
            Err(err) => error!(group = %name, error = %err, "failed to start controller, group disabled"),
        }
    }

    // HTTP
    let app = router::build(AppState::new(statuses, Arc::clone(&home)));
    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;
    info!(addr = %bind_addr, groups = tasks.len(), "occulightd listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("http server failed")?;

    let _ = shutdown_tx.send(true);
    for task in tasks {
        if let Err(err) = task.await {
            warn!(error = %err, "controller task ended abnormally");
        }
    }
    info!("occulightd stopped");
    Ok(())
}

/// Register every sensor (initially `off`) and light (initially off) the
/// groups refer to. Groups may share devices.
fn populate(home: &VirtualHome, groups: &[LightGroup]) {
    for group in groups {
        for sensor_id in &group.sensors {
            home.add_sensor(sensor_id.clone(), SensorState::Off);
        }
        for light_id in &group.lights {
            home.add_light(light_id.clone(), None);
        }
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
