// Copyright (c) 2025 - Cowboy AI, Inc.
//! Dry-run deployment of a small application graph
//!
//! Builds an HTTP-triggered compute that reads a key-value store and replays
//! it against the logging driver.
//!
//! Run with: cargo run --example dry_run
//!
//! Environment:
//! - `CIM_DEPLOY_REGION` - target region (default: us-west-2)
//! - `CIM_DEPLOY_DRY_RUN` - `true` to print the plan instead of replaying it
//! - `RUST_LOG` - log filter

use anyhow::{Context, Result};
use cim_resource_graph::deploy::LoggingDriver;
use cim_resource_graph::{
    Action, Application, Compute, DeployConfig, HttpEvent, Storage, StorageCategory,
};
use tracing::info;

fn build_application() -> Result<Application> {
    let event = HttpEvent::new("MyHttpEvent")?.method("GET").path("/event");
    let storage = Storage::new("MyStorage", StorageCategory::KeyValue)?
        .engine("dynamodb")
        .key("id");

    let compute = Compute::new("MyCompute")?
        .runtime("nodejs")
        .code("./handler")
        .env("LOG_LEVEL", "info")
        .on(event)
        .uses(storage, [Action::Read, Action::Update], None)?;

    let mut app = Application::new("MyApp")?;
    app.with(compute)?;
    Ok(app)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let config = DeployConfig::from_env();
    let app = build_application().context("Failed to assemble application graph")?;
    info!(
        application = %app.name(),
        resources = app.len(),
        region = %config.region,
        "Application assembled"
    );

    if config.dry_run {
        let plan = app.plan()?;
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(());
    }

    let calls = app
        .deploy(LoggingDriver::new, config.region.clone())
        .await
        .context("Deployment failed")?;
    info!(calls, "Deployment replayed");
    Ok(())
}
