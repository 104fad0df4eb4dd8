//! Libris application library
//!
//! Wires the book catalog module into the module host and runs the service.

pub mod modules;
pub mod utils;

use anyhow::Context;
use libris_kernel::{settings::Settings, InitCtx, ModuleRegistry};

/// Register and initialize every application module
pub async fn bootstrap(settings: &Settings) -> anyhow::Result<ModuleRegistry> {
    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry, settings);

    let ctx = InitCtx { settings };
    registry
        .init_modules(&ctx)
        .await
        .context("module initialization failed")?;

    Ok(registry)
}

/// Run the service until a shutdown signal arrives
pub async fn run(settings: Settings) -> anyhow::Result<()> {
    tracing::info!(
        env = ?settings.environment,
        port = settings.server.port,
        "libris bootstrap starting"
    );

    let registry = bootstrap(&settings).await?;
    let ctx = InitCtx {
        settings: &settings,
    };
    registry
        .start_modules(&ctx)
        .await
        .context("module start failed")?;

    tracing::info!("libris bootstrap complete");

    let served = libris_http::start_server(&registry, &settings).await;
    registry
        .stop_modules()
        .await
        .context("module shutdown failed")?;
    served
}
