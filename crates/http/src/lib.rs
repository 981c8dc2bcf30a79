//! HTTP server facade for bookshelf with Axum and centralized error handling.

use anyhow::Context;
use axum::{routing::get, Router};

use bookshelf_kernel::{InitCtx, ModuleRegistry};

pub mod error;
pub mod router;

pub use error::AppError;
use router::RouterBuilder;

/// Start the HTTP server with the given module registry; returns once the
/// server has shut down after Ctrl-C.
pub async fn start_server(registry: &ModuleRegistry, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
    let address = ctx.settings.server.bind_address();
    tracing::info!("starting HTTP server on {}", address);

    let app = build_router(registry, ctx);

    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind to address {address}"))?;

    tracing::info!("HTTP server listening on http://{}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    tracing::info!("HTTP server stopped");
    Ok(())
}

/// Build the main HTTP router with all module routes mounted
pub fn build_router(registry: &ModuleRegistry, ctx: &InitCtx<'_>) -> Router {
    let mut router_builder = RouterBuilder::new().route("/healthz", get(health_check));

    for module in registry.modules() {
        let module_name = module.name();
        tracing::info!(
            module = module_name,
            "mounting module routes under /api/{}",
            module_name
        );
        router_builder = router_builder.mount_module(module_name, module.routes(ctx));
    }

    // Layers wrap only the routes registered above them.
    router_builder
        .with_tracing()
        .with_cors()
        .with_request_id()
        .with_timeout(ctx.settings.server.request_timeout_ms)
        .build()
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "ok"
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
