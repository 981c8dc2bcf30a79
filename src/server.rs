//! Application bootstrap shared by the `bookshelf-app` and `bookshelf` binaries.

use anyhow::Context;
use axum::Router;
use bookshelf_kernel::{settings::Settings, InitCtx, ModuleRegistry};
use sea_orm::DatabaseConnection;

use crate::modules;

/// Registry holding every module of the application
pub fn build_registry() -> ModuleRegistry {
    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry);
    registry
}

/// Connect to the store and apply every module's schema statements.
pub async fn migrate(settings: &Settings) -> anyhow::Result<()> {
    let db = bookshelf_db::connect(&settings.database).await?;
    let registry = build_registry();

    bookshelf_db::apply_migrations(&db, &registry.collect_migrations()).await?;

    db.close().await.context("failed to close database")?;
    Ok(())
}

/// Build the full HTTP application over an already connected store,
/// applying schema statements first.
pub async fn app(settings: &Settings, db: &DatabaseConnection) -> anyhow::Result<Router> {
    let registry = build_registry();
    bookshelf_db::apply_migrations(db, &registry.collect_migrations()).await?;

    let ctx = InitCtx { settings, db };
    Ok(bookshelf_http::build_router(&registry, &ctx))
}

/// Run the service until Ctrl-C: connect, initialize modules, apply schema
/// statements, start modules, serve HTTP, then stop modules in reverse order.
pub async fn serve(settings: Settings) -> anyhow::Result<()> {
    tracing::info!(
        env = ?settings.environment,
        "bookshelf bootstrap starting"
    );

    let db = bookshelf_db::connect(&settings.database).await?;
    let registry = build_registry();
    let ctx = InitCtx {
        settings: &settings,
        db: &db,
    };

    registry.init_modules(&ctx).await?;
    bookshelf_db::apply_migrations(&db, &registry.collect_migrations()).await?;
    registry.start_modules(&ctx).await?;

    tracing::info!("bookshelf bootstrap complete");
    let served = bookshelf_http::start_server(&registry, &ctx).await;

    registry.stop_modules().await?;
    db.close().await.context("failed to close database")?;

    served
}
