use async_trait::async_trait;
use axum::Router;
use sea_orm::DatabaseConnection;

/// Context provided to modules during initialization and route construction
pub struct InitCtx<'a> {
    pub settings: &'a crate::settings::Settings,
    pub db: &'a DatabaseConnection,
}

/// Schema statement contributed by a module.
///
/// `up` must be a single idempotent statement (`CREATE ... IF NOT EXISTS`);
/// statements are applied on every start and nothing records their history.
#[derive(Debug, Clone)]
pub struct Migration {
    pub id: &'static str,
    pub up: &'static str,
}

/// Core module trait that all bookshelf modules must implement
#[async_trait]
pub trait Module: Sync + Send {
    /// Unique name for this module
    fn name(&self) -> &'static str;

    /// Initialize the module with the provided context
    /// Called during application startup before migrations
    async fn init(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        Ok(())
    }

    /// Return the Axum router for this module's routes
    /// Routes will be mounted under `/api/{module_name}`
    fn routes(&self, _ctx: &InitCtx<'_>) -> Router {
        Router::new()
    }

    /// Return schema statements contributed by this module
    fn migrations(&self) -> Vec<Migration> {
        vec![]
    }

    /// Called after migrations are complete
    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        Ok(())
    }

    /// Called during application shutdown
    async fn stop(&self) -> anyhow::Result<()> {
        Ok(())
    }
}
