pub mod entity;
pub mod models;
pub mod repository;
pub mod routes;

use async_trait::async_trait;
use axum::Router;
use bookshelf_kernel::{InitCtx, Migration, Module};

use repository::EditorialRepository;

/// Publishers that books reference through `editorialId`
pub struct EditorialsModule;

impl EditorialsModule {
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Module for EditorialsModule {
    fn name(&self) -> &'static str {
        "editorials"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "editorials module initialized"
        );
        Ok(())
    }

    fn routes(&self, ctx: &InitCtx<'_>) -> Router {
        routes::router(EditorialRepository::new(ctx.db.clone()))
    }

    fn migrations(&self) -> Vec<Migration> {
        vec![Migration {
            id: "001_create_editorials",
            up: r#"
                CREATE TABLE IF NOT EXISTS editorials (
                    id          TEXT PRIMARY KEY NOT NULL,
                    name        TEXT NOT NULL,
                    logo        TEXT,
                    name_folded TEXT NOT NULL
                )"#,
        }]
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "editorials module stopped");
        Ok(())
    }
}

/// Create a new instance of the editorials module
pub fn create_module() -> std::sync::Arc<dyn Module> {
    std::sync::Arc::new(EditorialsModule::new())
}
