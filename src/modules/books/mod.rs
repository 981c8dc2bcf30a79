pub mod entity;
pub mod models;
pub mod repository;
pub mod routes;

use async_trait::async_trait;
use axum::Router;
use bookshelf_kernel::{InitCtx, Migration, Module};

use repository::BookRepository;

/// Book catalogue: listing with search, single and bulk creation, full
/// replacement, and deletion
pub struct BooksModule;

impl BooksModule {
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "books"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self, ctx: &InitCtx<'_>) -> Router {
        routes::router(BookRepository::new(ctx.db.clone()))
    }

    fn migrations(&self) -> Vec<Migration> {
        vec![
            Migration {
                id: "001_create_books",
                up: r#"
                    CREATE TABLE IF NOT EXISTS books (
                        id                 TEXT PRIMARY KEY NOT NULL,
                        name               TEXT NOT NULL,
                        author             TEXT,
                        description        TEXT,
                        genre              TEXT,
                        image              TEXT,
                        price              DOUBLE PRECISION,
                        editorial_id       TEXT,
                        name_folded        TEXT NOT NULL,
                        description_folded TEXT
                    )"#,
            },
            Migration {
                id: "002_index_books_editorial_id",
                up: "CREATE INDEX IF NOT EXISTS idx_books_editorial_id ON books (editorial_id)",
            },
        ]
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module stopped");
        Ok(())
    }
}

/// Create a new instance of the books module
pub fn create_module() -> std::sync::Arc<dyn Module> {
    std::sync::Arc::new(BooksModule::new())
}
