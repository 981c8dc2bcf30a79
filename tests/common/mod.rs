//! Shared fixtures: an in-memory SQLite store with the schema applied.

#![allow(dead_code)]

use bookshelf_app::books::models::BookPayload;
use bookshelf_app::editorials::models::EditorialPayload;
use bookshelf_app::server::build_registry;
use bookshelf_kernel::settings::DatabaseSettings;
use sea_orm::DatabaseConnection;

/// Fresh store per test. A single pooled connection keeps every query on
/// the same in-memory database.
pub async fn memory_db() -> DatabaseConnection {
    let settings = DatabaseSettings {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
        ..DatabaseSettings::default()
    };
    let db = bookshelf_db::connect(&settings).await.unwrap();
    bookshelf_db::apply_migrations(&db, &build_registry().collect_migrations())
        .await
        .unwrap();
    db
}

pub fn book(name: &str) -> BookPayload {
    BookPayload {
        name: name.to_string(),
        author: None,
        description: None,
        genre: None,
        image: None,
        price: None,
        editorial_id: None,
    }
}

pub fn described_book(name: &str, description: &str) -> BookPayload {
    BookPayload {
        description: Some(description.to_string()),
        ..book(name)
    }
}

pub fn editorial(name: &str) -> EditorialPayload {
    EditorialPayload {
        name: name.to_string(),
        logo: None,
    }
}
