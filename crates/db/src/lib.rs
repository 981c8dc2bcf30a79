//! Database access for bookshelf: SeaORM connection factory and schema bootstrap.

use std::time::Duration;

use anyhow::Context;
use bookshelf_kernel::settings::DatabaseSettings;
use bookshelf_kernel::Migration;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection};

/// Open a pooled connection to the configured store.
pub async fn connect(settings: &DatabaseSettings) -> anyhow::Result<DatabaseConnection> {
    tracing::info!(
        target: "bookshelf-db",
        max_connections = settings.max_connections,
        "connecting to database"
    );

    let mut options = ConnectOptions::new(settings.url.clone());
    options
        .max_connections(settings.max_connections)
        .connect_timeout(Duration::from_secs(settings.connect_timeout_secs))
        .sqlx_logging(settings.sqlx_logging);

    let db = Database::connect(options)
        .await
        .context("failed to connect to database")?;

    tracing::info!(
        target: "bookshelf-db",
        backend = ?db.get_database_backend(),
        "database connection established"
    );

    Ok(db)
}

/// Apply module schema statements in the given order.
///
/// Statements are idempotent, so this runs on every start.
pub async fn apply_migrations(
    db: &DatabaseConnection,
    migrations: &[(String, Migration)],
) -> anyhow::Result<()> {
    for (module, migration) in migrations {
        tracing::debug!(
            target: "bookshelf-db",
            module = %module,
            migration = migration.id,
            "applying schema statement"
        );

        db.execute_unprepared(migration.up)
            .await
            .with_context(|| format!("migration {module}/{} failed", migration.id))?;
    }

    tracing::info!(
        target: "bookshelf-db",
        count = migrations.len(),
        "schema up to date"
    );

    Ok(())
}
