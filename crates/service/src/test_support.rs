#![cfg(test)]
use migration::MigratorTrait;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

/// Fresh in-memory sqlite store with migrations applied.
/// The pool is capped at one connection so every handle sees the same
/// in-memory database; each test gets its own isolated store.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    let mut opts = ConnectOptions::new("sqlite::memory:".to_string());
    opts.max_connections(1).sqlx_logging(false);
    let db = Database::connect(opts).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}
