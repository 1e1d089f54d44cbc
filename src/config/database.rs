//! Database configuration module.
//!
//! This module handles the `SQLite` database connection and table creation using `SeaORM`.
//! Tables are generated from the entity definitions with `Schema::create_table_from_entity`,
//! so the schema (including the cascading foreign keys) always matches the Rust structs.

use crate::entities::{Car, Part, RepairRecord, StockPart};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};
use std::path::Path;

/// Default connection string used when `DATABASE_URL` is not set.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/car_garage.sqlite?mode=rwc";

/// Gets the database URL from environment variable or returns default `SQLite` path.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

/// Establishes a connection to the database at `database_url`.
///
/// For file-backed `SQLite` URLs the parent directory is created first so a fresh
/// checkout can start without manual setup.
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection> {
    if let Some(dir) = sqlite_parent_dir(database_url) {
        std::fs::create_dir_all(dir)?;
    }

    tracing::debug!("Connecting to database at {database_url}");
    Database::connect(database_url).await.map_err(Into::into)
}

/// Directory holding the `SQLite` file named by `database_url`, if any.
fn sqlite_parent_dir(database_url: &str) -> Option<&Path> {
    let path = database_url.strip_prefix("sqlite://")?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() || path.starts_with(':') {
        return None;
    }
    Path::new(path)
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
}

/// Creates all tables that do not exist yet.
///
/// Parents are created before children so the foreign keys resolve.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let car_table = schema.create_table_from_entity(Car).if_not_exists().to_owned();
    let repair_table = schema
        .create_table_from_entity(RepairRecord)
        .if_not_exists()
        .to_owned();
    let part_table = schema.create_table_from_entity(Part).if_not_exists().to_owned();
    let stock_table = schema
        .create_table_from_entity(StockPart)
        .if_not_exists()
        .to_owned();

    db.execute(builder.build(&car_table)).await?;
    db.execute(builder.build(&repair_table)).await?;
    db.execute(builder.build(&part_table)).await?;
    db.execute(builder.build(&stock_table)).await?;

    Ok(())
}
