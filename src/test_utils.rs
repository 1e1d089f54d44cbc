//! Shared test utilities for `car-garage`.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

#![allow(clippy::unwrap_used)]

use crate::{
    core::{
        car::{self, CarInput},
        part::PartInput,
        repair::RepairInput,
        stock_part::StockPartInput,
    },
    entities,
    errors::Result,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use std::{str::FromStr, sync::Arc};

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Parses a `YYYY-MM-DD` literal.
pub fn date(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap()
}

/// Parses a decimal literal such as `"10.50"`.
pub fn money(value: &str) -> Decimal {
    Decimal::from_str(value).unwrap()
}

/// Car input with a valid VIN and every optional field unset.
pub fn car_input(brand: &str, model: &str) -> CarInput {
    CarInput {
        brand: brand.to_string(),
        model: model.to_string(),
        vin: "1HGCM82633A004352".to_string(),
        year: None,
        power: None,
        tire_front: None,
        tire_rear: None,
        wipers: None,
        notes: None,
    }
}

/// Repair input with a fixed description.
pub fn repair_input(day: &str, mileage: i32, work_cost: &str) -> RepairInput {
    RepairInput {
        date: date(day),
        mileage,
        work_description: "Scheduled service".to_string(),
        work_cost: money(work_cost),
    }
}

/// Installed part input with a fixed code and manufacturer.
pub fn part_input(name: &str, quantity: i32, cost: &str) -> PartInput {
    PartInput {
        name: name.to_string(),
        part_code: "TP-001".to_string(),
        manufacturer: "Bosch".to_string(),
        quantity,
        cost: money(cost),
    }
}

/// Stock part input with a fixed code and manufacturer and no purchase date.
pub fn stock_input(name: &str, quantity: i32, cost: &str) -> StockPartInput {
    StockPartInput {
        name: name.to_string(),
        part_code: "TP-001".to_string(),
        manufacturer: "Bosch".to_string(),
        quantity,
        cost: money(cost),
        purchase_date: None,
        notes: None,
    }
}

/// Registers a test car for `user_id`.
///
/// # Defaults
/// * brand: "Toyota"
/// * model: "Corolla"
/// * vin: "1HGCM82633A004352"
pub async fn create_test_car(db: &DatabaseConnection, user_id: &str) -> Result<entities::car::Model> {
    car::create_car(db, user_id, car_input("Toyota", "Corolla")).await
}

/// Inserts a repair record on `day` (`YYYY-MM-DD`) without any ownership check.
///
/// # Defaults
/// * mileage: 50000
/// * `work_cost`: 150.00
pub async fn create_test_repair(
    db: &DatabaseConnection,
    car_id: i64,
    day: &str,
) -> Result<entities::repair_record::Model> {
    let now = chrono::Utc::now();
    entities::repair_record::ActiveModel {
        car_id: Set(car_id),
        date: Set(date(day)),
        mileage: Set(50_000),
        work_description: Set("Scheduled service".to_string()),
        work_cost: Set(money("150.00")),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Installs a part on a record with quantity 1 and cost 25.00.
pub async fn create_test_part(
    db: &DatabaseConnection,
    repair_record_id: i64,
    name: &str,
) -> Result<entities::part::Model> {
    create_custom_part(db, repair_record_id, name, 1, "25.00").await
}

/// Installs a part on a record with custom quantity and unit cost.
pub async fn create_custom_part(
    db: &DatabaseConnection,
    repair_record_id: i64,
    name: &str,
    quantity: i32,
    cost: &str,
) -> Result<entities::part::Model> {
    entities::part::ActiveModel {
        repair_record_id: Set(repair_record_id),
        name: Set(name.to_string()),
        part_code: Set("TP-001".to_string()),
        manufacturer: Set("Bosch".to_string()),
        quantity: Set(quantity),
        cost: Set(money(cost)),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Puts a part into a car's stock with quantity 1 and cost 25.00.
pub async fn create_test_stock_part(
    db: &DatabaseConnection,
    car_id: i64,
    name: &str,
) -> Result<entities::stock_part::Model> {
    create_custom_stock_part(db, car_id, name, "TP-001", "Bosch", 1, "25.00").await
}

/// Puts a part into a car's stock with custom parameters.
pub async fn create_custom_stock_part(
    db: &DatabaseConnection,
    car_id: i64,
    name: &str,
    part_code: &str,
    manufacturer: &str,
    quantity: i32,
    cost: &str,
) -> Result<entities::stock_part::Model> {
    entities::stock_part::ActiveModel {
        car_id: Set(car_id),
        name: Set(name.to_string()),
        part_code: Set(part_code.to_string()),
        manufacturer: Set(manufacturer.to_string()),
        quantity: Set(quantity),
        cost: Set(money(cost)),
        purchase_date: Set(None),
        notes: Set(None),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Sets up a database holding one car of "alice".
/// Returns (db, car) for common test scenarios.
pub async fn setup_with_car() -> Result<(DatabaseConnection, entities::car::Model)> {
    let db = setup_test_db().await?;
    let car = create_test_car(&db, "alice").await?;
    Ok((db, car))
}

/// Wraps the full router around `db` with default settings.
///
/// Pass an `Arc` to keep querying the same database after the requests.
pub fn test_server(db: impl Into<Arc<DatabaseConnection>>) -> axum_test::TestServer {
    let state = crate::api::AppState {
        db: db.into(),
        config: Arc::new(crate::config::settings::AppConfig::default()),
    };
    axum_test::TestServer::new(crate::api::build_router(state)).unwrap()
}
