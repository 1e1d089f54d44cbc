//! Car business logic - registering, listing, replacing and removing cars.
//!
//! Every function is scoped to the calling user. Removing a car also removes its
//! repair history (with installed parts) and its parts stock in one transaction.

use crate::{
    core::{ownership::fetch_car, validation::ValidationErrors},
    entities::{Car, Part, RepairRecord, StockPart, car, part, repair_record, stock_part},
    errors::Result,
};
use sea_orm::{QueryOrder, QuerySelect, Set, TransactionTrait, prelude::*};
use serde::Deserialize;

/// Lowest accepted year of manufacture.
pub const MIN_YEAR: i32 = 1900;
/// Highest accepted year of manufacture.
pub const MAX_YEAR: i32 = 2100;

/// Full description of a car as supplied on create or replace.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CarInput {
    /// Manufacturer brand
    pub brand: String,
    /// Model name
    pub model: String,
    /// Vehicle identification number
    pub vin: String,
    /// Year of manufacture
    pub year: Option<i32>,
    /// Engine power in horsepower
    pub power: Option<i32>,
    /// Front tire size
    pub tire_front: Option<String>,
    /// Rear tire size
    pub tire_rear: Option<String>,
    /// Wiper blade sizes
    pub wipers: Option<String>,
    /// Free-text notes
    pub notes: Option<String>,
}

impl CarInput {
    /// Applies the car acceptance rules.
    ///
    /// # Errors
    /// Returns every failing field with its message.
    pub fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require_text("brand", &self.brand, 100);
        errors.require_text("model", &self.model, 100);
        errors.require_text("vin", &self.vin, 17);
        errors.check_optional_range(
            "year",
            self.year,
            MIN_YEAR,
            MAX_YEAR,
            "Year must be between 1900 and 2100.",
        );
        errors.check_optional_range("power", self.power, 0, i32::MAX, "Power cannot be negative.");
        errors.optional_text("tire_front", self.tire_front.as_deref(), 50);
        errors.optional_text("tire_rear", self.tire_rear.as_deref(), 50);
        errors.optional_text("wipers", self.wipers.as_deref(), 50);
        errors.into_result()
    }

    fn apply(self, car: &mut car::ActiveModel) {
        car.brand = Set(self.brand.trim().to_string());
        car.model_name = Set(self.model.trim().to_string());
        car.vin = Set(self.vin.trim().to_string());
        car.year = Set(self.year);
        car.power = Set(self.power);
        car.tire_front = Set(clean_optional(self.tire_front));
        car.tire_rear = Set(clean_optional(self.tire_rear));
        car.wipers = Set(clean_optional(self.wipers));
        car.notes = Set(clean_optional(self.notes));
    }
}

/// Trims an optional text value, turning blank text into `None`.
pub(crate) fn clean_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Lists the user's cars, newest first.
pub async fn list_cars(db: &DatabaseConnection, user_id: &str) -> Result<Vec<car::Model>> {
    Car::find()
        .filter(car::Column::UserId.eq(user_id))
        .order_by_desc(car::Column::CreatedAt)
        .order_by_desc(car::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Registers a new car for `user_id` after validating the input.
///
/// # Errors
/// Returns a validation error without touching the database if any field fails.
#[tracing::instrument(skip(db, input))]
pub async fn create_car(db: &DatabaseConnection, user_id: &str, input: CarInput) -> Result<car::Model> {
    input.validate()?;

    let now = chrono::Utc::now();
    let mut car = car::ActiveModel {
        user_id: Set(user_id.to_string()),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    input.apply(&mut car);

    let car = car.insert(db).await?;
    tracing::info!(car_id = car.id, "Registered car {} {}", car.brand, car.model_name);
    Ok(car)
}

/// Loads one of the user's cars.
pub async fn get_car(db: &DatabaseConnection, user_id: &str, car_id: i64) -> Result<car::Model> {
    fetch_car(db, user_id, car_id).await
}

/// Replaces every editable field of a car.
///
/// # Errors
/// Returns not-found if the car is not the user's, or a validation error.
#[tracing::instrument(skip(db, input))]
pub async fn update_car(
    db: &DatabaseConnection,
    user_id: &str,
    car_id: i64,
    input: CarInput,
) -> Result<car::Model> {
    let mut car: car::ActiveModel = fetch_car(db, user_id, car_id).await?.into();
    input.validate()?;

    input.apply(&mut car);
    car.updated_at = Set(chrono::Utc::now());

    car.update(db).await.map_err(Into::into)
}

/// Deletes a car together with its repair records, their parts, and its stock.
#[tracing::instrument(skip(db))]
pub async fn delete_car(db: &DatabaseConnection, user_id: &str, car_id: i64) -> Result<()> {
    let txn = db.begin().await?;

    let car = fetch_car(&txn, user_id, car_id).await?;

    let record_ids: Vec<i64> = RepairRecord::find()
        .select_only()
        .column(repair_record::Column::Id)
        .filter(repair_record::Column::CarId.eq(car.id))
        .into_tuple()
        .all(&txn)
        .await?;

    let parts = Part::delete_many()
        .filter(part::Column::RepairRecordId.is_in(record_ids))
        .exec(&txn)
        .await?;
    let records = RepairRecord::delete_many()
        .filter(repair_record::Column::CarId.eq(car.id))
        .exec(&txn)
        .await?;
    let stock = StockPart::delete_many()
        .filter(stock_part::Column::CarId.eq(car.id))
        .exec(&txn)
        .await?;
    car.delete(&txn).await?;

    txn.commit().await?;

    tracing::info!(
        car_id,
        repairs = records.rows_affected,
        parts = parts.rows_affected,
        stock_parts = stock.rows_affected,
        "Deleted car"
    );
    Ok(())
}
