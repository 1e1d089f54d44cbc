//! Repair record business logic.
//!
//! Creating or replacing a record runs in one database transaction together
//! with the stock transfer, so either the record and every selected part move
//! land, or nothing does. Records are always returned with their installed parts.

use crate::{
    core::{
        ownership::{fetch_car, fetch_owned},
        part::get_parts_for_record,
        transfer::{StockPartSelection, transfer_stock_parts},
        validation::ValidationErrors,
    },
    entities::{Part, RepairRecord, part, repair_record},
    errors::Result,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{LoaderTrait, QueryOrder, Set, TransactionTrait, prelude::*};
use serde::Deserialize;

/// Description of a repair as supplied on create or replace.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RepairInput {
    /// Day the work was done
    pub date: NaiveDate,
    /// Odometer reading in kilometres
    pub mileage: i32,
    /// What was done
    pub work_description: String,
    /// Labour cost
    pub work_cost: Decimal,
}

impl RepairInput {
    /// Applies the repair acceptance rules.
    ///
    /// # Errors
    /// Returns every failing field with its message.
    pub fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.check_min("mileage", self.mileage, 0, "Mileage cannot be negative.");
        errors.require_text("work_description", &self.work_description, usize::MAX);
        errors.check_money("work_cost", self.work_cost, "Work cost cannot be negative.");
        errors.into_result()
    }

    fn apply(self, record: &mut repair_record::ActiveModel) {
        record.date = Set(self.date);
        record.mileage = Set(self.mileage);
        record.work_description = Set(self.work_description.trim().to_string());
        record.work_cost = Set(self.work_cost);
    }
}

/// A repair record together with the parts installed during it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepairWithParts {
    /// The record itself
    pub record: repair_record::Model,
    /// Installed parts, newest first
    pub parts: Vec<part::Model>,
}

/// Lists a car's repairs with their parts, latest date first.
pub async fn list_repairs(
    db: &DatabaseConnection,
    user_id: &str,
    car_id: i64,
) -> Result<Vec<RepairWithParts>> {
    let car = fetch_car(db, user_id, car_id).await?;

    let records = RepairRecord::find()
        .filter(repair_record::Column::CarId.eq(car.id))
        .order_by_desc(repair_record::Column::Date)
        .order_by_desc(repair_record::Column::CreatedAt)
        .order_by_desc(repair_record::Column::Id)
        .all(db)
        .await?;
    let parts = records
        .load_many(
            Part::find()
                .order_by_desc(part::Column::CreatedAt)
                .order_by_desc(part::Column::Id),
            db,
        )
        .await?;

    Ok(records
        .into_iter()
        .zip(parts)
        .map(|(record, parts)| RepairWithParts { record, parts })
        .collect())
}

/// Loads one repair with its parts.
pub async fn get_repair(
    db: &DatabaseConnection,
    user_id: &str,
    car_id: i64,
    record_id: i64,
) -> Result<RepairWithParts> {
    let car = fetch_car(db, user_id, car_id).await?;
    let record = fetch_owned::<RepairRecord, _>(db, record_id, car.id).await?;
    let parts = get_parts_for_record(db, record.id).await?;
    Ok(RepairWithParts { record, parts })
}

/// Logs a repair and moves the selected stock parts into it.
///
/// # Errors
/// Returns not-found if the car is not the user's, or a validation error; in
/// both cases nothing is written.
#[tracing::instrument(skip(db, input, selection))]
pub async fn create_repair(
    db: &DatabaseConnection,
    user_id: &str,
    car_id: i64,
    input: RepairInput,
    selection: &StockPartSelection,
) -> Result<RepairWithParts> {
    let txn = db.begin().await?;

    let car = fetch_car(&txn, user_id, car_id).await?;
    input.validate()?;

    let now = chrono::Utc::now();
    let mut record = repair_record::ActiveModel {
        car_id: Set(car.id),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    input.apply(&mut record);
    let record = record.insert(&txn).await?;

    let transferred = transfer_stock_parts(&txn, &record, selection).await?;
    let parts = get_parts_for_record(&txn, record.id).await?;

    txn.commit().await?;

    tracing::info!(record_id = record.id, car_id, transferred, "Logged repair");
    Ok(RepairWithParts { record, parts })
}

/// Replaces every editable field of a repair and moves the selected stock parts into it.
///
/// Parts already on the record are kept; transferred parts are added to them.
#[tracing::instrument(skip(db, input, selection))]
pub async fn update_repair(
    db: &DatabaseConnection,
    user_id: &str,
    car_id: i64,
    record_id: i64,
    input: RepairInput,
    selection: &StockPartSelection,
) -> Result<RepairWithParts> {
    let txn = db.begin().await?;

    let car = fetch_car(&txn, user_id, car_id).await?;
    let mut record: repair_record::ActiveModel =
        fetch_owned::<RepairRecord, _>(&txn, record_id, car.id).await?.into();
    input.validate()?;

    input.apply(&mut record);
    record.updated_at = Set(chrono::Utc::now());
    let record = record.update(&txn).await?;

    let transferred = transfer_stock_parts(&txn, &record, selection).await?;
    let parts = get_parts_for_record(&txn, record.id).await?;

    txn.commit().await?;

    tracing::info!(record_id, car_id, transferred, "Updated repair");
    Ok(RepairWithParts { record, parts })
}

/// Deletes a repair and the parts installed during it.
///
/// Installed parts do not go back to stock.
#[tracing::instrument(skip(db))]
pub async fn delete_repair(
    db: &DatabaseConnection,
    user_id: &str,
    car_id: i64,
    record_id: i64,
) -> Result<()> {
    let txn = db.begin().await?;

    let car = fetch_car(&txn, user_id, car_id).await?;
    let record = fetch_owned::<RepairRecord, _>(&txn, record_id, car.id).await?;

    let parts = Part::delete_many()
        .filter(part::Column::RepairRecordId.eq(record.id))
        .exec(&txn)
        .await?;
    record.delete(&txn).await?;

    txn.commit().await?;

    tracing::info!(record_id, car_id, parts = parts.rows_affected, "Deleted repair");
    Ok(())
}
