//! Stock part business logic - the per-car inventory of parts not installed yet.

use crate::{
    core::{
        car::clean_optional,
        ownership::{fetch_car, fetch_owned},
        part::check_part_fields,
        validation::ValidationErrors,
    },
    entities::{StockPart, stock_part},
    errors::Result,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{QueryOrder, Set, prelude::*};
use serde::Deserialize;

const fn default_quantity() -> i32 {
    1
}

/// Description of a stock part as supplied on create or replace.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StockPartInput {
    /// Part name
    pub name: String,
    /// Manufacturer's part code
    pub part_code: String,
    /// Who made it
    pub manufacturer: String,
    /// Units in stock; 1 when omitted
    #[serde(default = "default_quantity")]
    pub quantity: i32,
    /// Cost per unit
    pub cost: Decimal,
    /// When the part was bought
    pub purchase_date: Option<NaiveDate>,
    /// Free-text notes
    pub notes: Option<String>,
}

impl StockPartInput {
    /// Applies the stock part acceptance rules (the same as for installed parts).
    ///
    /// # Errors
    /// Returns every failing field with its message.
    pub fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        check_part_fields(
            &mut errors,
            &self.name,
            &self.part_code,
            &self.manufacturer,
            self.quantity,
            self.cost,
        );
        errors.into_result()
    }

    fn apply(self, stock: &mut stock_part::ActiveModel) {
        stock.name = Set(self.name.trim().to_string());
        stock.part_code = Set(self.part_code.trim().to_string());
        stock.manufacturer = Set(self.manufacturer.trim().to_string());
        stock.quantity = Set(self.quantity);
        stock.cost = Set(self.cost);
        stock.purchase_date = Set(self.purchase_date);
        stock.notes = Set(clean_optional(self.notes));
    }
}

/// Lists a car's stock, newest first.
pub async fn list_stock_parts(
    db: &DatabaseConnection,
    user_id: &str,
    car_id: i64,
) -> Result<Vec<stock_part::Model>> {
    let car = fetch_car(db, user_id, car_id).await?;
    StockPart::find()
        .filter(stock_part::Column::CarId.eq(car.id))
        .order_by_desc(stock_part::Column::CreatedAt)
        .order_by_desc(stock_part::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Adds a part to a car's stock.
#[tracing::instrument(skip(db, input))]
pub async fn create_stock_part(
    db: &DatabaseConnection,
    user_id: &str,
    car_id: i64,
    input: StockPartInput,
) -> Result<stock_part::Model> {
    let car = fetch_car(db, user_id, car_id).await?;
    input.validate()?;

    let mut stock = stock_part::ActiveModel {
        car_id: Set(car.id),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };
    input.apply(&mut stock);

    stock.insert(db).await.map_err(Into::into)
}

/// Loads one stock part of one of the user's cars.
pub async fn get_stock_part(
    db: &DatabaseConnection,
    user_id: &str,
    car_id: i64,
    stock_part_id: i64,
) -> Result<stock_part::Model> {
    let car = fetch_car(db, user_id, car_id).await?;
    fetch_owned::<StockPart, _>(db, stock_part_id, car.id).await
}

/// Replaces every editable field of a stock part.
#[tracing::instrument(skip(db, input))]
pub async fn update_stock_part(
    db: &DatabaseConnection,
    user_id: &str,
    car_id: i64,
    stock_part_id: i64,
    input: StockPartInput,
) -> Result<stock_part::Model> {
    let mut stock: stock_part::ActiveModel =
        get_stock_part(db, user_id, car_id, stock_part_id).await?.into();
    input.validate()?;

    input.apply(&mut stock);
    stock.update(db).await.map_err(Into::into)
}

/// Removes a stock part without installing it.
#[tracing::instrument(skip(db))]
pub async fn delete_stock_part(
    db: &DatabaseConnection,
    user_id: &str,
    car_id: i64,
    stock_part_id: i64,
) -> Result<()> {
    let stock = get_stock_part(db, user_id, car_id, stock_part_id).await?;
    stock.delete(db).await?;
    tracing::info!(stock_part_id, car_id, "Deleted stock part");
    Ok(())
}
