//! Installed part business logic.
//!
//! Parts belong to a repair record. They are created directly through this module
//! or by the stock transfer in [`crate::core::transfer`]; both paths share the
//! same acceptance rules.

use crate::{
    core::{
        ownership::{Owned, fetch_owned, fetch_repair},
        validation::ValidationErrors,
    },
    entities::{Part, part},
    errors::Result,
};
use rust_decimal::Decimal;
use sea_orm::{QueryOrder, Set, prelude::*};
use serde::Deserialize;

const fn default_quantity() -> i32 {
    1
}

/// Description of an installed part as supplied on create or replace.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PartInput {
    /// Part name
    pub name: String,
    /// Manufacturer's part code
    pub part_code: String,
    /// Who made it
    pub manufacturer: String,
    /// Units installed; 1 when omitted
    #[serde(default = "default_quantity")]
    pub quantity: i32,
    /// Cost per unit
    pub cost: Decimal,
}

impl PartInput {
    /// Applies the part acceptance rules.
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

    fn apply(self, part: &mut part::ActiveModel) {
        part.name = Set(self.name.trim().to_string());
        part.part_code = Set(self.part_code.trim().to_string());
        part.manufacturer = Set(self.manufacturer.trim().to_string());
        part.quantity = Set(self.quantity);
        part.cost = Set(self.cost);
    }
}

/// Rules shared by installed and stock parts.
pub(crate) fn check_part_fields(
    errors: &mut ValidationErrors,
    name: &str,
    part_code: &str,
    manufacturer: &str,
    quantity: i32,
    cost: Decimal,
) {
    errors.require_text("name", name, 200);
    errors.require_text("part_code", part_code, 100);
    errors.require_text("manufacturer", manufacturer, 100);
    errors.check_min("quantity", quantity, 1, "Quantity must be at least 1.");
    errors.check_money("cost", cost, "Cost cannot be negative.");
}

/// Lists the parts installed during a repair, newest first.
pub async fn get_parts_for_record<C>(db: &C, record_id: i64) -> Result<Vec<part::Model>>
where
    C: ConnectionTrait,
{
    Part::find()
        .filter(part::Column::RepairRecordId.eq(record_id))
        .order_by_desc(part::Column::CreatedAt)
        .order_by_desc(part::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Adds a part to one of the user's repair records.
///
/// # Errors
/// Returns not-found if the car or record is not the user's, or a validation error.
#[tracing::instrument(skip(db, input))]
pub async fn create_part(
    db: &DatabaseConnection,
    user_id: &str,
    car_id: i64,
    record_id: i64,
    input: PartInput,
) -> Result<part::Model> {
    let (_, record) = fetch_repair(db, user_id, car_id, record_id).await?;
    input.validate()?;

    let mut part = part::ActiveModel {
        repair_record_id: Set(record.id),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };
    input.apply(&mut part);

    part.insert(db).await.map_err(Into::into)
}

/// Replaces every editable field of an installed part.
#[tracing::instrument(skip(db, input))]
pub async fn update_part(
    db: &DatabaseConnection,
    user_id: &str,
    car_id: i64,
    record_id: i64,
    part_id: i64,
    input: PartInput,
) -> Result<part::Model> {
    let (_, record) = fetch_repair(db, user_id, car_id, record_id).await?;
    let mut part: part::ActiveModel = fetch_owned::<Part, _>(db, part_id, record.id).await?.into();
    input.validate()?;

    input.apply(&mut part);
    part.update(db).await.map_err(Into::into)
}

/// Removes an installed part.
#[tracing::instrument(skip(db))]
pub async fn delete_part(
    db: &DatabaseConnection,
    user_id: &str,
    car_id: i64,
    record_id: i64,
    part_id: i64,
) -> Result<()> {
    let (_, record) = fetch_repair(db, user_id, car_id, record_id).await?;
    let part = fetch_owned::<Part, _>(db, part_id, record.id).await?;
    part.delete(db).await?;
    tracing::info!(part_id, record_id, "Deleted {}", Part::RESOURCE.to_lowercase());
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::errors::Error;
    use crate::test_utils::*;
    use std::str::FromStr;

    #[test]
    fn test_part_rules() {
        let mut input = part_input("Oil Filter", 2, "10.50");
        assert!(input.validate().is_ok());

        input.quantity = 0;
        input.cost = Decimal::from_str("-1").unwrap();
        let errors = input.validate().unwrap_err();
        assert_eq!(errors.get("quantity"), Some("Quantity must be at least 1."));
        assert_eq!(errors.get("cost"), Some("Cost cannot be negative."));

        input.quantity = 1;
        input.cost = Decimal::ZERO;
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_quantity_defaults_to_one() {
        let input: PartInput = serde_json::from_str(
            r#"{"name": "Bulb", "part_code": "H7", "manufacturer": "Osram", "cost": "4.20"}"#,
        )
        .unwrap();
        assert_eq!(input.quantity, 1);
        assert_eq!(input.cost, Decimal::from_str("4.20").unwrap());
    }

    #[tokio::test]
    async fn test_create_update_delete_part() -> Result<()> {
        let db = setup_test_db().await?;
        let car = create_test_car(&db, "alice").await?;
        let record = create_test_repair(&db, car.id, "2024-01-10").await?;

        let part = create_part(&db, "alice", car.id, record.id, part_input("Bulb", 2, "4.20")).await?;
        assert_eq!(part.repair_record_id, record.id);
        assert_eq!(part.quantity, 2);

        let updated = update_part(
            &db,
            "alice",
            car.id,
            record.id,
            part.id,
            part_input("Bulb H7", 4, "5.00"),
        )
        .await?;
        assert_eq!(updated.name, "Bulb H7");
        assert_eq!(updated.quantity, 4);
        assert_eq!(updated.created_at, part.created_at);

        delete_part(&db, "alice", car.id, record.id, part.id).await?;
        assert!(get_parts_for_record(&db, record.id).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_part_of_other_record_not_found() -> Result<()> {
        let db = setup_test_db().await?;
        let car = create_test_car(&db, "alice").await?;
        let record = create_test_repair(&db, car.id, "2024-01-10").await?;
        let other = create_test_repair(&db, car.id, "2024-02-10").await?;
        let part = create_test_part(&db, other.id, "Wiper").await?;

        let result = delete_part(&db, "alice", car.id, record.id, part.id).await;
        assert!(matches!(
            result,
            Err(Error::NotFound {
                resource: "Part",
                ..
            })
        ));

        let result = create_part(&db, "bob", car.id, record.id, part_input("Bulb", 1, "1")).await;
        assert!(matches!(result, Err(Error::NotFound { resource: "Car", .. })));

        Ok(())
    }
}
