//! Stock part entity - A part bought for a car but not installed yet.
//!
//! Stock parts carry the same description as installed parts plus purchase
//! metadata. Installing one moves it into a repair record as a `Part`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Stock part database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "stock_parts")]
pub struct Model {
    /// Unique identifier for the stock part
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the car this part was bought for
    pub car_id: i64,
    /// Part name
    pub name: String,
    /// Manufacturer's part code
    pub part_code: String,
    /// Who made it
    pub manufacturer: String,
    /// Number of units in stock
    pub quantity: i32,
    /// Cost per unit
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub cost: Decimal,
    /// When the part was bought
    pub purchase_date: Option<Date>,
    /// Free-text notes
    #[sea_orm(column_type = "Text", nullable)]
    pub notes: Option<String>,
    /// When the stock entry was created
    pub created_at: DateTimeUtc,
}

/// Defines relationships between StockPart and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each stock part belongs to one car
    #[sea_orm(
        belongs_to = "super::car::Entity",
        from = "Column::CarId",
        to = "super::car::Column::Id",
        on_delete = "Cascade"
    )]
    Car,
}

impl Related<super::car::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Car.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
