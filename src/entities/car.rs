//! Car entity - A vehicle tracked by exactly one user.
//!
//! Cars own their repair history and their stock of not-yet-installed parts.
//! Deleting a car removes both.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Car database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "cars")]
pub struct Model {
    /// Unique identifier for the car
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Identity of the owning user, as supplied by the auth collaborator
    pub user_id: String,
    /// Manufacturer brand (e.g., "Toyota")
    pub brand: String,
    /// Model name (e.g., "Corolla")
    #[sea_orm(column_name = "model")]
    #[serde(rename = "model")]
    pub model_name: String,
    /// Vehicle identification number, at most 17 characters
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
    #[sea_orm(column_type = "Text", nullable)]
    pub notes: Option<String>,
    /// When the car was registered
    pub created_at: DateTimeUtc,
    /// When the car was last replaced
    pub updated_at: DateTimeUtc,
}

/// Defines relationships between Car and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One car has many repair records
    #[sea_orm(has_many = "super::repair_record::Entity")]
    RepairRecords,
    /// One car has many stock parts
    #[sea_orm(has_many = "super::stock_part::Entity")]
    StockParts,
}

impl Related<super::repair_record::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RepairRecords.def()
    }
}

impl Related<super::stock_part::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StockParts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
