//! Repair record entity - One maintenance event for a car.
//!
//! Each record has a date, the odometer reading, a description of the work
//! done and the labour cost. Parts consumed by the repair hang off the record.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Repair record database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "repair_records")]
pub struct Model {
    /// Unique identifier for the record
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the car this repair was done on
    pub car_id: i64,
    /// Day the work was done
    pub date: Date,
    /// Odometer reading in kilometres
    pub mileage: i32,
    /// What was done
    #[sea_orm(column_type = "Text")]
    pub work_description: String,
    /// Labour cost
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub work_cost: Decimal,
    /// When the record was created
    pub created_at: DateTimeUtc,
    /// When the record was last replaced
    pub updated_at: DateTimeUtc,
}

/// Defines relationships between RepairRecord and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each record belongs to one car
    #[sea_orm(
        belongs_to = "super::car::Entity",
        from = "Column::CarId",
        to = "super::car::Column::Id",
        on_delete = "Cascade"
    )]
    Car,
    /// One record has many installed parts
    #[sea_orm(has_many = "super::part::Entity")]
    Parts,
}

impl Related<super::car::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Car.def()
    }
}

impl Related<super::part::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Parts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
