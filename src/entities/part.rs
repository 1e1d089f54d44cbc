//! Part entity - A component installed during a specific repair.
//!
//! Parts are either entered directly against a repair record or produced by
//! transferring a stock part. `created_at` is set once and never changes.
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Installed part database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "parts")]
pub struct Model {
    /// Unique identifier for the part
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the repair record that consumed this part
    pub repair_record_id: i64,
    /// Part name (e.g., "Oil Filter")
    pub name: String,
    /// Manufacturer's part code
    pub part_code: String,
    /// Who made it
    pub manufacturer: String,
    /// Number of units installed
    pub quantity: i32,
    /// Cost per unit
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub cost: Decimal,
    /// When the part was recorded
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Part and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each part belongs to one repair record
    #[sea_orm(
        belongs_to = "super::repair_record::Entity",
        from = "Column::RepairRecordId",
        to = "super::repair_record::Column::Id",
        on_delete = "Cascade"
    )]
    RepairRecord,
}

impl Related<super::repair_record::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RepairRecord.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
