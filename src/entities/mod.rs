//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod car;
pub mod part;
pub mod repair_record;
pub mod stock_part;

// Re-export specific types to avoid conflicts
pub use car::{Column as CarColumn, Entity as Car, Model as CarModel};
pub use part::{Column as PartColumn, Entity as Part, Model as PartModel};
pub use repair_record::{
    Column as RepairRecordColumn, Entity as RepairRecord, Model as RepairRecordModel,
};
pub use stock_part::{Column as StockPartColumn, Entity as StockPart, Model as StockPartModel};
