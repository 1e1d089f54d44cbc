//! Request and response bodies of the HTTP API.
//!
//! Responses expose the stored rows minus ownership columns, with every
//! monetary value normalised to two fraction digits.

use crate::{
    core::{
        repair::{RepairInput, RepairWithParts},
        transfer::StockPartSelection,
        validation::to_money,
    },
    entities::{car, part, stock_part},
    errors::Error,
};
use axum::extract::{FromRequest, FromRequestParts};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// JSON body extractor whose rejections become 400 [`Error::BadRequest`]s.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(Error))]
pub struct ApiJson<T>(pub T);

/// Path parameter extractor whose rejections become 400 [`Error::BadRequest`]s.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(Error))]
pub struct ApiPath<T>(pub T);

/// Body of repair record create and replace.
#[derive(Debug, Clone, Deserialize)]
pub struct RepairRecordRequest {
    /// Day the work was done
    pub date: NaiveDate,
    /// Odometer reading
    pub mileage: i32,
    /// What was done
    pub work_description: String,
    /// Labour cost
    pub work_cost: Decimal,
    /// Stock parts used for the job
    #[serde(default)]
    pub stock_part_ids: StockPartSelection,
}

impl RepairRecordRequest {
    /// Splits the body into the record fields and the stock selection.
    #[must_use]
    pub fn into_parts(self) -> (RepairInput, StockPartSelection) {
        (
            RepairInput {
                date: self.date,
                mileage: self.mileage,
                work_description: self.work_description,
                work_cost: self.work_cost,
            },
            self.stock_part_ids,
        )
    }
}

/// Query string of the report export.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportQuery {
    /// First day, `YYYY-MM-DD`
    pub date_from: Option<String>,
    /// Last day, `YYYY-MM-DD`
    pub date_to: Option<String>,
}

/// A car as returned to its owner.
#[derive(Debug, Clone, Serialize)]
pub struct CarResponse {
    /// Car id
    pub id: i64,
    /// Manufacturer
    pub brand: String,
    /// Model name
    pub model: String,
    /// Vehicle identification number
    pub vin: String,
    /// Model year
    pub year: Option<i32>,
    /// Engine power, hp
    pub power: Option<i32>,
    /// Front tire size
    pub tire_front: Option<String>,
    /// Rear tire size
    pub tire_rear: Option<String>,
    /// Wiper blade sizes
    pub wipers: Option<String>,
    /// Free-form notes
    pub notes: Option<String>,
    /// When the row was created
    pub created_at: DateTime<Utc>,
    /// When the row was last replaced
    pub updated_at: DateTime<Utc>,
}

impl From<car::Model> for CarResponse {
    fn from(car: car::Model) -> Self {
        Self {
            id: car.id,
            brand: car.brand,
            model: car.model_name,
            vin: car.vin,
            year: car.year,
            power: car.power,
            tire_front: car.tire_front,
            tire_rear: car.tire_rear,
            wipers: car.wipers,
            notes: car.notes,
            created_at: car.created_at,
            updated_at: car.updated_at,
        }
    }
}

/// An installed part.
#[derive(Debug, Clone, Serialize)]
pub struct PartResponse {
    /// Part id
    pub id: i64,
    /// Part name
    pub name: String,
    /// Catalogue code
    pub part_code: String,
    /// Part maker
    pub manufacturer: String,
    /// Units installed
    pub quantity: i32,
    /// Unit cost
    pub cost: Decimal,
    /// When the row was created
    pub created_at: DateTime<Utc>,
}

impl From<part::Model> for PartResponse {
    fn from(part: part::Model) -> Self {
        Self {
            id: part.id,
            name: part.name,
            part_code: part.part_code,
            manufacturer: part.manufacturer,
            quantity: part.quantity,
            cost: to_money(part.cost),
            created_at: part.created_at,
        }
    }
}

/// A repair record with its installed parts nested.
#[derive(Debug, Clone, Serialize)]
pub struct RepairRecordResponse {
    /// Record id
    pub id: i64,
    /// Day the work was done
    pub date: NaiveDate,
    /// Odometer reading
    pub mileage: i32,
    /// What was done
    pub work_description: String,
    /// Labour cost
    pub work_cost: Decimal,
    /// Installed parts, newest first
    pub parts: Vec<PartResponse>,
    /// When the row was created
    pub created_at: DateTime<Utc>,
    /// When the row was last replaced
    pub updated_at: DateTime<Utc>,
}

impl From<RepairWithParts> for RepairRecordResponse {
    fn from(RepairWithParts { record, parts }: RepairWithParts) -> Self {
        Self {
            id: record.id,
            date: record.date,
            mileage: record.mileage,
            work_description: record.work_description,
            work_cost: to_money(record.work_cost),
            parts: parts.into_iter().map(PartResponse::from).collect(),
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

/// A part in stock.
#[derive(Debug, Clone, Serialize)]
pub struct StockPartResponse {
    /// Stock part id
    pub id: i64,
    /// Part name
    pub name: String,
    /// Catalogue code
    pub part_code: String,
    /// Part maker
    pub manufacturer: String,
    /// Units on hand
    pub quantity: i32,
    /// Unit cost
    pub cost: Decimal,
    /// Day it was bought
    pub purchase_date: Option<NaiveDate>,
    /// Free-form notes
    pub notes: Option<String>,
    /// When the row was created
    pub created_at: DateTime<Utc>,
}

impl From<stock_part::Model> for StockPartResponse {
    fn from(stock: stock_part::Model) -> Self {
        Self {
            id: stock.id,
            name: stock.name,
            part_code: stock.part_code,
            manufacturer: stock.manufacturer,
            quantity: stock.quantity,
            cost: to_money(stock.cost),
            purchase_date: stock.purchase_date,
            notes: stock.notes,
            created_at: stock.created_at,
        }
    }
}
