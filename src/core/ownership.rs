//! Owner-scoped lookups.
//!
//! Every entity hangs off exactly one owner: cars off a user, repair records and
//! stock parts off a car, parts off a repair record. [`fetch_owned`] loads an
//! entity by id *and* owner in one query, so a row that exists but belongs to
//! someone else is reported exactly like a row that does not exist.

use crate::{
    entities::{Car, Part, RepairRecord, StockPart, car, part, repair_record, stock_part},
    errors::{Error, Result},
};
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Value};

/// An entity whose rows belong to a single owner.
pub trait Owned: EntityTrait {
    /// Type of the owner key (user id or parent row id).
    type Owner: Into<Value> + Send;

    /// Resource name used in not-found errors.
    const RESOURCE: &'static str;

    /// Primary key column.
    fn id_column() -> Self::Column;

    /// Column holding the owner key.
    fn owner_column() -> Self::Column;
}

impl Owned for Car {
    type Owner = String;
    const RESOURCE: &'static str = "Car";

    fn id_column() -> Self::Column {
        car::Column::Id
    }

    fn owner_column() -> Self::Column {
        car::Column::UserId
    }
}

impl Owned for RepairRecord {
    type Owner = i64;
    const RESOURCE: &'static str = "Repair record";

    fn id_column() -> Self::Column {
        repair_record::Column::Id
    }

    fn owner_column() -> Self::Column {
        repair_record::Column::CarId
    }
}

impl Owned for Part {
    type Owner = i64;
    const RESOURCE: &'static str = "Part";

    fn id_column() -> Self::Column {
        part::Column::Id
    }

    fn owner_column() -> Self::Column {
        part::Column::RepairRecordId
    }
}

impl Owned for StockPart {
    type Owner = i64;
    const RESOURCE: &'static str = "Stock part";

    fn id_column() -> Self::Column {
        stock_part::Column::Id
    }

    fn owner_column() -> Self::Column {
        stock_part::Column::CarId
    }
}

/// Loads entity `E` with primary key `id` belonging to `owner`.
///
/// # Errors
/// Returns [`Error::NotFound`] if no such row exists under that owner.
pub async fn fetch_owned<E, C>(db: &C, id: i64, owner: E::Owner) -> Result<E::Model>
where
    E: Owned,
    C: ConnectionTrait,
{
    E::find()
        .filter(E::id_column().eq(id))
        .filter(E::owner_column().eq(owner))
        .one(db)
        .await?
        .ok_or(Error::NotFound {
            resource: E::RESOURCE,
            id,
        })
}

/// Loads a car owned by `user_id`.
pub async fn fetch_car<C>(db: &C, user_id: &str, car_id: i64) -> Result<car::Model>
where
    C: ConnectionTrait,
{
    fetch_owned::<Car, _>(db, car_id, user_id.to_string()).await
}

/// Loads a repair record of a car owned by `user_id`, checking the whole chain.
pub async fn fetch_repair<C>(
    db: &C,
    user_id: &str,
    car_id: i64,
    record_id: i64,
) -> Result<(car::Model, repair_record::Model)>
where
    C: ConnectionTrait,
{
    let car = fetch_car(db, user_id, car_id).await?;
    let record = fetch_owned::<RepairRecord, _>(db, record_id, car.id).await?;
    Ok((car, record))
}
