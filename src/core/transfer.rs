//! Stock-to-installed parts transfer.
//!
//! When a repair record is created or replaced the caller may name stock parts
//! that were used for the job. Each named stock part of the record's car is
//! turned into an installed [`part`] on the record and removed from stock. The
//! move happens inside the caller's database transaction, so a failure anywhere
//! leaves neither a duplicated nor a lost part.
//!
//! Selection is permissive: anything that is not a list selects nothing, list
//! elements that are not integer ids are skipped, and ids that do not resolve to
//! stock of the record's car are ignored. Re-sending an id that was already
//! transferred is therefore a no-op.

use crate::{
    entities::{StockPart, part, repair_record, stock_part},
    errors::Result,
};
use sea_orm::{DatabaseTransaction, QueryOrder, Set, prelude::*};
use serde::{Deserialize, Deserializer};
use std::collections::BTreeSet;

/// Stock part ids a caller wants moved into a repair record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StockPartSelection(BTreeSet<i64>);

impl StockPartSelection {
    /// Builds a selection from ids; duplicates collapse.
    pub fn new(ids: impl IntoIterator<Item = i64>) -> Self {
        Self(ids.into_iter().collect())
    }

    /// Interprets an arbitrary JSON value as a selection.
    ///
    /// Only arrays select anything. Integer elements and strings holding an
    /// integer are kept; every other element is dropped.
    #[must_use]
    pub fn from_json(value: &serde_json::Value) -> Self {
        let serde_json::Value::Array(items) = value else {
            return Self::default();
        };

        Self::new(items.iter().filter_map(|item| match item {
            serde_json::Value::Number(n) => n.as_i64(),
            serde_json::Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }))
    }

    /// Selected ids in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = i64> + '_ {
        self.0.iter().copied()
    }

    /// True when `id` is selected.
    #[must_use]
    pub fn contains(&self, id: i64) -> bool {
        self.0.contains(&id)
    }

    /// True when nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of distinct ids selected.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl<'de> Deserialize<'de> for StockPartSelection {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(Self::from_json(&value))
    }
}

/// Moves the selected stock parts of the record's car into `record`.
///
/// For every selected id that resolves to a stock part of `record.car_id`, an
/// installed part with the same name, code, manufacturer, quantity and unit cost
/// is attached to the record and the stock part is deleted. Nothing is committed
/// here; the caller owns `txn`.
///
/// # Returns
/// The number of parts transferred.
pub async fn transfer_stock_parts(
    txn: &DatabaseTransaction,
    record: &repair_record::Model,
    selection: &StockPartSelection,
) -> Result<u64> {
    if selection.is_empty() {
        return Ok(0);
    }

    // Selection size is unbounded, so ids are matched in memory
    let stock: Vec<_> = StockPart::find()
        .filter(stock_part::Column::CarId.eq(record.car_id))
        .order_by_asc(stock_part::Column::Id)
        .all(txn)
        .await?
        .into_iter()
        .filter(|item| selection.contains(item.id))
        .collect();

    let now = chrono::Utc::now();
    let mut transferred = 0;
    for item in stock {
        let stock_part_id = item.id;
        let installed = part::ActiveModel {
            repair_record_id: Set(record.id),
            name: Set(item.name.clone()),
            part_code: Set(item.part_code.clone()),
            manufacturer: Set(item.manufacturer.clone()),
            quantity: Set(item.quantity),
            cost: Set(item.cost),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(txn)
        .await?;

        item.delete(txn).await?;
        transferred += 1;

        tracing::debug!(
            stock_part_id,
            part_id = installed.id,
            record_id = record.id,
            "Moved stock part into repair"
        );
    }

    let ignored = selection.len() as u64 - transferred;
    if ignored > 0 {
        tracing::debug!(ignored, record_id = record.id, "Ignored unresolved stock part ids");
    }

    Ok(transferred)
}
