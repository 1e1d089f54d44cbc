//! Repair report aggregation.
//!
//! Collects a car's repairs within an inclusive date range, prices the parts
//! installed during each repair and accumulates period totals. The result is
//! plain data; [`crate::export::excel`] turns it into a workbook.

use crate::{
    core::{ownership::fetch_car, validation::to_money},
    entities::{Part, RepairRecord, car, part, repair_record},
    errors::{Error, Result},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{LoaderTrait, QueryOrder, prelude::*};

/// Date format accepted for the report period.
pub const PERIOD_DATE_FORMAT: &str = "%Y-%m-%d";

/// Placeholder shown in the parts column when a repair used no parts.
pub const NO_PARTS: &str = "-";

/// One repair of the report with its priced parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    /// The repair
    pub record: repair_record::Model,
    /// Parts installed during the repair
    pub parts: Vec<part::Model>,
    /// Sum of unit cost times quantity over `parts`
    pub parts_cost: Decimal,
    /// Human-readable parts summary, or [`NO_PARTS`]
    pub parts_list: String,
}

/// Repair history of one car over a period.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepairReport {
    /// The car being reported on
    pub car: car::Model,
    /// First day of the period
    pub date_from: NaiveDate,
    /// Last day of the period
    pub date_to: NaiveDate,
    /// Repairs ascending by date
    pub rows: Vec<ReportRow>,
    /// Sum of every row's work cost
    pub total_work_cost: Decimal,
    /// Sum of every row's parts cost
    pub total_parts_cost: Decimal,
}

impl RepairReport {
    /// Work and parts together.
    #[must_use]
    pub fn grand_total(&self) -> Decimal {
        to_money(self.total_work_cost + self.total_parts_cost)
    }
}

/// Parses the `date_from`/`date_to` query values.
///
/// # Errors
/// Returns a bad-request error when either value is missing, blank, or not a
/// `YYYY-MM-DD` calendar date.
pub fn parse_report_period(
    date_from: Option<&str>,
    date_to: Option<&str>,
) -> Result<(NaiveDate, NaiveDate)> {
    let (Some(from), Some(to)) = (
        date_from.map(str::trim).filter(|v| !v.is_empty()),
        date_to.map(str::trim).filter(|v| !v.is_empty()),
    ) else {
        return Err(Error::bad_request(
            "Both date_from and date_to must be provided.",
        ));
    };

    let parse = |value: &str| {
        NaiveDate::parse_from_str(value, PERIOD_DATE_FORMAT).map_err(|_| {
            Error::bad_request(format!("Invalid date '{value}'. Use YYYY-MM-DD."))
        })
    };
    Ok((parse(from)?, parse(to)?))
}

/// Quantity used for pricing; unset or non-positive counts as one.
const fn effective_quantity(quantity: i32) -> i32 {
    if quantity > 0 { quantity } else { 1 }
}

/// Total cost of a set of installed parts.
#[must_use]
pub fn parts_cost(parts: &[part::Model]) -> Decimal {
    let total: Decimal = parts
        .iter()
        .map(|p| p.cost * Decimal::from(effective_quantity(p.quantity)))
        .sum();
    to_money(total)
}

/// Renders parts as `"name (code) xN"` joined by `", "`.
#[must_use]
pub fn format_parts_list(parts: &[part::Model]) -> String {
    if parts.is_empty() {
        return NO_PARTS.to_string();
    }
    parts
        .iter()
        .map(|p| {
            format!(
                "{} ({}) x{}",
                p.name,
                p.part_code,
                effective_quantity(p.quantity)
            )
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Builds the repair report of one of the user's cars.
///
/// A period whose start lies after its end selects no repairs.
///
/// # Errors
/// Returns not-found if the car is not the user's.
#[tracing::instrument(skip(db))]
pub async fn generate_repair_report(
    db: &DatabaseConnection,
    user_id: &str,
    car_id: i64,
    date_from: NaiveDate,
    date_to: NaiveDate,
) -> Result<RepairReport> {
    let car = fetch_car(db, user_id, car_id).await?;

    let records = if date_from > date_to {
        Vec::new()
    } else {
        RepairRecord::find()
            .filter(repair_record::Column::CarId.eq(car.id))
            .filter(repair_record::Column::Date.between(date_from, date_to))
            .order_by_asc(repair_record::Column::Date)
            .order_by_asc(repair_record::Column::Id)
            .all(db)
            .await?
    };
    let parts = records
        .load_many(Part::find().order_by_asc(part::Column::Id), db)
        .await?;

    let rows: Vec<ReportRow> = records
        .into_iter()
        .zip(parts)
        .map(|(record, parts)| ReportRow {
            parts_cost: parts_cost(&parts),
            parts_list: format_parts_list(&parts),
            record,
            parts,
        })
        .collect();

    let total_work_cost = to_money(rows.iter().map(|r| r.record.work_cost).sum());
    let total_parts_cost = to_money(rows.iter().map(|r| r.parts_cost).sum());

    tracing::info!(
        car_id,
        repairs = rows.len(),
        %total_work_cost,
        %total_parts_cost,
        "Generated repair report"
    );

    Ok(RepairReport {
        car,
        date_from,
        date_to,
        rows,
        total_work_cost,
        total_parts_cost,
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::{
        repair::create_repair, stock_part::list_stock_parts, transfer::StockPartSelection,
    };
    use crate::test_utils::*;

    fn part(name: &str, code: &str, quantity: i32, cost: &str) -> part::Model {
        part::Model {
            id: 1,
            repair_record_id: 1,
            name: name.to_string(),
            part_code: code.to_string(),
            manufacturer: "Bosch".to_string(),
            quantity,
            cost: money(cost),
            created_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_parse_report_period() {
        let (from, to) = parse_report_period(Some("2024-01-01"), Some("2024-01-31")).unwrap();
        assert_eq!(from, date("2024-01-01"));
        assert_eq!(to, date("2024-01-31"));
    }

    #[test]
    fn test_parse_report_period_rejects_missing_or_malformed() {
        for (from, to) in [
            (None, Some("2024-01-31")),
            (Some("2024-01-01"), None),
            (Some(""), Some("2024-01-31")),
            (Some("01.01.2024"), Some("2024-01-31")),
            (Some("2024-02-30"), Some("2024-03-01")),
        ] {
            let result = parse_report_period(from, to);
            assert!(
                matches!(result, Err(Error::BadRequest { .. })),
                "{from:?}..{to:?}"
            );
        }
    }

    #[test]
    fn test_parts_cost_counts_quantity() {
        let parts = [
            part("Oil Filter", "OF-123", 2, "10.50"),
            part("Drain Plug", "DP-1", 0, "1.25"),
            part("Gasket", "G-7", -3, "0.333"),
        ];
        // 21.00 + 1.25 + 0.333 rounds to 22.58
        assert_eq!(parts_cost(&parts), money("22.58"));
        assert_eq!(parts_cost(&[]), money("0.00"));
    }

    #[test]
    fn test_format_parts_list() {
        assert_eq!(format_parts_list(&[]), "-");
        let parts = [
            part("Oil Filter", "OF-123", 2, "10.50"),
            part("Drain Plug", "DP-1", 0, "1.25"),
        ];
        assert_eq!(
            format_parts_list(&parts),
            "Oil Filter (OF-123) x2, Drain Plug (DP-1) x1"
        );
    }

    #[tokio::test]
    async fn test_report_selects_period_ascending() -> Result<()> {
        let (db, car) = setup_with_car().await?;
        let late = create_test_repair(&db, car.id, "2024-01-31").await?;
        let early = create_test_repair(&db, car.id, "2024-01-01").await?;
        create_test_repair(&db, car.id, "2023-12-31").await?;
        create_test_repair(&db, car.id, "2024-02-01").await?;
        create_custom_part(&db, early.id, "Oil Filter", 2, "10.50").await?;

        let report =
            generate_repair_report(&db, "alice", car.id, date("2024-01-01"), date("2024-01-31"))
                .await?;

        let ids: Vec<_> = report.rows.iter().map(|r| r.record.id).collect();
        assert_eq!(ids, vec![early.id, late.id]);
        assert_eq!(report.rows[0].parts_cost, money("21.00"));
        assert_eq!(report.rows[1].parts_list, "-");
        assert_eq!(report.total_work_cost, money("300.00"));
        assert_eq!(report.total_parts_cost, money("21.00"));
        assert_eq!(report.grand_total(), money("321.00"));

        Ok(())
    }

    #[tokio::test]
    async fn test_inverted_period_is_empty() -> Result<()> {
        let (db, car) = setup_with_car().await?;
        create_test_repair(&db, car.id, "2024-01-10").await?;

        let report =
            generate_repair_report(&db, "alice", car.id, date("2024-02-01"), date("2024-01-01"))
                .await?;
        assert!(report.rows.is_empty());
        assert_eq!(report.grand_total(), money("0.00"));

        Ok(())
    }

    #[tokio::test]
    async fn test_report_of_other_user_not_found() -> Result<()> {
        let (db, car) = setup_with_car().await?;
        let result =
            generate_repair_report(&db, "bob", car.id, date("2024-01-01"), date("2024-01-31"))
                .await;
        assert!(matches!(result, Err(Error::NotFound { resource: "Car", .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_corolla_oil_change_scenario() -> Result<()> {
        let db = setup_test_db().await?;
        let car = crate::core::car::create_car(&db, "alice", car_input("Toyota", "Corolla")).await?;
        let filter =
            create_custom_stock_part(&db, car.id, "Oil Filter", "OF-123", "Bosch", 2, "10.50")
                .await?;

        let mut input = repair_input("2024-01-10", 50_000, "150.00");
        input.work_description = "Oil change".to_string();
        let repair = create_repair(
            &db,
            "alice",
            car.id,
            input,
            &StockPartSelection::new([filter.id]),
        )
        .await?;
        assert_eq!(repair.parts.len(), 1);
        assert!(list_stock_parts(&db, "alice", car.id).await?.is_empty());

        let report =
            generate_repair_report(&db, "alice", car.id, date("2024-01-01"), date("2024-01-31"))
                .await?;
        assert_eq!(report.rows.len(), 1);
        assert_eq!(report.rows[0].parts_cost, money("21.00"));
        assert_eq!(report.rows[0].parts_list, "Oil Filter (OF-123) x2");
        assert_eq!(report.grand_total(), money("171.00"));

        Ok(())
    }
}
