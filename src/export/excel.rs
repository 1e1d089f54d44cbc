//! Excel export of repair reports.
//!
//! Renders a [`RepairReport`] into a single-sheet workbook held in memory. The
//! layout is fixed: three merged heading lines, a blank row, the column header
//! row, one row per repair, a blank row, the totals row and the grand total.

use crate::{core::report::RepairReport, errors::Result};
use rust_decimal::{Decimal, prelude::ToPrimitive};
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook, Worksheet};

/// MIME type of the produced workbook.
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

const SHEET_NAME: &str = "Repair report";
const MONEY_FORMAT: &str = "#,##0.00";
const DISPLAY_DATE_FORMAT: &str = "%d.%m.%Y";
const HEADER_FILL: u32 = 0x00_BF_A5;

const HEADERS: [&str; 6] = [
    "Date",
    "Mileage (km)",
    "Work Description",
    "Work Cost",
    "Parts",
    "Parts Cost",
];
const COLUMN_WIDTHS: [f64; 6] = [12.0, 15.0, 40.0, 20.0, 30.0, 20.0];

const LAST_COL: u16 = 5;
const HEADER_ROW: u32 = 4;
const FIRST_DATA_ROW: u32 = HEADER_ROW + 1;

/// Cell formats used by the report.
struct Styles {
    title: Format,
    subtitle: Format,
    header: Format,
    cell: Format,
    money: Format,
    total_label: Format,
    total_money: Format,
    grand_money: Format,
}

impl Styles {
    fn new() -> Self {
        let cell = Format::new().set_border(FormatBorder::Thin);
        Self {
            title: Format::new().set_bold().set_font_size(14),
            subtitle: Format::new().set_font_size(11),
            header: Format::new()
                .set_bold()
                .set_font_size(12)
                .set_font_color(Color::White)
                .set_background_color(Color::RGB(HEADER_FILL))
                .set_border(FormatBorder::Thin)
                .set_align(FormatAlign::Center)
                .set_align(FormatAlign::VerticalCenter),
            money: cell.clone().set_num_format(MONEY_FORMAT),
            cell,
            total_label: Format::new().set_bold().set_font_size(12),
            total_money: Format::new().set_bold().set_num_format(MONEY_FORMAT),
            grand_money: Format::new()
                .set_bold()
                .set_font_size(12)
                .set_num_format(MONEY_FORMAT),
        }
    }
}

fn to_cell_number(value: Decimal) -> f64 {
    value.to_f64().unwrap_or_default()
}

/// Renders the report as xlsx bytes.
///
/// # Errors
/// Returns a spreadsheet error if the workbook cannot be assembled.
pub fn render_repair_report(report: &RepairReport) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    let styles = Styles::new();
    write_heading(sheet, report, &styles)?;
    let next_row = write_rows(sheet, report, &styles)?;
    write_totals(sheet, report, &styles, next_row + 1)?;

    for (col, width) in (0u16..).zip(COLUMN_WIDTHS) {
        sheet.set_column_width(col, width)?;
    }

    let bytes = workbook.save_to_buffer()?;
    tracing::debug!(
        car_id = report.car.id,
        rows = report.rows.len(),
        bytes = bytes.len(),
        "Rendered repair report workbook"
    );
    Ok(bytes)
}

fn write_heading(sheet: &mut Worksheet, report: &RepairReport, styles: &Styles) -> Result<()> {
    let car = &report.car;
    let title = format!("Repair report: {} {}", car.brand, car.model_name);
    let vin = format!("VIN: {}", car.vin);
    let period = format!(
        "Period: {} - {}",
        report.date_from.format(DISPLAY_DATE_FORMAT),
        report.date_to.format(DISPLAY_DATE_FORMAT)
    );

    sheet.merge_range(0, 0, 0, LAST_COL, &title, &styles.title)?;
    sheet.merge_range(1, 0, 1, LAST_COL, &vin, &styles.subtitle)?;
    sheet.merge_range(2, 0, 2, LAST_COL, &period, &styles.subtitle)?;

    for (col, header) in (0u16..).zip(HEADERS) {
        sheet.write_string_with_format(HEADER_ROW, col, header, &styles.header)?;
    }
    Ok(())
}

/// Writes one row per repair and returns the first row after them.
fn write_rows(sheet: &mut Worksheet, report: &RepairReport, styles: &Styles) -> Result<u32> {
    let mut row = FIRST_DATA_ROW;
    for entry in &report.rows {
        let record = &entry.record;
        let day = record.date.format(DISPLAY_DATE_FORMAT).to_string();

        sheet.write_string_with_format(row, 0, &day, &styles.cell)?;
        sheet.write_number_with_format(row, 1, f64::from(record.mileage), &styles.cell)?;
        sheet.write_string_with_format(row, 2, &record.work_description, &styles.cell)?;
        sheet.write_number_with_format(row, 3, to_cell_number(record.work_cost), &styles.money)?;
        sheet.write_string_with_format(row, 4, &entry.parts_list, &styles.cell)?;
        sheet.write_number_with_format(row, 5, to_cell_number(entry.parts_cost), &styles.money)?;
        row += 1;
    }
    Ok(row)
}

fn write_totals(
    sheet: &mut Worksheet,
    report: &RepairReport,
    styles: &Styles,
    row: u32,
) -> Result<()> {
    sheet.write_string_with_format(row, 2, "TOTAL:", &styles.total_label)?;
    sheet.write_number_with_format(
        row,
        3,
        to_cell_number(report.total_work_cost),
        &styles.total_money,
    )?;
    sheet.write_number_with_format(
        row,
        5,
        to_cell_number(report.total_parts_cost),
        &styles.total_money,
    )?;

    let grand_row = row + 1;
    sheet.merge_range(grand_row, 2, grand_row, 3, "GRAND TOTAL:", &styles.total_label)?;
    sheet.merge_range(grand_row, 4, grand_row, 5, "", &styles.grand_money)?;
    sheet.write_number_with_format(
        grand_row,
        4,
        to_cell_number(report.grand_total()),
        &styles.grand_money,
    )?;
    Ok(())
}

/// Keeps ASCII alphanumerics, `-` and `_`; whitespace becomes `_`.
fn sanitize_filename_part(value: &str) -> String {
    value
        .trim()
        .chars()
        .filter_map(|c| {
            if c.is_whitespace() {
                Some('_')
            } else if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                Some(c)
            } else {
                None
            }
        })
        .collect()
}

/// Download filename, e.g. `report_Toyota_Corolla_20240101_20240131.xlsx`.
#[must_use]
pub fn report_filename(report: &RepairReport) -> String {
    format!(
        "report_{}_{}_{}_{}.xlsx",
        sanitize_filename_part(&report.car.brand),
        sanitize_filename_part(&report.car.model_name),
        report.date_from.format("%Y%m%d"),
        report.date_to.format("%Y%m%d")
    )
}
