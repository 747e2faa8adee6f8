//! `.xlsx` decoding into a [`RawTable`].
//!
//! Only the first worksheet is read. Its first row is the header and every
//! following row that holds at least one value becomes a table row.

use std::io::Cursor;

use calamine::{open_workbook_from_rs, Data, Reader, Xlsx};
use chrono::{Days, NaiveDate};

use crate::error::CoreError;
use crate::table::{RawCell, RawTable};

/// Excel's day zero for the 1900 date system (serial `1.0` is 1899-12-31,
/// with the phantom 1900-02-29 folded into this offset for modern dates).
const EXCEL_EPOCH: (i32, u32, u32) = (1899, 12, 30);

/// Decode the first worksheet of an `.xlsx` workbook.
pub fn decode_xlsx(bytes: &[u8]) -> Result<RawTable, CoreError> {
    let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes))
        .map_err(|e| CoreError::Decode(format!("not a readable xlsx workbook: {e}")))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| CoreError::Decode("workbook has no worksheets".to_string()))?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| CoreError::Decode(format!("failed to read sheet '{sheet_name}': {e}")))?;

    let mut rows = range.rows();
    let header: Vec<String> = match rows.next() {
        Some(cells) => cells
            .iter()
            .map(|cell| convert_cell(cell).text().unwrap_or_default().into_owned())
            .collect(),
        None => Vec::new(),
    };

    let mut table = RawTable::new(header);
    for cells in rows {
        let row: Vec<RawCell> = cells.iter().map(convert_cell).collect();
        if row.iter().all(RawCell::is_empty) {
            continue;
        }
        table.push_row(row);
    }

    Ok(table)
}

/// Map a calamine cell onto the loose cell model the pipeline reads.
fn convert_cell(cell: &Data) -> RawCell {
    match cell {
        Data::Empty | Data::Error(_) => RawCell::Empty,
        Data::String(s) => RawCell::Text(s.clone()),
        Data::Int(i) => RawCell::Number(*i as f64),
        Data::Float(f) => RawCell::Number(*f),
        Data::Bool(b) => RawCell::Text(b.to_string()),
        Data::DateTime(dt) => match serial_to_date(dt.as_f64()) {
            Some(date) => RawCell::Text(date.format("%Y-%m-%d").to_string()),
            None => RawCell::Number(dt.as_f64()),
        },
        Data::DateTimeIso(s) => RawCell::Text(s.split('T').next().unwrap_or(s).to_string()),
        Data::DurationIso(s) => RawCell::Text(s.clone()),
    }
}

/// Calendar date of an Excel serial number; the time of day is dropped.
fn serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || serial < 0.0 {
        return None;
    }
    let (y, m, d) = EXCEL_EPOCH;
    NaiveDate::from_ymd_opt(y, m, d)?.checked_add_days(Days::new(serial.floor() as u64))
}
