use std::path::Path;

use calamine::{open_workbook_auto, Data, Range, Reader};
use chrono::{NaiveDate, NaiveDateTime};
use tracing::{debug, trace};

use crate::{
    error::{Error, Result},
    timetable::models::{Cell, Row, TimeSlot, SLOT_COUNT},
};

/// Extensions of the workbooks we can read
const EXTENSIONS: [&str; 2] = ["xlsx", "xls"];

/// Date, then a data column and a gap column for each slot, without the last gap
pub const COLUMNS: u32 = 2 * SLOT_COUNT as u32;

/// Read the rows of a timetable workbook
pub fn grid(path: &Path, sheet_name: Option<&str>, skip_rows: usize) -> Result<Vec<Row>> {
    if !is_supported(path) {
        return Err(Error::UnsupportedFile(path.to_path_buf()));
    }

    let mut workbook = open_workbook_auto(path)?;
    let range = match sheet_name {
        Some(name) => {
            if !workbook.sheet_names().iter().any(|sheet| sheet == name) {
                return Err(Error::SheetNotFound(name.to_owned()));
            }
            workbook.worksheet_range(name)?
        }
        None => workbook.worksheet_range_at(0).ok_or(Error::EmptyWorkbook)??,
    };

    debug!(path = %path.display(), start = ?range.start(), end = ?range.end(), "sheet opened");

    Ok(rows(&range, skip_rows))
}

/// Check the extension of the file, whatever its case
fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| EXTENSIONS.iter().any(|ok| ext.eq_ignore_ascii_case(ok)))
}

/// Map the sheet's cells to rows, skipping the headers and the blank lines
fn rows(range: &Range<Data>, skip_rows: usize) -> Vec<Row> {
    let Some((_, end)) = range.start().zip(range.end()) else {
        return vec![];
    };

    // Positions are absolute so the headers are skipped even when the sheet
    // doesn't start at the first line
    let first = u32::try_from(skip_rows).unwrap_or(u32::MAX);

    let mut rows = vec![];
    for line in first..=end.0 {
        let cells: Vec<Cell> = (0..COLUMNS)
            .map(|column| range.get_value((line, column)).map_or(Cell::Empty, cell))
            .collect();

        if cells.iter().all(Cell::is_blank) {
            trace!(line, "blank row dropped");
            continue;
        }

        let mut row = Row {
            date: cells[0].clone(),
            ..Row::default()
        };
        for slot in TimeSlot::all() {
            row.slots[slot.index()] = cells[1 + 2 * slot.index()].clone();
        }
        rows.push(row);
    }

    rows
}

/// Convert a spreadsheet value
fn cell(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
        #[allow(clippy::cast_precision_loss)]
        Data::Int(n) => Cell::Number(*n as f64),
        Data::Float(n) => Cell::Number(*n),
        Data::Bool(b) => Cell::Text(b.to_string()),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map_or(Cell::Number(dt.as_f64()), Cell::DateTime),
        Data::DateTimeIso(s) => {
            iso_datetime(s).map_or_else(|| Cell::Text(s.clone()), Cell::DateTime)
        }
        Data::Error(e) => {
            trace!(error = ?e, "cell with an error value");
            Cell::Empty
        }
    }
}

/// Parse an ISO 8601 date, with or without its time
fn iso_datetime(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}
