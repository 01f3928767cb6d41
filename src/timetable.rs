use std::path::Path;

use tracing::{debug, info};

use crate::{error::Result, sheet};

pub mod models;

use models::{Cell, Entry, Extraction, Row, TimeSlot};

/// Load the timetable stored in a workbook
pub fn timetable(
    path: &Path,
    sheet_name: Option<&str>,
    skip_rows: usize,
) -> Result<Extraction> {
    let grid = sheet::grid(path, sheet_name, skip_rows)?;
    let extraction = extract(&grid);

    info!(
        rows = grid.len(),
        entries = extraction.entries.len(),
        skipped = extraction.skipped,
        "timetable extracted"
    );

    Ok(extraction)
}

/// Turn the rows of the grid into a flat list of entries
pub fn extract(grid: &[Row]) -> Extraction {
    let mut extraction = Extraction::default();

    // Rows without a date belong to the last dated row
    let mut current_date: Option<String> = None;

    for (i, row) in grid.iter().enumerate() {
        if !row.date.is_blank() {
            current_date = normalize_date(&row.date);
        }

        for (slot, cell) in TimeSlot::all().zip(&row.slots) {
            if cell.is_blank() {
                continue;
            }

            let Some(date) = &current_date else {
                debug!(row = i, slot = %slot, "course found before any date");
                extraction.skipped += 1;
                continue;
            };

            match course(cell) {
                Some((code, name, departments_sections)) => extraction.entries.push(Entry {
                    date: date.clone(),
                    time: slot,
                    code,
                    name,
                    departments_sections,
                }),
                None => {
                    debug!(row = i, slot = %slot, "cell without a course name");
                    extraction.skipped += 1;
                }
            }
        }
    }

    extraction
}

/// Canonical representation of a date cell
fn normalize_date(cell: &Cell) -> Option<String> {
    match cell {
        Cell::DateTime(dt) => Some(dt.format("%Y-%m-%d").to_string()),
        other => other.text().map(|text| text.into_owned()),
    }
}

/// Split a cell into its code, name and the departments/sections
///
/// A cell needs at least two lines: the first one is the code and the second
/// one the name. Every other non-blank line is a department or section.
fn course(cell: &Cell) -> Option<(String, String, Vec<String>)> {
    let text = cell.text()?;
    let mut lines = text.split('\n');

    let code = lines.next()?.trim().to_owned();
    let name = lines.next()?.trim().to_owned();
    let departments_sections = lines
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_owned)
        .collect();

    Some((code, name, departments_sections))
}
