//! CSV export of the sorted result set

use std::fs::File;
use std::io::Write;
use std::path::Path;

use neo_core::format::format_hazardous;
use neo_core::{Dimension, NeoItem, NeosResponse, PageState};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to write export file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode CSV: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Serialize)]
struct ExportRow<'a> {
    id: &'a str,
    name: &'a str,
    size: f64,
    closeness: f64,
    velocity: f64,
    hazardous: &'static str,
}

/// Write every row in display order, in the state's unit system.
///
/// Pagination is ignored; returns the number of rows written.
pub fn write_csv<W: Write>(writer: W, items: &[NeoItem], state: &PageState) -> Result<usize, ExportError> {
    let unit = state.unit();
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    let mut header = vec!["ID".to_string(), "Name".to_string()];
    header.extend(
        Dimension::ALL
            .iter()
            .map(|d| format!("{} ({})", d.title(), d.suffix(unit))),
    );
    header.push("Hazardous".to_string());
    csv_writer.write_record(&header)?;

    let rows = state.sorted_rows(items);
    for item in &rows {
        csv_writer.serialize(ExportRow {
            id: &item.id,
            name: &item.name,
            size: item.measure(Dimension::Size, unit),
            closeness: item.measure(Dimension::Closeness, unit),
            velocity: item.measure(Dimension::Velocity, unit),
            hazardous: format_hazardous(item.hazardous),
        })?;
    }

    csv_writer.flush()?;
    Ok(rows.len())
}

/// Write the export to a file at `path`
pub fn export_csv(path: &Path, items: &[NeoItem], state: &PageState) -> Result<usize, ExportError> {
    let file = File::create(path)?;
    let written = write_csv(file, items, state)?;
    tracing::info!(path = %path.display(), rows = written, "exported results");
    Ok(written)
}

/// Suggested file name, e.g. `neos_2024-01-01_2024-01-08.csv`
pub fn default_file_name(response: &NeosResponse) -> String {
    format!("neos_{}_{}.csv", response.start_date, response.end_date)
}
