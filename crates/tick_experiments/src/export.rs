//! Report export: one CSV row per seat per run, or the full reports as JSON.

use std::path::Path;

use tick_blackjack::TableReport;

#[path = "export/csv.rs"]
mod csv;
#[path = "export/json.rs"]
mod json;
#[path = "export/writer_utils.rs"]
mod writer_utils;

/// Export reports to CSV with one row per player per run.
///
/// # Errors
///
/// Returns an error if `reports` is empty, or file creation or writing fails.
pub fn export_to_csv(
    reports: &[TableReport],
    path: impl AsRef<Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    writer_utils::ensure_not_empty(reports)?;
    let file = writer_utils::create_output_file(path)?;
    csv::export_to_csv_impl(reports, file)
}

/// Export reports to a pretty-printed JSON array.
///
/// # Errors
///
/// Returns an error if file creation or JSON serialization fails.
pub fn export_to_json(
    reports: &[TableReport],
    path: impl AsRef<Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let file = writer_utils::create_output_file(path)?;
    json::export_to_json_impl(reports, file)
}
