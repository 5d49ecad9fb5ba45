use std::collections::{BTreeSet, HashMap};

use crate::chart::model::{Series, TimeWindow};
use crate::chart::time_format::TimeFormatter;
use crate::error::{AppError, AppResult};

pub const CSV_FILE_NAME: &str = "temperature_data.csv";
pub const CSV_CONTENT_TYPE: &str = "text/csv";

/// Wide CSV of the visible series aligned on the union of their timestamps.
///
/// One row per distinct timestamp (ascending). A series without a sample at
/// that instant gets an empty cell; duplicates resolve to the first sample.
///
/// # Errors
///
/// Returns `AppError::EmptySelection` when `visible` is empty.
pub fn export_csv(
    formatter: &TimeFormatter,
    visible: &[&Series],
    window: &TimeWindow,
) -> AppResult<String> {
    if visible.is_empty() {
        return Err(AppError::EmptySelection);
    }

    let timestamps: BTreeSet<i64> = visible
        .iter()
        .flat_map(|s| s.samples.iter().map(|p| p.timestamp))
        .collect();

    // First sample wins for duplicated timestamps.
    let lookups: Vec<HashMap<i64, f64>> = visible
        .iter()
        .map(|s| {
            let mut by_time = HashMap::with_capacity(s.samples.len());
            for sample in &s.samples {
                by_time.entry(sample.timestamp).or_insert(sample.value);
            }
            by_time
        })
        .collect();

    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(std::iter::once("Time").chain(visible.iter().map(|s| s.name.as_str())))?;

    for ts in &timestamps {
        let mut row = Vec::with_capacity(visible.len() + 1);
        row.push(formatter.format(ts.saturating_mul(1000), window));
        row.extend(
            lookups
                .iter()
                .map(|by_time| by_time.get(ts).map(ToString::to_string).unwrap_or_default()),
        );
        writer.write_record(&row)?;
    }

    tracing::debug!(
        rows = timestamps.len(),
        columns = visible.len() + 1,
        "CSV export built"
    );

    let bytes = writer
        .into_inner()
        .map_err(|e| AppError::Internal(format!("Failed to flush CSV writer: {e}")))?;
    String::from_utf8(bytes).map_err(|e| AppError::Internal(e.to_string()))
}
