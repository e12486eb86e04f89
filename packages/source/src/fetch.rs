//! Raw record acquisition.
//!
//! Materializes the crash record CSV into [`RawRecord`]s, either from the
//! published URL or from a local file. The header row defines column names;
//! empty cells are left out of the record so they read as absent.

use std::io::Read;
use std::path::Path;

use crash_stats_source_models::RawRecord;

use crate::SourceError;

/// Fetches the record set from a URL.
///
/// # Errors
///
/// Returns [`SourceError`] if the request fails, the server responds with a
/// non-success status, or the body is not valid CSV.
pub async fn fetch_records(url: &str) -> Result<Vec<RawRecord>, SourceError> {
    log::info!("Fetching crash records from {url}");
    let response = reqwest::get(url).await?.error_for_status()?;
    let body = response.text().await?;
    let records = parse_csv(body.as_bytes())?;
    log::info!("Fetched {} raw records", records.len());
    Ok(records)
}

/// Reads the record set from a local CSV file.
///
/// # Errors
///
/// Returns [`SourceError`] if the file cannot be opened or is not valid CSV.
pub fn read_records(path: &Path) -> Result<Vec<RawRecord>, SourceError> {
    log::info!("Reading crash records from {}", path.display());
    let file = std::fs::File::open(path)?;
    parse_csv(std::io::BufReader::new(file))
}

/// Parses CSV text into raw records.
///
/// Rows shorter than the header are tolerated; the trailing columns are
/// simply absent from the record.
///
/// # Errors
///
/// Returns [`SourceError`] if the header or a row cannot be read.
pub fn parse_csv<R: Read>(reader: R) -> Result<Vec<RawRecord>, SourceError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);
    let headers = csv_reader.headers()?.clone();

    let mut records = Vec::new();
    for row in csv_reader.records() {
        let row = row?;
        let mut record = RawRecord::new();
        for (column, cell) in headers.iter().zip(row.iter()) {
            if !cell.trim().is_empty() {
                record.set(column, cell);
            }
        }
        records.push(record);
    }
    Ok(records)
}
