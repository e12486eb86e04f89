#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Crash record acquisition and schema normalization.
//!
//! Acquisition ([`fetch`]) materializes the public road-fatality CSV into
//! untyped [`crash_stats_source_models::RawRecord`]s, from a URL or a local
//! file. Normalization ([`normalize`]) projects each raw row into the typed
//! [`crash_stats_crash_models::CleanedRecord`] schema. The analytical crates
//! never see raw records and never perform I/O.

pub mod fetch;
pub mod normalize;
pub mod parsing;

use thiserror::Error;

/// URL of the published crash record CSV.
pub const DEFAULT_DATA_URL: &str =
    "https://raw.githubusercontent.com/Gumierow/P2_DS/refs/heads/main/Crash_Data.csv";

/// Errors that can occur while acquiring raw records.
#[derive(Debug, Error)]
pub enum SourceError {
    /// HTTP fetch failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// CSV was malformed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Local file could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A required column failed integer coercion somewhere in the batch.
///
/// Raised only for the `Year` column, which the record set guarantees to be
/// present and well-formed; a violation fails the whole normalization run
/// rather than the single record, so downstream statistics never run over a
/// dataset with a silently skewed year distribution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("required column '{column}' is unparseable at row {row}: {value:?}")]
pub struct SchemaError {
    /// The offending column name.
    pub column: &'static str,
    /// Zero-based row index of the first offending record.
    pub row: usize,
    /// The raw cell value, `None` when the cell was absent.
    pub value: Option<String>,
}
