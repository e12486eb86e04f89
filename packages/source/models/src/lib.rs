#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Raw record representation and canonical column names for the Australian
//! road-fatality record set.
//!
//! A [`RawRecord`] is one ingested row: an untyped map of column name to
//! cell text, exactly as materialized from the source CSV. All typing
//! happens later, in the schema normalizer.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Canonical column names as they appear in the source record set.
pub mod columns {
    /// Crash year.
    pub const YEAR: &str = "Year";
    /// Crash month number (1-12).
    pub const MONTH: &str = "Month";
    /// Day of month.
    pub const DAY: &str = "Day";
    /// Day of the week.
    pub const DAYWEEK: &str = "Dayweek";
    /// Clock time, `HH:MM`.
    pub const TIME: &str = "Time";
    /// Participant age.
    pub const AGE: &str = "Age";
    /// Participant gender.
    pub const GENDER: &str = "Gender";
    /// Age-band label.
    pub const AGE_GROUP: &str = "Age Group";
    /// Crash severity category.
    pub const CRASH_SEVERITY: &str = "Crash Severity";
    /// Crash type category.
    pub const CRASH_TYPE: &str = "Crash Type";
    /// Free-text accident description.
    pub const ACCIDENT_DESCRIPTION: &str = "Accident Description";
    /// Coarse time-of-day category.
    pub const TIME_OF_DAY: &str = "Time of day";
    /// Christmas-period yes/no flag.
    pub const CHRISTMAS_PERIOD: &str = "Christmas Period";
    /// Easter-period yes/no flag.
    pub const EASTER_PERIOD: &str = "Easter Period";
}

/// Columns dropped during normalization.
///
/// Their presence in a raw record is ignored and their absence is not an
/// error; either way they never reach the cleaned schema.
pub const DROPPED_COLUMNS: [&str; 6] = [
    "Speed Limit",
    "National Remoteness Areas",
    "SA4 Name 2016",
    "National Road Type",
    "Bus Involvement",
    "Heavy Rigid Truck Involvement",
];

/// One untyped row from the source record set.
///
/// An empty or whitespace-only cell is indistinguishable from an absent
/// column: [`RawRecord::field`] reports both as `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRecord {
    fields: BTreeMap<String, String>,
}

impl RawRecord {
    /// Creates an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a record from `(column, cell)` pairs.
    pub fn from_fields<I>(fields: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Self {
            fields: fields.into_iter().collect(),
        }
    }

    /// Sets a cell value, replacing any existing value for the column.
    pub fn set(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(column.into(), value.into());
    }

    /// Returns the cell for a column, or `None` when the column is absent
    /// or the cell is empty/whitespace-only.
    #[must_use]
    pub fn field(&self, column: &str) -> Option<&str> {
        self.fields
            .get(column)
            .map(String::as_str)
            .filter(|cell| !cell.trim().is_empty())
    }

    /// Whether the column is present at all, even with an empty cell.
    #[must_use]
    pub fn has_column(&self, column: &str) -> bool {
        self.fields.contains_key(column)
    }

    /// Iterates over the column names present in this record.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}
