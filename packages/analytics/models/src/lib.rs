#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Result value types for the crash statistics pipeline.
//!
//! These are plain data values computed on demand by the analytics crate and
//! rendered by the presentation layer. They carry no identity beyond their
//! contents and are never cached.

use serde::{Deserialize, Serialize};

/// One group in an [`AggregationResult`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregationEntry {
    /// Group key (a year, month number, weekday, gender label, ...).
    pub key: String,
    /// Count or percentage for the group.
    pub value: f64,
}

/// An ordered group-key → value mapping.
///
/// Entry order is a guarantee, not an artifact: chronological for
/// year/month group-bys, frequency or first-appearance order for
/// categorical ones. The producer decides; consumers render in order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregationResult {
    /// Ordered entries.
    pub entries: Vec<AggregationEntry>,
}

impl AggregationResult {
    /// Creates an empty result.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Appends a group entry, preserving insertion order.
    pub fn push(&mut self, key: impl Into<String>, value: f64) {
        self.entries.push(AggregationEntry {
            key: key.into(),
            value,
        });
    }

    /// Looks a group's value up by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|entry| entry.key == key)
            .map(|entry| entry.value)
    }

    /// Group keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.key.as_str())
    }

    /// Number of groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the result has no groups.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for AggregationResult {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        let mut result = Self::new();
        for (key, value) in iter {
            result.push(key, value);
        }
        result
    }
}

/// A two-key cross-tabulation with a dense, zero-filled count grid.
///
/// `counts[r][c]` is the count for `(row_keys[r], col_keys[c])`; key order
/// follows first appearance in the aggregated data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrossTabulation {
    /// Ordered first-key labels.
    pub row_keys: Vec<String>,
    /// Ordered second-key labels.
    pub col_keys: Vec<String>,
    /// Dense count grid, one inner vector per row key.
    pub counts: Vec<Vec<u64>>,
}

impl CrossTabulation {
    /// Count for a `(row, col)` pair; absent combinations are zero.
    #[must_use]
    pub fn count(&self, row: &str, col: &str) -> u64 {
        let Some(r) = self.row_keys.iter().position(|key| key == row) else {
            return 0;
        };
        let Some(c) = self.col_keys.iter().position(|key| key == col) else {
            return 0;
        };
        self.counts[r][c]
    }

    /// Total count across one column.
    #[must_use]
    pub fn column_total(&self, col: &str) -> u64 {
        let Some(c) = self.col_keys.iter().position(|key| key == col) else {
            return 0;
        };
        self.counts.iter().map(|row| row[c]).sum()
    }

    /// Total count across one row.
    #[must_use]
    pub fn row_total(&self, row: &str) -> u64 {
        let Some(r) = self.row_keys.iter().position(|key| key == row) else {
            return 0;
        };
        self.counts[r].iter().sum()
    }

    /// Grand total.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.counts.iter().flatten().sum()
    }
}

/// Per-gender counts and percentage shares within one age band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenderBreakdown {
    /// The age-band label the records were filtered to.
    pub age_group: String,
    /// Count per gender, descending frequency order.
    pub counts: AggregationResult,
    /// Percentage share per gender, same order as `counts`; shares sum
    /// to 100 within floating-point tolerance.
    pub shares: AggregationResult,
    /// Total qualifying records.
    pub total: u64,
}

/// An equal-width histogram over a numeric field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgeHistogram {
    /// Bin edges; one more edge than bins. The final bin is inclusive of
    /// the upper edge.
    pub edges: Vec<f64>,
    /// Count per bin.
    pub counts: Vec<u64>,
    /// Number of non-missing values binned.
    pub sample_size: usize,
}

impl AgeHistogram {
    /// Number of bins.
    #[must_use]
    pub fn bin_count(&self) -> usize {
        self.counts.len()
    }
}

/// Descriptive summary of a numeric sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NumericSummary {
    /// Number of non-missing values.
    pub count: usize,
    /// Arithmetic mean.
    pub mean: f64,
    /// Sample standard deviation; zero for a single value.
    pub std_dev: f64,
    /// Smallest value.
    pub min: f64,
    /// Largest value.
    pub max: f64,
}

/// Outcome of an independent two-sample mean comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestResult {
    /// The t-statistic.
    pub statistic: f64,
    /// Two-tailed p-value.
    pub p_value: f64,
    /// Label of the first sample.
    pub group_a_label: String,
    /// Label of the second sample.
    pub group_b_label: String,
    /// Significance threshold the verdict was evaluated at.
    pub alpha: f64,
    /// `p_value < alpha`.
    pub significant: bool,
}

impl TestResult {
    /// Builds a result, deriving the significance verdict from the p-value
    /// and threshold.
    #[must_use]
    pub fn new(
        statistic: f64,
        p_value: f64,
        group_a_label: impl Into<String>,
        group_b_label: impl Into<String>,
        alpha: f64,
    ) -> Self {
        Self {
            statistic,
            p_value,
            group_a_label: group_a_label.into(),
            group_b_label: group_b_label.into(),
            alpha,
            significant: p_value < alpha,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aggregation_result_preserves_insertion_order() {
        let result: AggregationResult =
            [("2019", 10.0), ("2020", 7.0), ("2021", 4.0)].into_iter().collect();
        let keys: Vec<&str> = result.keys().collect();
        assert_eq!(keys, ["2019", "2020", "2021"]);
        assert_eq!(result.get("2020"), Some(7.0));
        assert_eq!(result.get("1989"), None);
    }

    #[test]
    fn cross_tabulation_missing_combinations_are_zero() {
        let crosstab = CrossTabulation {
            row_keys: vec!["Monday".into(), "Tuesday".into()],
            col_keys: vec!["Day".into(), "Night".into()],
            counts: vec![vec![3, 1], vec![0, 2]],
        };
        assert_eq!(crosstab.count("Tuesday", "Day"), 0);
        assert_eq!(crosstab.count("Sunday", "Day"), 0);
        assert_eq!(crosstab.column_total("Day"), 3);
        assert_eq!(crosstab.column_total("Night"), 3);
        assert_eq!(crosstab.row_total("Monday"), 4);
        assert_eq!(crosstab.total(), 6);
    }

    #[test]
    fn test_result_derives_significance() {
        let significant = TestResult::new(2.5, 0.01, "a", "b", 0.05);
        assert!(significant.significant);
        let not_significant = TestResult::new(0.1, 0.92, "a", "b", 0.05);
        assert!(!not_significant.significant);
        let boundary = TestResult::new(2.0, 0.05, "a", "b", 0.05);
        assert!(!boundary.significant);
    }
}
