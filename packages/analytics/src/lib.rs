#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Descriptive and inferential statistics over cleaned crash records.
//!
//! Every operation is a pure, read-only function of a cleaned record slice:
//! results are recomputed on demand, row order never matters, and records
//! with missing values are excluded rather than defaulted. Group-level data
//! insufficiency and zero denominators surface as distinguishable
//! [`AnalyticsError`] variants so the presentation layer can render an
//! informative message instead of a bogus number.

pub mod aggregate;
pub mod ttest;

use thiserror::Error;

/// Recoverable analysis failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalyticsError {
    /// An aggregation or test was requested over too few qualifying
    /// records.
    #[error("not enough data for {context}: needed {needed}, found {found}")]
    InsufficientData {
        /// What was being computed.
        context: String,
        /// Minimum qualifying records required.
        needed: usize,
        /// Qualifying records actually found.
        found: usize,
    },

    /// A derived ratio's denominator is zero.
    #[error("undefined ratio for {context}: denominator is zero")]
    DivisionUndefined {
        /// What was being computed.
        context: String,
    },
}
