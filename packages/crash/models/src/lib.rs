#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Cleaned road-fatality record schema and categorical domain types.
//!
//! This crate defines the canonical cleaned record produced by the schema
//! normalizer and consumed read-only by every analysis. Fields that can fail
//! coercion are explicitly optional; a missing value is a visible sentinel,
//! never a silent zero or `false`.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Calendar month as a closed categorical domain.
///
/// Months group and display categorically (January..December), not
/// numerically. Out-of-domain numbers are rejected at coercion time via
/// [`Month::from_number`] rather than clamped.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Month {
    /// Month 1
    January = 1,
    /// Month 2
    February = 2,
    /// Month 3
    March = 3,
    /// Month 4
    April = 4,
    /// Month 5
    May = 5,
    /// Month 6
    June = 6,
    /// Month 7
    July = 7,
    /// Month 8
    August = 8,
    /// Month 9
    September = 9,
    /// Month 10
    October = 10,
    /// Month 11
    November = 11,
    /// Month 12
    December = 12,
}

impl Month {
    /// Returns the month number, 1-12.
    #[must_use]
    pub const fn number(self) -> u8 {
        self as u8
    }

    /// Creates a month from its number. Returns `None` for anything outside
    /// 1-12.
    #[must_use]
    pub const fn from_number(number: u8) -> Option<Self> {
        match number {
            1 => Some(Self::January),
            2 => Some(Self::February),
            3 => Some(Self::March),
            4 => Some(Self::April),
            5 => Some(Self::May),
            6 => Some(Self::June),
            7 => Some(Self::July),
            8 => Some(Self::August),
            9 => Some(Self::September),
            10 => Some(Self::October),
            11 => Some(Self::November),
            12 => Some(Self::December),
            _ => None,
        }
    }

    /// Returns all months in calendar order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::January,
            Self::February,
            Self::March,
            Self::April,
            Self::May,
            Self::June,
            Self::July,
            Self::August,
            Self::September,
            Self::October,
            Self::November,
            Self::December,
        ]
    }
}

/// Tri-state holiday-period flag derived from a raw `Yes`/`No` column.
///
/// Anything other than the exact literals `"Yes"` and `"No"` (absent cells,
/// empty strings, unexpected text) becomes [`PeriodFlag::Unknown`].
/// Defaulting unrecognized input to `No` would silently bias the holiday
/// mean-comparison tests, so `Unknown` is a first-class state that every
/// consumer must exclude explicitly.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum PeriodFlag {
    /// The record falls inside the holiday period.
    Yes,
    /// The record falls outside the holiday period.
    No,
    /// The raw cell was absent or not a recognized literal.
    Unknown,
}

impl PeriodFlag {
    /// Maps a raw cell to a flag. `None` and unrecognized literals both map
    /// to [`PeriodFlag::Unknown`].
    #[must_use]
    pub fn from_raw(raw: Option<&str>) -> Self {
        match raw {
            Some("Yes") => Self::Yes,
            Some("No") => Self::No,
            _ => Self::Unknown,
        }
    }

    /// Returns the boolean value for known flags, `None` for
    /// [`PeriodFlag::Unknown`].
    #[must_use]
    pub const fn as_bool(self) -> Option<bool> {
        match self {
            Self::Yes => Some(true),
            Self::No => Some(false),
            Self::Unknown => None,
        }
    }

    /// Whether the flag carries a known yes/no value.
    #[must_use]
    pub const fn is_known(self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

/// The two holiday periods tracked in the record set.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum HolidayPeriod {
    /// The Christmas travel period.
    Christmas,
    /// The Easter travel period.
    Easter,
}

/// A normalized road-fatality record: the typed projection of one raw row.
///
/// Exactly one cleaned record is produced per raw record, by a pure per-row
/// transform. Columns that are not part of this schema (including the six
/// designated irrelevant columns) are structurally absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CleanedRecord {
    /// Crash year. Required; a year that fails integer coercion fails the
    /// whole normalization run.
    pub year: i32,
    /// Crash month. `None` when the raw value is absent or outside 1-12.
    pub month: Option<Month>,
    /// Clock time of the crash. `None` when the raw value does not match
    /// strict `HH:MM`.
    pub time: Option<NaiveTime>,
    /// Day of the week, original text (e.g. "Monday").
    pub dayweek: Option<String>,
    /// Coarse time-of-day category, original text (e.g. "Day", "Night").
    pub time_of_day: Option<String>,
    /// Crash severity category, original text.
    pub crash_severity: Option<String>,
    /// Crash type category, original text (e.g. "Single", "Multiple").
    pub crash_type: Option<String>,
    /// Participant age in years. `None` when absent or non-numeric.
    pub age: Option<f64>,
    /// Participant gender label. Open categorical set; `None` when absent.
    pub gender: Option<String>,
    /// Age-band label (e.g. "17_to_25"). `None` when absent.
    pub age_group: Option<String>,
    /// Whether the crash fell in the Christmas period.
    pub christmas_period: PeriodFlag,
    /// Whether the crash fell in the Easter period.
    pub easter_period: PeriodFlag,
}

impl CleanedRecord {
    /// Returns the holiday flag for the given period.
    #[must_use]
    pub const fn holiday_flag(&self, period: HolidayPeriod) -> PeriodFlag {
        match period {
            HolidayPeriod::Christmas => self.christmas_period,
            HolidayPeriod::Easter => self.easter_period,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_number_roundtrip() {
        for month in Month::all() {
            assert_eq!(Month::from_number(month.number()), Some(*month));
        }
    }

    #[test]
    fn month_rejects_out_of_domain() {
        assert_eq!(Month::from_number(0), None);
        assert_eq!(Month::from_number(13), None);
        assert_eq!(Month::from_number(255), None);
    }

    #[test]
    fn months_are_in_calendar_order() {
        let numbers: Vec<u8> = Month::all().iter().map(|m| m.number()).collect();
        assert_eq!(numbers, (1..=12).collect::<Vec<u8>>());
    }

    #[test]
    fn period_flag_maps_exact_literals_only() {
        assert_eq!(PeriodFlag::from_raw(Some("Yes")), PeriodFlag::Yes);
        assert_eq!(PeriodFlag::from_raw(Some("No")), PeriodFlag::No);
        assert_eq!(PeriodFlag::from_raw(Some("")), PeriodFlag::Unknown);
        assert_eq!(PeriodFlag::from_raw(Some("maybe")), PeriodFlag::Unknown);
        assert_eq!(PeriodFlag::from_raw(Some("yes")), PeriodFlag::Unknown);
        assert_eq!(PeriodFlag::from_raw(Some("true")), PeriodFlag::Unknown);
        assert_eq!(PeriodFlag::from_raw(None), PeriodFlag::Unknown);
    }

    #[test]
    fn period_flag_unknown_is_not_false() {
        assert_eq!(PeriodFlag::Unknown.as_bool(), None);
        assert!(!PeriodFlag::Unknown.is_known());
        assert_eq!(PeriodFlag::No.as_bool(), Some(false));
    }
}
