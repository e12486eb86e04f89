//! Schema normalization: raw rows to typed cleaned records.
//!
//! The transform is a pure per-row projection: exactly one
//! [`CleanedRecord`] per [`RawRecord`], no row reads another row's values.
//! Per-value coercion misses (bad clock time, out-of-range month,
//! unrecognized yes/no literal) are absorbed into explicit missing/unknown
//! sentinels and never escalate. The one dataset-wide failure is an
//! unparseable `Year`, which aborts the whole batch with [`SchemaError`].
//!
//! The six designated irrelevant columns are never read, so they are
//! dropped whether or not the source carries them, and every column outside
//! the cleaned schema (e.g. `Day`, `Accident Description`) is likewise
//! absent from the output.

use crash_stats_crash_models::{CleanedRecord, PeriodFlag};
use crash_stats_source_models::{RawRecord, columns};

use crate::SchemaError;
use crate::parsing::{parse_age, parse_clock_time, parse_month, parse_year};

/// Normalizes a batch of raw records.
///
/// The output has exactly the same length and order as the input.
///
/// # Errors
///
/// Returns [`SchemaError`] naming the column and row when any record's
/// `Year` is absent or fails integer coercion.
pub fn normalize(raw: &[RawRecord]) -> Result<Vec<CleanedRecord>, SchemaError> {
    raw.iter()
        .enumerate()
        .map(|(row, record)| normalize_record(record, row))
        .collect()
}

fn normalize_record(record: &RawRecord, row: usize) -> Result<CleanedRecord, SchemaError> {
    let year_cell = record.field(columns::YEAR);
    let Some(year) = year_cell.and_then(parse_year) else {
        return Err(SchemaError {
            column: columns::YEAR,
            row,
            value: year_cell.map(str::to_string),
        });
    };

    let month = coerce(record, columns::MONTH, parse_month);
    let time = coerce(record, columns::TIME, parse_clock_time);
    let age = coerce(record, columns::AGE, parse_age);

    Ok(CleanedRecord {
        year,
        month,
        time,
        dayweek: pass_through(record, columns::DAYWEEK),
        time_of_day: pass_through(record, columns::TIME_OF_DAY),
        crash_severity: pass_through(record, columns::CRASH_SEVERITY),
        crash_type: pass_through(record, columns::CRASH_TYPE),
        age,
        gender: pass_through(record, columns::GENDER),
        age_group: pass_through(record, columns::AGE_GROUP),
        christmas_period: PeriodFlag::from_raw(record.field(columns::CHRISTMAS_PERIOD)),
        easter_period: PeriodFlag::from_raw(record.field(columns::EASTER_PERIOD)),
    })
}

/// Applies a field parser, logging the coercion miss when a present cell
/// fails to parse.
fn coerce<T>(record: &RawRecord, column: &str, parser: fn(&str) -> Option<T>) -> Option<T> {
    let cell = record.field(column)?;
    let value = parser(cell);
    if value.is_none() {
        log::debug!("Coercion miss for '{column}': {cell:?} treated as missing");
    }
    value
}

fn pass_through(record: &RawRecord, column: &str) -> Option<String> {
    record.field(column).map(str::to_string)
}

/// Re-emits a cleaned record as a raw record over the cleaned schema only.
///
/// Known period flags serialize back to their `Yes`/`No` literals; unknown
/// flags are left absent, so a normalize → `to_raw` → normalize round trip
/// is idempotent.
#[must_use]
pub fn to_raw(record: &CleanedRecord) -> RawRecord {
    let mut raw = RawRecord::new();
    raw.set(columns::YEAR, record.year.to_string());
    if let Some(month) = record.month {
        raw.set(columns::MONTH, month.number().to_string());
    }
    if let Some(time) = record.time {
        raw.set(columns::TIME, time.format("%H:%M").to_string());
    }
    if let Some(age) = record.age {
        raw.set(columns::AGE, age.to_string());
    }
    for (column, value) in [
        (columns::DAYWEEK, &record.dayweek),
        (columns::TIME_OF_DAY, &record.time_of_day),
        (columns::CRASH_SEVERITY, &record.crash_severity),
        (columns::CRASH_TYPE, &record.crash_type),
        (columns::GENDER, &record.gender),
        (columns::AGE_GROUP, &record.age_group),
    ] {
        if let Some(value) = value {
            raw.set(column, value.clone());
        }
    }
    for (column, flag) in [
        (columns::CHRISTMAS_PERIOD, record.christmas_period),
        (columns::EASTER_PERIOD, record.easter_period),
    ] {
        match flag {
            PeriodFlag::Yes => raw.set(column, "Yes"),
            PeriodFlag::No => raw.set(column, "No"),
            PeriodFlag::Unknown => {}
        }
    }
    raw
}

#[cfg(test)]
mod tests {
    use crash_stats_crash_models::Month;
    use crash_stats_source_models::DROPPED_COLUMNS;

    use super::*;

    fn full_raw_record() -> RawRecord {
        RawRecord::from_fields(
            [
                ("Year", "2015"),
                ("Month", "7"),
                ("Day", "14"),
                ("Dayweek", "Tuesday"),
                ("Time", "08:30"),
                ("Age", "23"),
                ("Gender", "Male"),
                ("Age Group", "17_to_25"),
                ("Crash Severity", "Fatal"),
                ("Crash Type", "Single"),
                ("Accident Description", "Run-off-road"),
                ("Time of day", "Day"),
                ("Christmas Period", "No"),
                ("Easter Period", "Yes"),
                ("Speed Limit", "100"),
                ("National Remoteness Areas", "Inner Regional"),
                ("SA4 Name 2016", "Hume"),
                ("National Road Type", "National Highway"),
                ("Bus Involvement", "No"),
                ("Heavy Rigid Truck Involvement", "No"),
            ]
            .map(|(column, cell)| (column.to_string(), cell.to_string())),
        )
    }

    #[test]
    fn projects_typed_fields() {
        let cleaned = normalize(&[full_raw_record()]).unwrap();
        let record = &cleaned[0];
        assert_eq!(record.year, 2015);
        assert_eq!(record.month, Some(Month::July));
        assert_eq!(record.time.unwrap().to_string(), "08:30:00");
        assert_eq!(record.age, Some(23.0));
        assert_eq!(record.gender.as_deref(), Some("Male"));
        assert_eq!(record.age_group.as_deref(), Some("17_to_25"));
        assert_eq!(record.dayweek.as_deref(), Some("Tuesday"));
        assert_eq!(record.time_of_day.as_deref(), Some("Day"));
        assert_eq!(record.christmas_period, PeriodFlag::No);
        assert_eq!(record.easter_period, PeriodFlag::Yes);
    }

    #[test]
    fn dropped_columns_are_absent_from_output() {
        let cleaned = normalize(&[full_raw_record()]).unwrap();
        let round_tripped = to_raw(&cleaned[0]);
        for column in DROPPED_COLUMNS {
            assert!(!round_tripped.has_column(column), "{column} survived");
        }
        // Unprojected columns are dropped too.
        assert!(!round_tripped.has_column("Day"));
        assert!(!round_tripped.has_column("Accident Description"));
    }

    #[test]
    fn absent_dropped_columns_are_not_an_error() {
        let mut record = RawRecord::new();
        record.set(columns::YEAR, "1999");
        assert!(normalize(&[record]).is_ok());
    }

    #[test]
    fn preserves_record_count() {
        let mut sparse = RawRecord::new();
        sparse.set(columns::YEAR, "2001");
        let batch = vec![full_raw_record(), sparse, full_raw_record()];
        let cleaned = normalize(&batch).unwrap();
        assert_eq!(cleaned.len(), batch.len());
    }

    #[test]
    fn renormalization_is_idempotent() {
        let mut unparseable = full_raw_record();
        unparseable.set(columns::TIME, "25:99");
        unparseable.set(columns::MONTH, "13");
        unparseable.set(columns::EASTER_PERIOD, "maybe");
        let batch = vec![full_raw_record(), unparseable];

        let first = normalize(&batch).unwrap();
        let round_tripped: Vec<RawRecord> = first.iter().map(to_raw).collect();
        let second = normalize(&round_tripped).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn month_out_of_domain_becomes_missing() {
        for (cell, expected) in [
            ("1", Some(Month::January)),
            ("12", Some(Month::December)),
            ("0", None),
            ("13", None),
            ("July", None),
        ] {
            let mut record = full_raw_record();
            record.set(columns::MONTH, cell);
            let cleaned = normalize(&[record]).unwrap();
            assert_eq!(cleaned[0].month, expected, "month cell {cell:?}");
        }
    }

    #[test]
    fn unparseable_time_becomes_missing() {
        for cell in ["25:99", "abc", "8.30"] {
            let mut record = full_raw_record();
            record.set(columns::TIME, cell);
            let cleaned = normalize(&[record]).unwrap();
            assert_eq!(cleaned[0].time, None, "time cell {cell:?}");
        }
    }

    #[test]
    fn period_flags_never_default_to_no() {
        for (cell, expected) in [
            ("Yes", PeriodFlag::Yes),
            ("No", PeriodFlag::No),
            ("", PeriodFlag::Unknown),
            ("maybe", PeriodFlag::Unknown),
        ] {
            let mut record = full_raw_record();
            record.set(columns::CHRISTMAS_PERIOD, cell);
            let cleaned = normalize(&[record]).unwrap();
            assert_eq!(cleaned[0].christmas_period, expected, "flag cell {cell:?}");
        }

        let mut absent = RawRecord::new();
        absent.set(columns::YEAR, "2010");
        let cleaned = normalize(&[absent]).unwrap();
        assert_eq!(cleaned[0].christmas_period, PeriodFlag::Unknown);
        assert_eq!(cleaned[0].easter_period, PeriodFlag::Unknown);
    }

    #[test]
    fn unparseable_year_fails_the_whole_batch() {
        let mut bad = full_raw_record();
        bad.set(columns::YEAR, "199X");
        let error = normalize(&[full_raw_record(), bad]).unwrap_err();
        assert_eq!(error.column, columns::YEAR);
        assert_eq!(error.row, 1);
        assert_eq!(error.value.as_deref(), Some("199X"));
    }

    #[test]
    fn missing_year_fails_the_whole_batch() {
        let mut record = full_raw_record();
        record.set(columns::YEAR, "");
        let error = normalize(&[record]).unwrap_err();
        assert_eq!(error.column, columns::YEAR);
        assert_eq!(error.value, None);
    }
}
