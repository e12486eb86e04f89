//! Grouped count, percentage, and ratio summaries over cleaned records.
//!
//! All aggregations are order-independent: two permutations of the same
//! record multiset yield identical results. Ordering inside each result is
//! guaranteed by the producer — chronological for years and months,
//! first-appearance order for cross-tab keys, descending frequency for
//! gender counts.

use std::collections::BTreeMap;

use crash_stats_analytics_models::{
    AgeHistogram, AggregationResult, CrossTabulation, GenderBreakdown, NumericSummary,
};
use crash_stats_crash_models::{CleanedRecord, HolidayPeriod, Month};

use crate::AnalyticsError;

/// Earliest year included in the monthly relative-frequency breakdown.
pub const MONTHLY_BASELINE_YEAR: i32 = 2010;

/// Earliest year included in the weekday × time-of-day cross-tabulation.
pub const CROSSTAB_BASELINE_YEAR: i32 = 2011;

/// Time-of-day label counted as diurnal in [`day_night_ratio`].
pub const TIME_OF_DAY_DAY: &str = "Day";

/// Time-of-day label counted as nocturnal in [`day_night_ratio`].
pub const TIME_OF_DAY_NIGHT: &str = "Night";

fn year_counts(records: &[CleanedRecord]) -> BTreeMap<i32, u64> {
    let mut counts = BTreeMap::new();
    for record in records {
        *counts.entry(record.year).or_insert(0) += 1;
    }
    counts
}

/// Count of records per distinct year, ascending by year.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn counts_by_year(records: &[CleanedRecord]) -> AggregationResult {
    year_counts(records)
        .into_iter()
        .map(|(year, count)| (year.to_string(), count as f64))
        .collect()
}

/// Percentage decrease in yearly counts from the chronologically first year
/// to the chronologically last year present.
///
/// The endpoints are the numerically smallest and largest years, not the
/// first and last rows encountered.
///
/// # Errors
///
/// Returns [`AnalyticsError::InsufficientData`] when fewer than two
/// distinct years are present.
#[allow(clippy::cast_precision_loss)]
pub fn yearly_decrease_rate(records: &[CleanedRecord]) -> Result<f64, AnalyticsError> {
    let counts = year_counts(records);
    if counts.len() < 2 {
        return Err(AnalyticsError::InsufficientData {
            context: "yearly decrease rate".to_string(),
            needed: 2,
            found: counts.len(),
        });
    }
    // Non-empty map with >= 2 entries, so both endpoints exist and the
    // first-year count is at least 1.
    let first = counts.values().next().copied().unwrap_or_default() as f64;
    let last = counts.values().next_back().copied().unwrap_or_default() as f64;
    Ok((first - last) / first * 100.0)
}

/// Relative monthly frequency, restricted to records from
/// [`MONTHLY_BASELINE_YEAR`] onwards.
///
/// All twelve months appear in calendar order, zero-count months included.
/// Each percentage is computed against the filtered subset's known-month
/// total, so the entries sum to 100.
///
/// # Errors
///
/// Returns [`AnalyticsError::InsufficientData`] when no filtered record has
/// a known month.
#[allow(clippy::cast_precision_loss)]
pub fn monthly_distribution(records: &[CleanedRecord]) -> Result<AggregationResult, AnalyticsError> {
    let mut counts = [0u64; 12];
    for record in records {
        if record.year >= MONTHLY_BASELINE_YEAR
            && let Some(month) = record.month
        {
            counts[usize::from(month.number()) - 1] += 1;
        }
    }

    let total: u64 = counts.iter().sum();
    if total == 0 {
        return Err(AnalyticsError::InsufficientData {
            context: format!("monthly distribution since {MONTHLY_BASELINE_YEAR}"),
            needed: 1,
            found: 0,
        });
    }

    Ok(Month::all()
        .iter()
        .map(|month| {
            let count = counts[usize::from(month.number()) - 1] as f64;
            (
                month.number().to_string(),
                count / total as f64 * 100.0,
            )
        })
        .collect())
}

/// Cross-tabulation of record counts per `(dayweek, time of day)` pair,
/// restricted to records from [`CROSSTAB_BASELINE_YEAR`] onwards.
///
/// Keys appear in first-appearance order; combinations never observed are
/// present in the grid with a zero count. Records missing either key are
/// excluded.
#[must_use]
pub fn weekday_time_of_day(records: &[CleanedRecord]) -> CrossTabulation {
    let mut crosstab = CrossTabulation::default();
    for record in records {
        if record.year < CROSSTAB_BASELINE_YEAR {
            continue;
        }
        let (Some(dayweek), Some(time_of_day)) =
            (record.dayweek.as_deref(), record.time_of_day.as_deref())
        else {
            continue;
        };
        let r = key_index(&mut crosstab.row_keys, dayweek);
        if r == crosstab.counts.len() {
            crosstab.counts.push(vec![0; crosstab.col_keys.len()]);
        }
        let c = key_index(&mut crosstab.col_keys, time_of_day);
        if crosstab.counts[r].len() < crosstab.col_keys.len() {
            for row in &mut crosstab.counts {
                row.resize(crosstab.col_keys.len(), 0);
            }
        }
        crosstab.counts[r][c] += 1;
    }
    crosstab
}

fn key_index(keys: &mut Vec<String>, key: &str) -> usize {
    keys.iter().position(|existing| existing == key).map_or_else(
        || {
            keys.push(key.to_string());
            keys.len() - 1
        },
        |index| index,
    )
}

/// Diurnal-to-nocturnal ratio over a weekday × time-of-day
/// cross-tabulation.
///
/// # Errors
///
/// Returns [`AnalyticsError::DivisionUndefined`] when the nocturnal total
/// is zero.
#[allow(clippy::cast_precision_loss)]
pub fn day_night_ratio(crosstab: &CrossTabulation) -> Result<f64, AnalyticsError> {
    let day = crosstab.column_total(TIME_OF_DAY_DAY);
    let night = crosstab.column_total(TIME_OF_DAY_NIGHT);
    if night == 0 {
        return Err(AnalyticsError::DivisionUndefined {
            context: "day/night crash ratio".to_string(),
        });
    }
    Ok(day as f64 / night as f64)
}

/// Per-gender counts and percentage shares within one age band.
///
/// Records are filtered to the given age-group label and a known gender;
/// counts are ordered by descending frequency (first appearance breaks
/// ties).
///
/// # Errors
///
/// Returns [`AnalyticsError::InsufficientData`] when no record qualifies.
#[allow(clippy::cast_precision_loss)]
pub fn gender_breakdown(
    records: &[CleanedRecord],
    age_group: &str,
) -> Result<GenderBreakdown, AnalyticsError> {
    let mut counts: Vec<(String, u64)> = Vec::new();
    for record in records {
        if record.age_group.as_deref() != Some(age_group) {
            continue;
        }
        let Some(gender) = record.gender.as_deref() else {
            continue;
        };
        match counts.iter_mut().find(|(label, _)| label == gender) {
            Some((_, count)) => *count += 1,
            None => counts.push((gender.to_string(), 1)),
        }
    }

    let total: u64 = counts.iter().map(|(_, count)| count).sum();
    if total == 0 {
        return Err(AnalyticsError::InsufficientData {
            context: format!("gender breakdown for age group '{age_group}'"),
            needed: 1,
            found: 0,
        });
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));

    let shares = counts
        .iter()
        .map(|(label, count)| (label.clone(), *count as f64 / total as f64 * 100.0))
        .collect();
    let counts = counts
        .into_iter()
        .map(|(label, count)| (label, count as f64))
        .collect();

    Ok(GenderBreakdown {
        age_group: age_group.to_string(),
        counts,
        shares,
        total,
    })
}

/// Ratio of one gender's count to another's within a breakdown.
///
/// A numerator gender that never occurs yields `0.0`.
///
/// # Errors
///
/// Returns [`AnalyticsError::DivisionUndefined`] when the denominator
/// gender's count is zero or absent.
pub fn gender_ratio(
    breakdown: &GenderBreakdown,
    numerator: &str,
    denominator: &str,
) -> Result<f64, AnalyticsError> {
    let denominator_count = breakdown.counts.get(denominator).unwrap_or(0.0);
    if denominator_count == 0.0 {
        return Err(AnalyticsError::DivisionUndefined {
            context: format!("gender ratio {numerator}/{denominator}"),
        });
    }
    let numerator_count = breakdown.counts.get(numerator).unwrap_or(0.0);
    Ok(numerator_count / denominator_count)
}

/// Histogram bin count per Sturges' rule: `floor(1 + 3.322 * log10(n))`.
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn sturges_bin_count(n: usize) -> usize {
    debug_assert!(n >= 1);
    (3.322f64.mul_add((n as f64).log10(), 1.0)).floor() as usize
}

/// Equal-width histogram of participant ages, with the bin count chosen by
/// Sturges' rule over the non-missing values.
///
/// A degenerate single-valued range is widened by ±0.5 so every value still
/// lands in a bin. The final bin is inclusive of the upper edge.
///
/// # Errors
///
/// Returns [`AnalyticsError::InsufficientData`] when no record has a known
/// age.
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn age_histogram(records: &[CleanedRecord]) -> Result<AgeHistogram, AnalyticsError> {
    let ages: Vec<f64> = records.iter().filter_map(|record| record.age).collect();
    if ages.is_empty() {
        return Err(AnalyticsError::InsufficientData {
            context: "age histogram".to_string(),
            needed: 1,
            found: 0,
        });
    }

    let bins = sturges_bin_count(ages.len()).max(1);
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for age in &ages {
        min = min.min(*age);
        max = max.max(*age);
    }
    if min == max {
        min -= 0.5;
        max += 0.5;
    }
    let width = (max - min) / bins as f64;

    let mut counts = vec![0u64; bins];
    for age in &ages {
        let index = (((age - min) / width) as usize).min(bins - 1);
        counts[index] += 1;
    }
    let edges = (0..=bins)
        .map(|i| width.mul_add(i as f64, min))
        .collect();

    Ok(AgeHistogram {
        edges,
        counts,
        sample_size: ages.len(),
    })
}

/// Descriptive summary (count, mean, sample standard deviation, min, max)
/// of participant ages.
///
/// # Errors
///
/// Returns [`AnalyticsError::InsufficientData`] when no record has a known
/// age.
#[allow(clippy::cast_precision_loss)]
pub fn age_summary(records: &[CleanedRecord]) -> Result<NumericSummary, AnalyticsError> {
    let ages: Vec<f64> = records.iter().filter_map(|record| record.age).collect();
    if ages.is_empty() {
        return Err(AnalyticsError::InsufficientData {
            context: "age summary".to_string(),
            needed: 1,
            found: 0,
        });
    }

    let n = ages.len() as f64;
    let mean = ages.iter().sum::<f64>() / n;
    let std_dev = if ages.len() < 2 {
        0.0
    } else {
        (ages.iter().map(|age| (age - mean).powi(2)).sum::<f64>() / (n - 1.0)).sqrt()
    };
    let min = ages.iter().copied().fold(f64::INFINITY, f64::min);
    let max = ages.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    Ok(NumericSummary {
        count: ages.len(),
        mean,
        std_dev,
        min,
        max,
    })
}

/// Splits known-age records into the two samples for a holiday-period mean
/// comparison: ages with the flag set, then ages with the flag clear.
///
/// Records with an unknown flag or a missing age belong to neither sample.
#[must_use]
pub fn holiday_age_partition(
    records: &[CleanedRecord],
    period: HolidayPeriod,
) -> (Vec<f64>, Vec<f64>) {
    let mut inside = Vec::new();
    let mut outside = Vec::new();
    for record in records {
        let Some(age) = record.age else {
            continue;
        };
        match record.holiday_flag(period).as_bool() {
            Some(true) => inside.push(age),
            Some(false) => outside.push(age),
            None => {}
        }
    }
    (inside, outside)
}
