//! Independent two-sample mean comparison.
//!
//! Student's t-test with pooled variance and a two-tailed p-value from the
//! T-distribution CDF. The tester is partition-agnostic: it takes any two
//! numeric samples, and the aggregation layer is responsible for building
//! the partitions (see [`crate::aggregate::holiday_age_partition`]).

use crash_stats_analytics_models::TestResult;
use crash_stats_crash_models::{CleanedRecord, HolidayPeriod};
use statrs::distribution::{ContinuousCDF, StudentsT};

use crate::AnalyticsError;
use crate::aggregate::holiday_age_partition;

/// Default significance threshold.
pub const DEFAULT_ALPHA: f64 = 0.05;

/// Compares the means of two independent numeric samples.
///
/// Non-finite values (the missing-age sentinel after partitioning, stray
/// NaNs) are excluded from both samples rather than treated as zero. The
/// verdict is `significant = p_value < alpha`.
///
/// # Errors
///
/// Returns [`AnalyticsError::InsufficientData`] when either sample has
/// fewer than two usable values, and [`AnalyticsError::DivisionUndefined`]
/// when the pooled variance is zero (both samples constant).
pub fn compare_means(
    group_a: &[f64],
    group_b: &[f64],
    group_a_label: &str,
    group_b_label: &str,
    alpha: f64,
) -> Result<TestResult, AnalyticsError> {
    let a = usable(group_a);
    let b = usable(group_b);
    for (sample, label) in [(&a, group_a_label), (&b, group_b_label)] {
        if sample.len() < 2 {
            return Err(AnalyticsError::InsufficientData {
                context: format!("t-test sample '{label}'"),
                needed: 2,
                found: sample.len(),
            });
        }
    }

    let (n_a, mean_a, var_a) = moments(&a);
    let (n_b, mean_b, var_b) = moments(&b);

    let df = n_a + n_b - 2.0;
    let pooled_variance = ((n_a - 1.0) * var_a + (n_b - 1.0) * var_b) / df;
    if pooled_variance <= 0.0 {
        return Err(AnalyticsError::DivisionUndefined {
            context: format!(
                "t-test standard error for '{group_a_label}' vs '{group_b_label}'"
            ),
        });
    }

    let standard_error = (pooled_variance * (1.0 / n_a + 1.0 / n_b)).sqrt();
    let statistic = (mean_a - mean_b) / standard_error;

    let distribution =
        StudentsT::new(0.0, 1.0, df).map_err(|_| AnalyticsError::InsufficientData {
            context: format!("t-distribution with {df} degrees of freedom"),
            needed: 2,
            found: 0,
        })?;
    let p_value = 2.0 * (1.0 - distribution.cdf(statistic.abs()));

    log::debug!(
        "t-test '{group_a_label}' (n={}) vs '{group_b_label}' (n={}): t={statistic:.3}, p={p_value:.3}",
        a.len(),
        b.len(),
    );

    Ok(TestResult::new(
        statistic,
        p_value,
        group_a_label,
        group_b_label,
        alpha,
    ))
}

/// Compares participant ages inside a holiday period against ages outside
/// it.
///
/// Records with an unknown flag or a missing age are excluded by the
/// partitioning, not zeroed.
///
/// # Errors
///
/// Propagates [`compare_means`] errors; in particular a dataset without at
/// least two known-age records on each side of the flag is
/// [`AnalyticsError::InsufficientData`].
pub fn holiday_age_test(
    records: &[CleanedRecord],
    period: HolidayPeriod,
    alpha: f64,
) -> Result<TestResult, AnalyticsError> {
    let (inside, outside) = holiday_age_partition(records, period);
    let (label_a, label_b) = match period {
        HolidayPeriod::Christmas => ("Christmas period", "Non-Christmas period"),
        HolidayPeriod::Easter => ("Easter period", "Non-Easter period"),
    };
    compare_means(&inside, &outside, label_a, label_b, alpha)
}

fn usable(sample: &[f64]) -> Vec<f64> {
    sample.iter().copied().filter(|v| v.is_finite()).collect()
}

#[allow(clippy::cast_precision_loss)]
fn moments(sample: &[f64]) -> (f64, f64, f64) {
    let n = sample.len() as f64;
    let mean = sample.iter().sum::<f64>() / n;
    let variance = sample.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
    (n, mean, variance)
}

#[cfg(test)]
mod tests {
    use crash_stats_crash_models::PeriodFlag;

    use super::*;

    #[allow(clippy::cast_precision_loss)]
    fn spread_sample(center: f64, n: usize) -> Vec<f64> {
        (0..n).map(|i| center + (i % 7) as f64 * 0.5).collect()
    }

    #[test]
    fn identical_samples_are_not_significant() {
        let sample = spread_sample(40.0, 30);
        let result = compare_means(&sample, &sample, "a", "b", DEFAULT_ALPHA).unwrap();
        assert!(result.statistic.abs() < 1e-12);
        assert!(result.p_value > 0.99);
        assert!(!result.significant);
    }

    #[test]
    fn displaced_means_are_significant() {
        let a = spread_sample(10.0, 30);
        let b = spread_sample(20.0, 30);
        let result = compare_means(&a, &b, "low", "high", DEFAULT_ALPHA).unwrap();
        assert!(result.statistic < 0.0);
        assert!(result.p_value < 1e-6);
        assert!(result.significant);
    }

    #[test]
    fn non_finite_values_are_excluded_not_fatal() {
        let mut a = spread_sample(10.0, 10);
        a.push(f64::NAN);
        a.push(f64::INFINITY);
        let b = spread_sample(10.0, 10);
        let with_noise = compare_means(&a, &b, "a", "b", DEFAULT_ALPHA).unwrap();
        let without_noise =
            compare_means(&a[..10], &b, "a", "b", DEFAULT_ALPHA).unwrap();
        assert!((with_noise.statistic - without_noise.statistic).abs() < 1e-12);
    }

    #[test]
    fn small_samples_are_insufficient() {
        let b = spread_sample(10.0, 10);
        assert!(matches!(
            compare_means(&[42.0], &b, "a", "b", DEFAULT_ALPHA),
            Err(AnalyticsError::InsufficientData { needed: 2, found: 1, .. })
        ));
        assert!(matches!(
            compare_means(&[f64::NAN, f64::NAN, 1.0], &b, "a", "b", DEFAULT_ALPHA),
            Err(AnalyticsError::InsufficientData { found: 1, .. })
        ));
    }

    #[test]
    fn constant_samples_have_undefined_error() {
        let a = vec![5.0; 10];
        let b = vec![5.0; 10];
        assert!(matches!(
            compare_means(&a, &b, "a", "b", DEFAULT_ALPHA),
            Err(AnalyticsError::DivisionUndefined { .. })
        ));
    }

    #[test]
    fn holiday_test_partitions_by_flag() {
        let mut records = Vec::new();
        for i in 0..30 {
            let mut inside = fixture_record(18.0 + f64::from(i % 5));
            inside.christmas_period = PeriodFlag::Yes;
            records.push(inside);

            let mut outside = fixture_record(60.0 + f64::from(i % 5));
            outside.christmas_period = PeriodFlag::No;
            records.push(outside);
        }
        // Unknown flags must not leak into either sample.
        let mut unknown = fixture_record(1000.0);
        unknown.christmas_period = PeriodFlag::Unknown;
        records.push(unknown);

        let result = holiday_age_test(&records, HolidayPeriod::Christmas, DEFAULT_ALPHA).unwrap();
        assert_eq!(result.group_a_label, "Christmas period");
        assert!(result.significant);
        assert!(result.statistic < 0.0);
    }

    #[test]
    fn holiday_test_without_known_flags_is_insufficient() {
        let records = vec![fixture_record(30.0), fixture_record(40.0)];
        assert!(matches!(
            holiday_age_test(&records, HolidayPeriod::Easter, DEFAULT_ALPHA),
            Err(AnalyticsError::InsufficientData { .. })
        ));
    }

    fn fixture_record(age: f64) -> CleanedRecord {
        CleanedRecord {
            year: 2018,
            month: None,
            time: None,
            dayweek: None,
            time_of_day: None,
            crash_severity: None,
            crash_type: None,
            age: Some(age),
            gender: None,
            age_group: None,
            christmas_period: PeriodFlag::Unknown,
            easter_period: PeriodFlag::Unknown,
        }
    }
}
