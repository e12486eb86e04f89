//! Report assembly and rendering.
//!
//! Collects every aggregation and test result into one serializable value.
//! Recoverable analysis failures (not enough data, undefined ratios) become
//! human-readable notes; the statistics crates own all numeric logic.

use crash_stats_analytics::{AnalyticsError, aggregate, ttest};
use crash_stats_analytics_models::{
    AgeHistogram, AggregationResult, CrossTabulation, GenderBreakdown, NumericSummary, TestResult,
};
use crash_stats_crash_models::{CleanedRecord, HolidayPeriod};
use serde::Serialize;

/// The full analysis report over one cleaned record set.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// Number of cleaned records analyzed.
    pub record_count: usize,
    /// Descriptive age summary.
    pub age_summary: Option<NumericSummary>,
    /// Age histogram (Sturges binning).
    pub age_histogram: Option<AgeHistogram>,
    /// Count of records per year.
    pub yearly_counts: AggregationResult,
    /// Percentage decrease from the first to the last year.
    pub yearly_decrease_rate: Option<f64>,
    /// Relative monthly frequency since 2010.
    pub monthly_distribution: Option<AggregationResult>,
    /// Weekday × time-of-day counts since 2011.
    pub weekday_time_of_day: CrossTabulation,
    /// Diurnal-to-nocturnal crash ratio.
    pub day_night_ratio: Option<f64>,
    /// Christmas-period vs rest age comparison.
    pub christmas_test: Option<TestResult>,
    /// Easter-period vs rest age comparison.
    pub easter_test: Option<TestResult>,
    /// Gender breakdown within the requested age band.
    pub gender_breakdown: Option<GenderBreakdown>,
    /// Ratio of the most to the second-most frequent gender in the band.
    pub gender_ratio: Option<f64>,
    /// Messages for sections that could not be computed.
    pub notes: Vec<String>,
}

impl Report {
    /// Runs the whole analysis suite over a cleaned record set.
    #[must_use]
    pub fn build(records: &[CleanedRecord], age_group: &str, alpha: f64) -> Self {
        let mut notes = Vec::new();

        let weekday_time_of_day = aggregate::weekday_time_of_day(records);
        let day_night_ratio = note(aggregate::day_night_ratio(&weekday_time_of_day), &mut notes);

        let gender_breakdown = note(aggregate::gender_breakdown(records, age_group), &mut notes);
        let gender_ratio = gender_breakdown.as_ref().and_then(|breakdown| {
            let mut keys = breakdown.counts.keys();
            let (first, second) = (keys.next()?.to_string(), keys.next()?.to_string());
            note(
                aggregate::gender_ratio(breakdown, &first, &second),
                &mut notes,
            )
        });

        Self {
            record_count: records.len(),
            age_summary: note(aggregate::age_summary(records), &mut notes),
            age_histogram: note(aggregate::age_histogram(records), &mut notes),
            yearly_counts: aggregate::counts_by_year(records),
            yearly_decrease_rate: note(aggregate::yearly_decrease_rate(records), &mut notes),
            monthly_distribution: note(aggregate::monthly_distribution(records), &mut notes),
            weekday_time_of_day,
            day_night_ratio,
            christmas_test: note(
                ttest::holiday_age_test(records, HolidayPeriod::Christmas, alpha),
                &mut notes,
            ),
            easter_test: note(
                ttest::holiday_age_test(records, HolidayPeriod::Easter, alpha),
                &mut notes,
            ),
            gender_breakdown,
            gender_ratio,
            notes,
        }
    }

    /// Renders the report as plain text tables.
    pub fn render_text(&self) {
        println!("Road Fatality Analysis ({} records)", self.record_count);

        if let Some(summary) = &self.age_summary {
            println!("\n== Age summary ==");
            println!(
                "n={}  mean={:.1}  std={:.1}  min={:.0}  max={:.0}",
                summary.count, summary.mean, summary.std_dev, summary.min, summary.max
            );
        }

        if let Some(histogram) = &self.age_histogram {
            println!("\n== Age distribution ({} bins) ==", histogram.bin_count());
            for (i, count) in histogram.counts.iter().enumerate() {
                println!(
                    "{:>5.1} - {:>5.1}  {count}",
                    histogram.edges[i],
                    histogram.edges[i + 1]
                );
            }
        }

        print_aggregation("Crashes per year", &self.yearly_counts);
        if let Some(rate) = self.yearly_decrease_rate {
            println!("Decrease from first to last year: {rate:.1}%");
        }

        if let Some(monthly) = &self.monthly_distribution {
            print_aggregation("Monthly share since 2010 (%)", monthly);
        }

        self.render_crosstab();

        println!("\n== Hypothesis tests ==");
        for test in [&self.christmas_test, &self.easter_test].into_iter().flatten() {
            print_test(test);
        }

        if let Some(breakdown) = &self.gender_breakdown {
            print_aggregation(
                &format!("Gender counts, age group {}", breakdown.age_group),
                &breakdown.counts,
            );
            print_aggregation("Gender share (%)", &breakdown.shares);
        }
        if let Some(ratio) = self.gender_ratio {
            println!("Leading gender ratio: {ratio:.2}");
        }

        if !self.notes.is_empty() {
            println!("\n== Notes ==");
            for message in &self.notes {
                println!("- {message}");
            }
        }
    }

    fn render_crosstab(&self) {
        let crosstab = &self.weekday_time_of_day;
        if crosstab.row_keys.is_empty() {
            return;
        }
        println!("\n== Weekday x time of day since 2011 ==");
        print!("{:<12}", "");
        for col in &crosstab.col_keys {
            print!("{col:>10}");
        }
        println!();
        for (row, counts) in crosstab.row_keys.iter().zip(&crosstab.counts) {
            print!("{row:<12}");
            for count in counts {
                print!("{count:>10}");
            }
            println!();
        }
        if let Some(ratio) = self.day_night_ratio {
            println!("Day/night ratio: {ratio:.2}");
        }
    }
}

fn note<T>(result: Result<T, AnalyticsError>, notes: &mut Vec<String>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(error) => {
            log::warn!("{error}");
            notes.push(error.to_string());
            None
        }
    }
}

fn print_aggregation(title: &str, result: &AggregationResult) {
    println!("\n== {title} ==");
    for entry in &result.entries {
        println!("{:<12}{:>10.1}", entry.key, entry.value);
    }
}

fn print_test(test: &TestResult) {
    let verdict = if test.significant {
        "significant"
    } else {
        "not significant"
    };
    println!(
        "{} vs {}: t={:.3}, p={:.3} ({verdict} at alpha={})",
        test.group_a_label, test.group_b_label, test.statistic, test.p_value, test.alpha
    );
}

#[cfg(test)]
mod tests {
    use crash_stats_crash_models::PeriodFlag;

    use super::*;

    fn record(year: i32, age: f64, gender: &str) -> CleanedRecord {
        CleanedRecord {
            year,
            month: None,
            time: None,
            dayweek: Some("Monday".to_string()),
            time_of_day: Some("Day".to_string()),
            crash_severity: None,
            crash_type: None,
            age: Some(age),
            gender: Some(gender.to_string()),
            age_group: Some("17_to_25".to_string()),
            christmas_period: PeriodFlag::No,
            easter_period: PeriodFlag::Unknown,
        }
    }

    #[test]
    fn sparse_data_degrades_to_notes() {
        let records = vec![record(2018, 21.0, "Male"), record(2019, 24.0, "Female")];
        let report = Report::build(&records, "17_to_25", 0.05);

        assert_eq!(report.record_count, 2);
        assert!(report.age_summary.is_some());
        assert_eq!(report.yearly_counts.len(), 2);
        // No Night rows, no holiday partitions, one gender each: these
        // sections must degrade into notes, not abort the report.
        assert!(report.day_night_ratio.is_none());
        assert!(report.christmas_test.is_none());
        assert!(report.easter_test.is_none());
        assert!(!report.notes.is_empty());
    }

    #[test]
    fn empty_age_band_is_reported_as_note() {
        let records = vec![record(2018, 21.0, "Male")];
        let report = Report::build(&records, "65_plus", 0.05);
        assert!(report.gender_breakdown.is_none());
        assert!(report.gender_ratio.is_none());
        assert!(
            report
                .notes
                .iter()
                .any(|message| message.contains("65_plus"))
        );
    }
}
