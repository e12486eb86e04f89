#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Report binary for the crash statistics pipeline.
//!
//! Loads the road-fatality record set (local file or published URL),
//! normalizes it, runs every aggregation and hypothesis test, and renders
//! the results as text tables or JSON. Sections with too little data are
//! reported as notes rather than aborting the run.

mod report;

use std::path::PathBuf;

use clap::Parser;
use crash_stats_analytics::ttest::DEFAULT_ALPHA;
use crash_stats_source::{DEFAULT_DATA_URL, fetch, normalize};

use crate::report::Report;

#[derive(Parser)]
#[command(name = "crash_stats", about = "Road-fatality cleaning and statistics report")]
struct Cli {
    /// Local CSV file to analyze instead of fetching the published dataset
    #[arg(long)]
    file: Option<PathBuf>,
    /// URL of the crash record CSV
    #[arg(long, default_value = DEFAULT_DATA_URL)]
    url: String,
    /// Age-band label for the gender analysis
    #[arg(long, default_value = "17_to_25")]
    age_group: String,
    /// Significance threshold for the hypothesis tests
    #[arg(long, default_value_t = DEFAULT_ALPHA)]
    alpha: f64,
    /// Emit the report as JSON instead of text tables
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let raw = match &cli.file {
        Some(path) => fetch::read_records(path)?,
        None => fetch::fetch_records(&cli.url).await?,
    };
    log::info!("Loaded {} raw records", raw.len());

    let cleaned = normalize::normalize(&raw)?;
    log::info!("Normalized {} records", cleaned.len());

    let report = Report::build(&cleaned, &cli.age_group, cli.alpha);
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        report.render_text();
    }
    Ok(())
}
