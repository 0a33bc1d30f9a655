use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, ValueEnum};

use bike_rental_dashboard::data::filter::DateRange;
use bike_rental_dashboard::data::loader::DEFAULT_SOURCE;
use bike_rental_dashboard::data::model::RentalDataset;

#[derive(Debug, Parser)]
#[command(name = "bike-rental-dashboard")]
#[command(about = "Daily, monthly and seasonal bike rental summaries", long_about = None)]
pub struct Cli {
    /// URL or path of the rental table (.csv, .json or .parquet)
    #[arg(short, long, env = "BIKE_DASHBOARD_SOURCE", default_value = DEFAULT_SOURCE)]
    pub source: String,

    /// First day of the range (YYYY-MM-DD); defaults to the earliest date in the data.
    /// A range outside the data gives empty tables
    #[arg(long, value_name = "DATE")]
    pub start: Option<NaiveDate>,

    /// Last day of the range (YYYY-MM-DD); defaults to the latest date in the data
    #[arg(long, value_name = "DATE")]
    pub end: Option<NaiveDate>,

    /// Print the summaries and exit instead of opening the window
    #[arg(long, value_enum, value_name = "FORMAT")]
    pub report: Option<ReportFormat>,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Text,
    Json,
}

impl Cli {
    /// The range requested on the command line, with missing ends taken
    /// from the data span. A lone bound beyond the data keeps the range
    /// non-empty (`--start` after the last day yields `start..=start`).
    /// `None` when an end is missing and the data is empty. Fails when both
    /// bounds are given inverted.
    pub fn initial_range(&self, dataset: &RentalDataset) -> Result<Option<DateRange>> {
        let start = match (self.start, self.end, dataset.min_date()) {
            (Some(start), _, _) => Some(start),
            (None, Some(end), Some(min)) => Some(min.min(end)),
            (None, _, min) => min,
        };
        let end = match (self.end, start, dataset.max_date()) {
            (Some(end), _, _) => Some(end),
            (None, Some(start), Some(max)) => Some(max.max(start)),
            (None, _, max) => max,
        };
        match (start, end) {
            (Some(start), Some(end)) => Ok(Some(DateRange::new(start, end)?)),
            _ => Ok(None),
        }
    }

    pub fn default_log_filter(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else {
            "info"
        }
    }
}
