/// Data layer: core types, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///  URL / .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  fetch + parse → RentalDataset (sorted by date)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  inclusive DateRange → Vec<RentalRecord>
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  daily / monthly / season tables + totals
///   └───────────┘
/// ```
pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod model;

use aggregate::{summarize, DashboardSummary};
use filter::{filter_by_range, DateRange};
use model::RentalDataset;

/// Filter the dataset to `range` and build every summary table from scratch.
pub fn summarize_range(dataset: &RentalDataset, range: &DateRange) -> DashboardSummary {
    let filtered = filter_by_range(dataset.records(), range);
    log::debug!("{} of {} rows fall in {range}", filtered.len(), dataset.len());
    summarize(&filtered)
}
