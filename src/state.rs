use chrono::NaiveDate;

use bike_rental_dashboard::data::aggregate::DashboardSummary;
use bike_rental_dashboard::data::filter::DateRange;
use bike_rental_dashboard::data::model::RentalDataset;
use bike_rental_dashboard::data::summarize_range;

use crate::color::SeasonColors;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Where the current dataset came from (shown in the top bar).
    pub source: String,

    /// Loaded dataset.
    pub dataset: RentalDataset,

    /// Span of the data; the pickers are clamped into it.
    pub bounds: Option<DateRange>,

    /// Last accepted range. Summaries always reflect this.
    pub range: DateRange,

    /// Picker buffers; may hold an invalid pair until corrected.
    pub start_input: NaiveDate,
    pub end_input: NaiveDate,

    /// Summaries for `range` (recomputed on every change).
    pub summary: DashboardSummary,

    pub season_colors: SeasonColors,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Build state for a freshly loaded dataset. `range` defaults to the
    /// full span of the data.
    pub fn new(source: String, dataset: RentalDataset, range: Option<DateRange>) -> Self {
        let bounds = dataset.full_range();
        let range = range
            .or(bounds)
            .unwrap_or_else(|| DateRange::single_day(chrono::Local::now().date_naive()));
        let summary = summarize_range(&dataset, &range);

        AppState {
            source,
            dataset,
            bounds,
            range,
            start_input: range.start(),
            end_input: range.end(),
            summary,
            season_colors: SeasonColors::default(),
            status_message: None,
        }
    }

    /// Replace the dataset (File → Open) and reset the range to its span.
    pub fn set_dataset(&mut self, source: String, dataset: RentalDataset) {
        let colors = std::mem::take(&mut self.season_colors);
        *self = AppState::new(source, dataset, None);
        self.season_colors = colors;
    }

    /// Validate the picker values and, when valid, make them the active
    /// range. An inverted pair is rejected and the previous range stays.
    pub fn apply_inputs(&mut self) {
        match DateRange::new(self.start_input, self.end_input) {
            Ok(range) => {
                let range = match &self.bounds {
                    Some(bounds) => range.clamp_to(bounds),
                    None => range,
                };
                self.set_range(range);
            }
            Err(e) => {
                log::debug!("Rejected range input: {e}");
                self.status_message = Some(e.to_string());
            }
        }
    }

    /// Restore the full data span.
    pub fn reset_range(&mut self) {
        if let Some(bounds) = self.bounds {
            self.set_range(bounds);
        }
    }

    fn set_range(&mut self, range: DateRange) {
        self.range = range;
        self.start_input = range.start();
        self.end_input = range.end();
        self.status_message = None;
        self.summary = summarize_range(&self.dataset, &range);
        log::debug!("Range set to {range}: {} rows", self.summary.record_count);
    }
}
