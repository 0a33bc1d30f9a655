use chrono::NaiveDate;
use thiserror::Error;

/// Everything that can go wrong between "where is the data" and "here are
/// the summaries". Aggregation itself never fails.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// The source could not be fetched, read, or decoded as a table.
    #[error("data unavailable from {source_name}: {reason}")]
    DataUnavailable { source_name: String, reason: String },

    /// A required column is absent from the header / schema.
    #[error("required column '{column}' is missing")]
    MissingColumn { column: &'static str },

    /// A cell is present but cannot be interpreted.
    #[error("row {row}, column '{column}': {reason}")]
    Schema {
        row: usize,
        column: &'static str,
        reason: String,
    },

    /// The user asked for a range that ends before it starts.
    #[error("invalid date range: start {start} is after end {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },
}

impl DashboardError {
    pub(crate) fn unavailable(source_name: &str, reason: impl ToString) -> Self {
        DashboardError::DataUnavailable {
            source_name: source_name.to_string(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn schema(row: usize, column: &'static str, reason: impl ToString) -> Self {
        DashboardError::Schema {
            row,
            column,
            reason: reason.to_string(),
        }
    }

    /// Whether this error came from the shape of the data rather than its
    /// availability.
    pub fn is_schema_error(&self) -> bool {
        matches!(
            self,
            DashboardError::MissingColumn { .. } | DashboardError::Schema { .. }
        )
    }
}

pub type Result<T, E = DashboardError> = std::result::Result<T, E>;
