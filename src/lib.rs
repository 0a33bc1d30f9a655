//! Bike rental dashboard core: load a day-level rental table, select an
//! inclusive date range and build daily, monthly and seasonal summaries.
//!
//! The desktop window and the headless report in the binary are thin
//! presentation layers over [`data::summarize_range`].

pub mod data;
pub mod error;
pub mod report;

pub use error::{DashboardError, Result};
