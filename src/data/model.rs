use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::data::filter::DateRange;

// ---------------------------------------------------------------------------
// Season – the `season` column
// ---------------------------------------------------------------------------

/// Meteorological season as coded in the source data (1–4).
///
/// Declaration order is code order, so the derived `Ord` sorts
/// Winter < Spring < Summer < Fall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Fall,
}

impl Season {
    pub const ALL: [Season; 4] = [Season::Winter, Season::Spring, Season::Summer, Season::Fall];

    /// Map a numeric season code to a season. `None` outside 1–4.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(Season::Winter),
            2 => Some(Season::Spring),
            3 => Some(Season::Summer),
            4 => Some(Season::Fall),
            _ => None,
        }
    }

    pub fn code(self) -> u8 {
        match self {
            Season::Winter => 1,
            Season::Spring => 2,
            Season::Summer => 3,
            Season::Fall => 4,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Season::Winter => "Winter",
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Fall => "Fall",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Month names
// ---------------------------------------------------------------------------

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// English name of a 1-based month number. `None` outside 1–12.
pub fn month_name(month: u32) -> Option<&'static str> {
    month
        .checked_sub(1)
        .and_then(|i| MONTH_NAMES.get(i as usize))
        .copied()
}

// ---------------------------------------------------------------------------
// RentalRecord – one row of the source table
// ---------------------------------------------------------------------------

/// A single day (or hour) of rentals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RentalRecord {
    pub date: NaiveDate,
    pub season: Season,
    /// Month code as stored in the `mnth` column (1–12).
    pub month: u32,
    pub casual_count: u64,
    pub registered_count: u64,
    /// Authoritative total; not required to equal casual + registered.
    pub total_count: u64,
}

impl RentalRecord {
    /// Whether `total_count == casual_count + registered_count`.
    pub fn total_is_consistent(&self) -> bool {
        self.casual_count.checked_add(self.registered_count) == Some(self.total_count)
    }

    /// Whether the `mnth` code agrees with the calendar month of `date`.
    pub fn month_matches_date(&self) -> bool {
        self.month == self.date.month()
    }
}

// ---------------------------------------------------------------------------
// RentalDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full loaded table, sorted ascending by date.
#[derive(Debug, Clone, Default)]
pub struct RentalDataset {
    records: Vec<RentalRecord>,
}

impl RentalDataset {
    /// Build a dataset, sorting records by date. Equal dates keep their
    /// input order.
    pub fn from_records(mut records: Vec<RentalRecord>) -> Self {
        records.sort_by_key(|r| r.date);
        RentalDataset { records }
    }

    pub fn records(&self) -> &[RentalRecord] {
        &self.records
    }

    pub fn min_date(&self) -> Option<NaiveDate> {
        self.records.first().map(|r| r.date)
    }

    pub fn max_date(&self) -> Option<NaiveDate> {
        self.records.last().map(|r| r.date)
    }

    /// The closed span `[min_date, max_date]`, or `None` for an empty table.
    pub fn full_range(&self) -> Option<DateRange> {
        let (start, end) = (self.min_date()?, self.max_date()?);
        DateRange::new(start, end).ok()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    pub(crate) fn record(
        date: NaiveDate,
        season: Season,
        casual: u64,
        registered: u64,
        total: u64,
    ) -> RentalRecord {
        RentalRecord {
            date,
            season,
            month: date.month(),
            casual_count: casual,
            registered_count: registered,
            total_count: total,
        }
    }

    #[test]
    fn season_codes_map_both_ways() {
        for season in Season::ALL {
            assert_eq!(Season::from_code(season.code() as i64), Some(season));
        }
        assert_eq!(Season::from_code(0), None);
        assert_eq!(Season::from_code(5), None);
        assert_eq!(Season::from_code(3).map(Season::name), Some("Summer"));
    }

    #[test]
    fn month_name_lookup() {
        assert_eq!(month_name(1), Some("January"));
        assert_eq!(month_name(12), Some("December"));
        assert_eq!(month_name(0), None);
        assert_eq!(month_name(13), None);
    }

    #[test]
    fn dataset_sorts_and_reports_span() {
        let ds = RentalDataset::from_records(vec![
            record(date(2011, 3, 2), Season::Spring, 1, 1, 2),
            record(date(2011, 1, 1), Season::Winter, 3, 4, 7),
            record(date(2011, 2, 1), Season::Winter, 0, 5, 5),
        ]);
        let dates: Vec<_> = ds.records().iter().map(|r| r.date).collect();
        assert_eq!(dates, vec![date(2011, 1, 1), date(2011, 2, 1), date(2011, 3, 2)]);
        assert_eq!(ds.min_date(), Some(date(2011, 1, 1)));
        assert_eq!(ds.max_date(), Some(date(2011, 3, 2)));
        let span = ds.full_range().unwrap();
        assert_eq!((span.start(), span.end()), (date(2011, 1, 1), date(2011, 3, 2)));
    }

    #[test]
    fn empty_dataset_has_no_span() {
        let ds = RentalDataset::default();
        assert!(ds.is_empty());
        assert!(ds.full_range().is_none());
    }

    #[test]
    fn consistency_checks() {
        let ok = record(date(2012, 6, 1), Season::Summer, 2, 3, 5);
        assert!(ok.total_is_consistent());
        assert!(ok.month_matches_date());

        let mut off = ok.clone();
        off.total_count = 6;
        off.month = 7;
        assert!(!off.total_is_consistent());
        assert!(!off.month_matches_date());
    }
}
