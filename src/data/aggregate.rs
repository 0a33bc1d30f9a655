use std::collections::{BTreeMap, BTreeSet};

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use super::model::{month_name, RentalRecord, Season};

// ---------------------------------------------------------------------------
// Summary rows
// ---------------------------------------------------------------------------

/// One row per distinct calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailySummary {
    pub date: NaiveDate,
    /// Σ casual rentals.
    pub rent_count: u64,
    /// Σ registered rentals.
    pub register: u64,
    /// Σ total rentals (a count, not money).
    pub revenue: u64,
}

/// One row per calendar month present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlySummary {
    /// First day of the bucket's month.
    pub month_start: NaiveDate,
    /// Distinct `mnth` codes seen in the bucket (normally exactly one).
    pub months: BTreeSet<u32>,
    pub month_name: &'static str,
    pub rent_count: u64,
    pub register: u64,
    pub revenue: u64,
}

/// One row per season present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeasonSummary {
    pub season: Season,
    pub season_name: &'static str,
    pub revenue: u64,
}

/// Summary rows that carry the three rental counters.
pub trait RentalCounts {
    fn counts(&self) -> Totals;
}

impl RentalCounts for DailySummary {
    fn counts(&self) -> Totals {
        Totals {
            rent_count: self.rent_count,
            register: self.register,
            revenue: self.revenue,
        }
    }
}

impl RentalCounts for MonthlySummary {
    fn counts(&self) -> Totals {
        Totals {
            rent_count: self.rent_count,
            register: self.register,
            revenue: self.revenue,
        }
    }
}

/// Scalar totals shown as metrics above each chart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub rent_count: u64,
    pub register: u64,
    pub revenue: u64,
}

impl Totals {
    /// Sum the counters of a summary sequence.
    pub fn of<T: RentalCounts>(rows: &[T]) -> Totals {
        rows.iter().fold(Totals::default(), |acc, row| acc + row.counts())
    }

    fn add_record(&mut self, r: &RentalRecord) {
        self.rent_count += r.casual_count;
        self.register += r.registered_count;
        self.revenue += r.total_count;
    }
}

impl std::ops::Add for Totals {
    type Output = Totals;

    fn add(self, rhs: Totals) -> Totals {
        Totals {
            rent_count: self.rent_count + rhs.rent_count,
            register: self.register + rhs.register,
            revenue: self.revenue + rhs.revenue,
        }
    }
}

// ---------------------------------------------------------------------------
// Aggregations
// ---------------------------------------------------------------------------

/// Resample to days: one row per distinct date, ascending. Rows sharing a
/// date merge; days without rows are absent.
pub fn daily_aggregate(records: &[RentalRecord]) -> Vec<DailySummary> {
    let mut buckets: BTreeMap<NaiveDate, Totals> = BTreeMap::new();
    for r in records {
        buckets.entry(r.date).or_default().add_record(r);
    }
    buckets
        .into_iter()
        .map(|(date, t)| DailySummary {
            date,
            rent_count: t.rent_count,
            register: t.register,
            revenue: t.revenue,
        })
        .collect()
}

/// Resample to calendar months: one row per (year, month) present,
/// ascending by month start.
pub fn monthly_aggregate(records: &[RentalRecord]) -> Vec<MonthlySummary> {
    let mut buckets: BTreeMap<(i32, u32), (Totals, BTreeSet<u32>)> = BTreeMap::new();
    for r in records {
        let (totals, months) = buckets.entry((r.date.year(), r.date.month())).or_default();
        totals.add_record(r);
        months.insert(r.month);
    }
    buckets
        .into_iter()
        .filter_map(|((year, month), (t, months))| {
            // Keys come from valid dates, so both lookups succeed.
            Some(MonthlySummary {
                month_start: NaiveDate::from_ymd_opt(year, month, 1)?,
                months,
                month_name: month_name(month)?,
                rent_count: t.rent_count,
                register: t.register,
                revenue: t.revenue,
            })
        })
        .collect()
}

/// Total rentals per season over the whole input, ordered by season code
/// (Winter, Spring, Summer, Fall) regardless of input order. Seasons with
/// no rows are absent.
pub fn season_aggregate(records: &[RentalRecord]) -> Vec<SeasonSummary> {
    let mut buckets: BTreeMap<Season, u64> = BTreeMap::new();
    for r in records {
        *buckets.entry(r.season).or_default() += r.total_count;
    }
    buckets
        .into_iter()
        .map(|(season, revenue)| SeasonSummary {
            season,
            season_name: season.name(),
            revenue,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Everything the dashboard shows for one range
// ---------------------------------------------------------------------------

/// The three summary tables plus their metric totals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DashboardSummary {
    /// Number of filtered rows the summaries were built from.
    pub record_count: usize,
    pub daily: Vec<DailySummary>,
    pub daily_totals: Totals,
    pub monthly: Vec<MonthlySummary>,
    pub monthly_totals: Totals,
    pub seasons: Vec<SeasonSummary>,
}

/// Run all three aggregations over already-filtered records.
pub fn summarize(records: &[RentalRecord]) -> DashboardSummary {
    let daily = daily_aggregate(records);
    let monthly = monthly_aggregate(records);
    DashboardSummary {
        record_count: records.len(),
        daily_totals: Totals::of(&daily),
        monthly_totals: Totals::of(&monthly),
        daily,
        monthly,
        seasons: season_aggregate(records),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::{date, record};

    fn scenario() -> Vec<RentalRecord> {
        vec![
            record(date(2023, 1, 1), Season::Winter, 5, 10, 15),
            record(date(2023, 1, 1), Season::Winter, 2, 3, 5),
            record(date(2023, 2, 15), Season::Winter, 1, 1, 2),
        ]
    }

    fn spread() -> Vec<RentalRecord> {
        vec![
            record(date(2011, 9, 30), Season::Fall, 10, 20, 30),
            record(date(2011, 3, 21), Season::Spring, 4, 6, 10),
            record(date(2011, 1, 2), Season::Winter, 1, 2, 3),
            record(date(2011, 3, 1), Season::Winter, 2, 2, 4),
            record(date(2011, 7, 4), Season::Summer, 7, 8, 15),
            record(date(2011, 3, 21), Season::Spring, 1, 1, 2),
            record(date(2012, 1, 15), Season::Winter, 3, 3, 6),
        ]
    }

    #[test]
    fn daily_merges_duplicate_dates() {
        let daily = daily_aggregate(&scenario());
        assert_eq!(
            daily,
            vec![
                DailySummary { date: date(2023, 1, 1), rent_count: 7, register: 13, revenue: 20 },
                DailySummary { date: date(2023, 2, 15), rent_count: 1, register: 1, revenue: 2 },
            ]
        );
    }

    #[test]
    fn season_sums_total_over_whole_range() {
        let seasons = season_aggregate(&scenario());
        assert_eq!(
            seasons,
            vec![SeasonSummary { season: Season::Winter, season_name: "Winter", revenue: 22 }]
        );
    }

    #[test]
    fn seasons_follow_code_order_not_input_order() {
        let names: Vec<_> = season_aggregate(&spread()).iter().map(|s| s.season_name).collect();
        assert_eq!(names, vec!["Winter", "Spring", "Summer", "Fall"]);
    }

    #[test]
    fn monthly_buckets_by_year_and_month() {
        let monthly = monthly_aggregate(&spread());
        let keys: Vec<_> = monthly.iter().map(|m| (m.month_start, m.month_name)).collect();
        assert_eq!(
            keys,
            vec![
                (date(2011, 1, 1), "January"),
                (date(2011, 3, 1), "March"),
                (date(2011, 7, 1), "July"),
                (date(2011, 9, 1), "September"),
                (date(2012, 1, 1), "January"),
            ]
        );
        let march = &monthly[1];
        assert_eq!((march.rent_count, march.register, march.revenue), (7, 9, 16));
        assert_eq!(march.months, BTreeSet::from([3]));
    }

    #[test]
    fn monthly_collects_every_month_code_seen() {
        let mut odd = record(date(2011, 4, 30), Season::Spring, 1, 1, 2);
        odd.month = 5;
        let rows = vec![record(date(2011, 4, 1), Season::Spring, 1, 1, 2), odd];
        let monthly = monthly_aggregate(&rows);
        assert_eq!(monthly.len(), 1);
        assert_eq!(monthly[0].months, BTreeSet::from([4, 5]));
        assert_eq!(monthly[0].month_name, "April");
    }

    #[test]
    fn totals_are_conserved() {
        let rows = spread();
        let casual: u64 = rows.iter().map(|r| r.casual_count).sum();
        let registered: u64 = rows.iter().map(|r| r.registered_count).sum();
        let total: u64 = rows.iter().map(|r| r.total_count).sum();
        let expected = Totals { rent_count: casual, register: registered, revenue: total };

        assert_eq!(Totals::of(&daily_aggregate(&rows)), expected);
        assert_eq!(Totals::of(&monthly_aggregate(&rows)), expected);
        let season_total: u64 = season_aggregate(&rows).iter().map(|s| s.revenue).sum();
        assert_eq!(season_total, total);
    }

    #[test]
    fn outputs_are_strictly_ascending() {
        let rows = spread();
        let daily = daily_aggregate(&rows);
        assert!(daily.windows(2).all(|w| w[0].date < w[1].date));
        let monthly = monthly_aggregate(&rows);
        assert!(monthly.windows(2).all(|w| w[0].month_start < w[1].month_start));
    }

    #[test]
    fn daily_is_idempotent() {
        let once = daily_aggregate(&spread());
        let as_records: Vec<RentalRecord> = once
            .iter()
            .map(|d| RentalRecord {
                date: d.date,
                season: Season::Winter,
                month: d.date.month(),
                casual_count: d.rent_count,
                registered_count: d.register,
                total_count: d.revenue,
            })
            .collect();
        assert_eq!(daily_aggregate(&as_records), once);
    }

    #[test]
    fn empty_input_gives_empty_output() {
        let summary = summarize(&[]);
        assert_eq!(summary, DashboardSummary::default());
    }

    #[test]
    fn single_record_passes_through() {
        let r = record(date(2012, 8, 17), Season::Summer, 1483, 5665, 7148);
        let summary = summarize(std::slice::from_ref(&r));
        assert_eq!(summary.record_count, 1);
        assert_eq!(
            summary.daily,
            vec![DailySummary { date: r.date, rent_count: 1483, register: 5665, revenue: 7148 }]
        );
        assert_eq!(summary.monthly.len(), 1);
        assert_eq!(summary.monthly[0].month_name, "August");
        assert_eq!(summary.monthly[0].revenue, 7148);
        assert_eq!(summary.seasons[0].revenue, 7148);
        assert_eq!(summary.daily_totals, summary.monthly_totals);
    }
}
