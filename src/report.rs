use std::fmt::Write as _;

use serde::Serialize;

use crate::data::aggregate::{DashboardSummary, Totals};
use crate::data::filter::DateRange;

/// Group digits in threes: `1234567` → `"1,234,567"`.
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[derive(Serialize)]
struct JsonReport<'a> {
    range: &'a DateRange,
    #[serde(flatten)]
    summary: &'a DashboardSummary,
}

/// The range and summary as pretty-printed JSON.
pub fn render_json(range: &DateRange, summary: &DashboardSummary) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&JsonReport { range, summary })
}

fn write_totals(out: &mut String, totals: &Totals) {
    let _ = writeln!(
        out,
        "  Total Casual Rents: {}   Total Register Rent: {}   Total Rent: {}",
        format_count(totals.rent_count),
        format_count(totals.register),
        format_count(totals.revenue),
    );
}

/// Plain-text rendering of every table, for terminals and logs.
pub fn render_text(range: &DateRange, summary: &DashboardSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Range: {range} ({} rows)", summary.record_count);

    let _ = writeln!(out, "\nDaily Rent");
    write_totals(&mut out, &summary.daily_totals);
    let _ = writeln!(out, "  {:<12} {:>10} {:>10} {:>10}", "date", "casual", "registered", "total");
    for d in &summary.daily {
        let _ = writeln!(
            out,
            "  {:<12} {:>10} {:>10} {:>10}",
            d.date.to_string(),
            d.rent_count,
            d.register,
            d.revenue
        );
    }

    let _ = writeln!(out, "\nMonthly Rent");
    write_totals(&mut out, &summary.monthly_totals);
    let _ = writeln!(out, "  {:<16} {:>10} {:>10} {:>10}", "month", "casual", "registered", "total");
    for m in &summary.monthly {
        let label = format!("{} {}", m.month_name, m.month_start.format("%Y"));
        let _ = writeln!(
            out,
            "  {:<16} {:>10} {:>10} {:>10}",
            label, m.rent_count, m.register, m.revenue
        );
    }

    let _ = writeln!(out, "\nSeason Rent");
    for s in &summary.seasons {
        let _ = writeln!(out, "  {:<8} {:>12}", s.season_name, format_count(s.revenue));
    }

    out
}
