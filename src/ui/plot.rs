use chrono::{Datelike, NaiveDate};
use eframe::egui::Ui;
use egui_plot::{Bar, BarChart, Line, Plot, PlotPoints, Points};

use bike_rental_dashboard::data::aggregate::{DailySummary, MonthlySummary, SeasonSummary};

use crate::color::{SeasonColors, PRIMARY};

const CHART_HEIGHT: f32 = 320.0;

/// Plot x coordinate for a date: days since 0001-01-01.
fn date_to_x(date: NaiveDate) -> f64 {
    f64::from(date.num_days_from_ce())
}

fn x_to_date(x: f64) -> Option<NaiveDate> {
    NaiveDate::from_num_days_from_ce_opt(x.round() as i32)
}

/// Label for bar `x` when bars sit at 0, 1, 2, … Non-integer marks are blank.
fn category_label(labels: &[String], x: f64) -> String {
    if (x - x.round()).abs() > f64::EPSILON || x < 0.0 {
        return String::new();
    }
    labels.get(x.round() as usize).cloned().unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Daily line chart
// ---------------------------------------------------------------------------

/// Casual rentals per day.
pub fn daily_chart(ui: &mut Ui, daily: &[DailySummary]) {
    let series: Vec<[f64; 2]> = daily
        .iter()
        .map(|d| [date_to_x(d.date), d.rent_count as f64])
        .collect();

    Plot::new("daily_plot")
        .height(CHART_HEIGHT)
        .y_axis_label("Casual rentals")
        .x_axis_formatter(|mark, _range| {
            x_to_date(mark.value)
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default()
        })
        .label_formatter(|_name, point| match x_to_date(point.x) {
            Some(d) => format!("{d}\n{:.0}", point.y),
            None => String::new(),
        })
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(false)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(PlotPoints::from(series.clone()))
                    .color(PRIMARY)
                    .width(2.0),
            );
            plot_ui.points(Points::new(PlotPoints::from(series)).color(PRIMARY).radius(3.0));
        });
}

// ---------------------------------------------------------------------------
// Monthly bar chart
// ---------------------------------------------------------------------------

/// Casual rentals per calendar month, labelled by month name. When the
/// range spans years the label carries the year too.
pub fn monthly_chart(ui: &mut Ui, monthly: &[MonthlySummary]) {
    let multi_year = monthly
        .first()
        .zip(monthly.last())
        .is_some_and(|(a, b)| a.month_start.year() != b.month_start.year());

    let labels: Vec<String> = monthly
        .iter()
        .map(|m| {
            if multi_year {
                format!("{} {}", m.month_name, m.month_start.year())
            } else {
                m.month_name.to_string()
            }
        })
        .collect();

    let bars: Vec<Bar> = monthly
        .iter()
        .zip(&labels)
        .enumerate()
        .map(|(i, (m, label))| {
            Bar::new(i as f64, m.rent_count as f64)
                .name(label)
                .fill(PRIMARY)
                .width(0.7)
        })
        .collect();

    Plot::new("monthly_plot")
        .height(CHART_HEIGHT)
        .x_axis_label("Month")
        .y_axis_label("Rental Count")
        .x_axis_formatter(move |mark, _range| category_label(&labels, mark.value))
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).color(PRIMARY));
        });
}

// ---------------------------------------------------------------------------
// Season bar chart
// ---------------------------------------------------------------------------

/// Total rentals per season.
pub fn season_chart(ui: &mut Ui, seasons: &[SeasonSummary], colors: &SeasonColors) {
    let labels: Vec<String> = seasons.iter().map(|s| s.season_name.to_string()).collect();

    let bars: Vec<Bar> = seasons
        .iter()
        .enumerate()
        .map(|(i, s)| {
            Bar::new(i as f64, s.revenue as f64)
                .name(s.season_name)
                .fill(colors.color_for(s.season))
                .width(0.6)
        })
        .collect();

    Plot::new("season_plot")
        .height(CHART_HEIGHT)
        .x_axis_label("Season")
        .y_axis_label("Total Revenue")
        .x_axis_formatter(move |mark, _range| category_label(&labels, mark.value))
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });
}
