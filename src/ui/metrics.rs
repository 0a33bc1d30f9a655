use eframe::egui::{RichText, Ui};

use bike_rental_dashboard::data::aggregate::Totals;
use bike_rental_dashboard::report::format_count;

/// A single labelled number, like a dashboard "metric" tile.
fn metric(ui: &mut Ui, label: &str, value: u64) {
    ui.vertical(|ui: &mut Ui| {
        ui.label(RichText::new(label).weak());
        ui.label(RichText::new(format_count(value)).size(28.0).strong());
    });
}

/// Three metric tiles side by side for a summary table's totals.
pub fn totals_row(ui: &mut Ui, totals: &Totals) {
    ui.columns(3, |cols: &mut [Ui]| {
        metric(&mut cols[0], "Total Casual Rents", totals.rent_count);
        metric(&mut cols[1], "Total Register Rent", totals.register);
        metric(&mut cols[2], "Total Rent", totals.revenue);
    });
}
