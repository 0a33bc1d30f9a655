use eframe::egui::{self, ScrollArea, Ui};

use crate::state::AppState;
use crate::ui::{metrics, panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct BikeDashboardApp {
    pub state: AppState,
}

impl BikeDashboardApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for BikeDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: date range ----
        egui::SidePanel::left("range_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: metrics and charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| dashboard(ui, &self.state));
        });
    }
}

fn dashboard(ui: &mut Ui, state: &AppState) {
    let summary = &state.summary;

    if summary.record_count == 0 {
        ui.label(format!("No rentals in {}.", state.range));
    }

    ui.heading("Daily Rent");
    metrics::totals_row(ui, &summary.daily_totals);
    plot::daily_chart(ui, &summary.daily);
    ui.add_space(16.0);

    ui.heading("Monthly Rent");
    metrics::totals_row(ui, &summary.monthly_totals);
    plot::monthly_chart(ui, &summary.monthly);
    ui.add_space(16.0);

    ui.heading("Season Rent");
    plot::season_chart(ui, &summary.seasons, &state.season_colors);
}
