use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::DatePickerButton;

use bike_rental_dashboard::data::loader::load_file;
use bike_rental_dashboard::report::render_json;

use crate::state::AppState;

const LOGO_URL: &str = "https://github.com/dicodingacademy/assets/raw/main/logo.png";

// ---------------------------------------------------------------------------
// Left side panel – date range
// ---------------------------------------------------------------------------

/// Render the left panel: logo and the date-range pickers.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.add(
            egui::Image::new(LOGO_URL)
                .max_width(ui.available_width() * 0.8)
                .max_height(120.0),
        );
    });
    ui.add_space(4.0);

    ui.heading("Date range");
    ui.separator();

    if state.dataset.is_empty() {
        ui.label("No rows loaded.");
        return;
    }

    let mut changed = false;

    egui::Grid::new("date_range_grid")
        .num_columns(2)
        .spacing([8.0, 6.0])
        .show(ui, |ui: &mut Ui| {
            ui.label("Start");
            changed |= ui
                .add(DatePickerButton::new(&mut state.start_input).id_salt("start_date"))
                .changed();
            ui.end_row();

            ui.label("End");
            changed |= ui
                .add(DatePickerButton::new(&mut state.end_input).id_salt("end_date"))
                .changed();
            ui.end_row();
        });

    if changed {
        state.apply_inputs();
    }

    ui.add_space(4.0);
    if ui.button("Reset").clicked() {
        state.reset_range();
    }

    ui.add_space(8.0);
    ui.label(format!("{} days selected", state.range.num_days()));
    if let Some(bounds) = &state.bounds {
        ui.label(RichText::new(format!("Data covers {bounds}")).weak());
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Export summary…").clicked() {
                export_summary_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!(
            "{} rows loaded, {} in range",
            state.dataset.len(),
            state.summary.record_count
        ));

        ui.separator();

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open rental data")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        match load_file(&path) {
            Ok(dataset) => {
                log::info!("Loaded {} rows from {}", dataset.len(), path.display());
                state.set_dataset(path.display().to_string(), dataset);
            }
            Err(e) => {
                // Keep showing the previous dataset.
                log::error!("Failed to load file: {e}");
                state.status_message = Some(format!("Error: {e}"));
            }
        }
    }
}

pub fn export_summary_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export summary")
        .set_file_name("summary.json")
        .add_filter("JSON", &["json"])
        .save_file();

    let Some(path) = file else {
        return;
    };

    let written = render_json(&state.range, &state.summary)
        .map_err(|e| e.to_string())
        .and_then(|json| std::fs::write(&path, json).map_err(|e| e.to_string()));

    match written {
        Ok(()) => {
            log::info!("Exported summary for {} to {}", state.range, path.display());
            state.status_message = None;
        }
        Err(e) => {
            log::error!("Failed to export summary: {e}");
            state.status_message = Some(format!("Export failed: {e}"));
        }
    }
}
