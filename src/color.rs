use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use bike_rental_dashboard::data::model::Season;

/// Light blue used for the daily line and the monthly bars.
pub const PRIMARY: Color32 = Color32::from_rgb(0x90, 0xCA, 0xF9);

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct, muted colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            // Start at blue so winter reads cold.
            let hue = 210.0 + (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.45, 0.6);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Season → Color32
// ---------------------------------------------------------------------------

/// One fixed colour per season, so a season keeps its colour whichever
/// subset of seasons is in range.
#[derive(Debug, Clone)]
pub struct SeasonColors {
    colors: Vec<Color32>,
}

impl Default for SeasonColors {
    fn default() -> Self {
        SeasonColors {
            colors: generate_palette(Season::ALL.len()),
        }
    }
}

impl SeasonColors {
    pub fn color_for(&self, season: Season) -> Color32 {
        self.colors
            .get(usize::from(season.code()) - 1)
            .copied()
            .unwrap_or(Color32::GRAY)
    }
}
