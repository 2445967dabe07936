// Stormwatch - ui/panels/forecast.rs
//
// Forecast strip: one card per day.

use crate::core::model::ForecastDay;
use crate::ui::theme;

/// Render the forecast strip.
pub fn render(ui: &mut egui::Ui, forecast: &[ForecastDay]) {
    ui.label(
        egui::RichText::new("5-DAY FORECAST")
            .small()
            .color(theme::ACCENT),
    );
    ui.add_space(4.0);

    if forecast.is_empty() {
        ui.label(egui::RichText::new("No forecast data returned.").color(theme::MUTED_TEXT));
        return;
    }

    ui.horizontal_wrapped(|ui| {
        for day in forecast {
            ui.group(|ui| {
                ui.set_width(theme::FORECAST_CARD_WIDTH);
                ui.vertical_centered(|ui| {
                    ui.label(egui::RichText::new(&day.day).strong());
                    ui.label(
                        egui::RichText::new(theme::condition_glyph(&day.condition)).size(22.0),
                    );
                    ui.label(
                        egui::RichText::new(format!("{}\u{00b0}", day.high_c))
                            .size(18.0)
                            .strong(),
                    );
                    ui.label(
                        egui::RichText::new(format!("{}\u{00b0}", day.low_c))
                            .color(theme::MUTED_TEXT),
                    );
                    ui.label(egui::RichText::new(&day.condition).size(11.0));
                });
            });
        }
    });
}
