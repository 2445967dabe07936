// Stormwatch - ui/panels/current.rs
//
// Current-conditions card: place, temperature, condition, and the
// derived comfort readouts.

use crate::core::conditions;
use crate::core::model::CurrentConditions;
use crate::ui::theme;

/// Render the current-conditions card.
pub fn render(ui: &mut egui::Ui, current: &CurrentConditions) {
    ui.label(
        egui::RichText::new("CURRENT CONDITIONS")
            .small()
            .color(theme::ACCENT),
    );
    ui.heading(format!("\u{1f4cd} {}", current.location));
    ui.add_space(6.0);

    ui.horizontal(|ui| {
        // Big temperature + condition on the left.
        ui.vertical(|ui| {
            ui.label(
                egui::RichText::new(format!("{}\u{00b0}C", current.temperature_c))
                    .size(theme::BIG_TEMP_SIZE)
                    .strong(),
            );
            ui.label(format!(
                "{} {}",
                theme::condition_glyph(&current.condition),
                current.condition
            ));
        });

        ui.add_space(24.0);

        // Detail grid on the right.
        egui::Grid::new("current_grid")
            .num_columns(2)
            .spacing([16.0, 4.0])
            .show(ui, |ui| {
                ui.label(egui::RichText::new("Feels like").color(theme::MUTED_TEXT));
                ui.label(format!("{}\u{00b0}C", current.feels_like_c));
                ui.end_row();

                ui.label(egui::RichText::new("Humidity").color(theme::MUTED_TEXT));
                let humidity_hint = if conditions::humidity_is_comfortable(current.humidity_pct) {
                    "stable"
                } else {
                    "check air flow"
                };
                ui.label(format!("{}%  ({humidity_hint})", current.humidity_pct));
                ui.end_row();

                ui.label(egui::RichText::new("Wind").color(theme::MUTED_TEXT));
                let wind_hint = if conditions::wind_is_gusty(current.wind_kmh) {
                    "gusty \u{00b7} secure loose items"
                } else {
                    "calm breeze"
                };
                ui.label(format!("{} km/h  ({wind_hint})", current.wind_kmh));
                ui.end_row();

                ui.label(egui::RichText::new("Comfort score").color(theme::MUTED_TEXT));
                ui.label(format!(
                    "{}%",
                    conditions::comfort_score(current.temperature_c, current.humidity_pct)
                ));
                ui.end_row();

                ui.label(egui::RichText::new("Source").color(theme::MUTED_TEXT));
                ui.label(current.source.label());
                ui.end_row();
            });
    });
}
