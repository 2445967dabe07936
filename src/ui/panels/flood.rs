// Stormwatch - ui/panels/flood.rs
//
// Flood-severity widget: six hydrological readings in, one delegated
// assessment out.

use crate::app::state::AppState;
use crate::ui::theme;

/// Render the flood-prediction widget.
pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    ui.label(
        egui::RichText::new("FLOOD SEVERITY ESTIMATE")
            .small()
            .color(theme::OK_TEXT),
    );
    ui.label(
        egui::RichText::new(
            "Enter recent rainfall, river level and soil conditions. \
             The estimate comes from the external prediction service.",
        )
        .size(12.0)
        .color(theme::MUTED_TEXT),
    );
    ui.add_space(6.0);

    let form = &mut state.flood_form;
    egui::Grid::new("flood_form")
        .num_columns(4)
        .spacing([12.0, 6.0])
        .show(ui, |ui| {
            ui.label("Rain, last 24 h (mm)");
            ui.add(
                egui::DragValue::new(&mut form.rain_mm)
                    .speed(1.0)
                    .range(0.0..=1000.0),
            );
            ui.label("Rain, last 3 days (mm)");
            ui.add(
                egui::DragValue::new(&mut form.rain3d_mm)
                    .speed(1.0)
                    .range(0.0..=2000.0),
            );
            ui.end_row();

            ui.label("River level (m)");
            ui.add(
                egui::DragValue::new(&mut form.river_level_m)
                    .speed(0.1)
                    .range(0.0..=150.0),
            );
            ui.label("Danger level (m)");
            ui.add(
                egui::DragValue::new(&mut form.danger_level_m)
                    .speed(0.1)
                    .range(0.0..=150.0),
            );
            ui.end_row();

            ui.label("Soil moisture (%)");
            ui.add(
                egui::DragValue::new(&mut form.soil_moist_pct)
                    .speed(1.0)
                    .range(0.0..=100.0),
            );
            ui.label("Upstream rain (mm)");
            ui.add(
                egui::DragValue::new(&mut form.upstream_rain_mm)
                    .speed(1.0)
                    .range(0.0..=2000.0),
            );
            ui.end_row();
        });

    ui.add_space(6.0);

    let label = if state.predict_in_progress {
        "Predicting\u{2026}"
    } else {
        "Predict Flood Severity"
    };
    if ui
        .add_enabled(!state.predict_in_progress, egui::Button::new(label))
        .clicked()
    {
        state.pending_predict = true;
    }

    if let Some(ref error) = state.flood_error {
        ui.add_space(4.0);
        ui.label(egui::RichText::new(error).color(theme::ERROR_TEXT).size(12.0));
    }

    if let Some(ref assessment) = state.flood_assessment {
        ui.add_space(6.0);
        let colour = theme::flood_severity_colour(assessment.severity_index);
        egui::Frame::new()
            .stroke(egui::Stroke::new(1.0, colour))
            .corner_radius(6)
            .inner_margin(8)
            .show(ui, |ui| {
                ui.label(
                    egui::RichText::new(format!(
                        "Predicted severity: {}",
                        assessment.severity_label.to_uppercase()
                    ))
                    .strong()
                    .color(colour),
                );
                ui.label(
                    egui::RichText::new(format!(
                        "Model test accuracy: {:.1}%",
                        assessment.model_accuracy * 100.0
                    ))
                    .small()
                    .color(theme::MUTED_TEXT),
                );
                if assessment.tba_alert == 1 {
                    ui.label(
                        egui::RichText::new(
                            "\u{26a0} Rule-based threshold alert is active \
                             (very high rain or river level).",
                        )
                        .small()
                        .color(theme::WARNING_TEXT),
                    );
                }
            });
    }
}
