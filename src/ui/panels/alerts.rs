// Stormwatch - ui/panels/alerts.rs
//
// Disaster alert cards, severity-coloured.

use crate::core::model::DisasterAlert;
use crate::ui::theme;

/// Render the alert panel.
pub fn render(ui: &mut egui::Ui, alerts: &[DisasterAlert]) {
    ui.label(
        egui::RichText::new("DISASTER ALERTS")
            .small()
            .color(theme::WARNING_TEXT),
    );
    ui.add_space(4.0);

    // The fetch pipeline synthesises an advisory when nothing is active,
    // so this branch is a belt-and-braces display state only.
    if alerts.is_empty() {
        ui.label(
            egui::RichText::new("All clear \u{00b7} no active warnings").color(theme::OK_TEXT),
        );
        return;
    }

    egui::ScrollArea::vertical()
        .id_salt("alert_list")
        .max_height(theme::ALERT_LIST_MAX_HEIGHT)
        .show(ui, |ui| {
            for alert in alerts {
                let colour = theme::severity_colour(&alert.severity);
                egui::Frame::new()
                    .fill(theme::severity_bg_colour(&alert.severity))
                    .stroke(egui::Stroke::new(1.0, colour))
                    .corner_radius(6)
                    .inner_margin(8)
                    .show(ui, |ui| {
                        ui.horizontal(|ui| {
                            ui.label(
                                egui::RichText::new(format!("\u{26a0} {}", alert.title))
                                    .strong()
                                    .color(colour),
                            );
                            ui.label(
                                egui::RichText::new(alert.severity.label())
                                    .small()
                                    .color(colour),
                            );
                        });
                        ui.label(egui::RichText::new(&alert.description).size(12.0));
                        ui.label(
                            egui::RichText::new(format!(
                                "{} \u{00b7} \u{1f4cd} {}",
                                alert.kind, alert.area
                            ))
                            .small()
                            .color(theme::MUTED_TEXT),
                        );
                    });
                ui.add_space(4.0);
            }
        });
}
