// Stormwatch - ui/panels/search.rs
//
// Search card: query input, data-source selector, quick-start hints,
// recent queries, and the fetch error banner.

use crate::app::state::AppState;
use crate::core::fixtures::FIXTURE_NAMES;
use crate::core::model::DataSource;
use crate::ui::theme;

/// Render the search card.
pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new("\u{1f50d}").size(16.0));

        let input = ui.add_sized(
            [(ui.available_width() - 220.0).max(120.0), 24.0],
            egui::TextEdit::singleline(&mut state.query)
                .hint_text("Enter city or state (e.g. Mumbai, Kerala, Bihar\u{2026})"),
        );

        let submitted =
            input.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

        let search_clicked = ui
            .add_enabled(!state.fetch_in_progress, egui::Button::new("Search"))
            .clicked();

        if (submitted || search_clicked) && !state.fetch_in_progress {
            state.pending_fetch = Some(state.query.clone());
        }

        // Data source selector.
        egui::ComboBox::from_id_salt("data_source")
            .selected_text(state.data_source.label())
            .show_ui(ui, |ui| {
                for source in DataSource::all() {
                    ui.selectable_value(&mut state.data_source, *source, source.label());
                }
            });
    });

    // Back to home, once something is shown.
    if state.report.is_some() && ui.small_button("\u{2190} Back to home").clicked() {
        state.clear_results();
    }

    // Quick-start hints before the first search.
    if state.report.is_none() && !state.fetch_in_progress {
        ui.add_space(4.0);
        ui.horizontal_wrapped(|ui| {
            ui.label(egui::RichText::new("Quick start:").color(theme::MUTED_TEXT));
            for name in FIXTURE_NAMES.iter().take(4) {
                if ui.small_button(*name).clicked() {
                    state.query = name.to_string();
                    state.pending_fetch = Some(name.to_string());
                }
            }
            ui.label(
                egui::RichText::new("\u{2014} or any other place in live mode.")
                    .color(theme::MUTED_TEXT),
            );
        });
    }

    // Recent queries.
    if !state.recent_queries.is_empty() {
        ui.horizontal_wrapped(|ui| {
            ui.label(egui::RichText::new("Recent:").color(theme::MUTED_TEXT));
            for query in state.recent_queries.clone() {
                if ui.small_button(&query).clicked() {
                    state.query = query.clone();
                    state.pending_fetch = Some(query.clone());
                }
            }
        });
    }

    // Error banner.
    if let Some(ref error) = state.fetch_error {
        ui.add_space(6.0);
        egui::Frame::new()
            .fill(theme::ERROR_BG)
            .corner_radius(6)
            .inner_margin(8)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.label("\u{26a0}");
                    ui.label(egui::RichText::new(error).color(theme::ERROR_TEXT));
                });
            });
    }

    // Non-fatal warnings (e.g. alert feed down).
    for warning in &state.warnings {
        ui.label(
            egui::RichText::new(warning)
                .color(theme::WARNING_TEXT)
                .size(11.5),
        );
    }
}
