// Stormwatch - gui.rs
//
// Top-level eframe::App implementation.
// Wires together all UI panels and manages the fetch/predict lifecycles.

use crate::app::fetch::FetchManager;
use crate::app::predict::PredictManager;
use crate::app::state::{AppState, ResolvedPlace};
use crate::core::model::{FetchProgress, PredictProgress};
use crate::ui;

/// The Stormwatch application.
pub struct StormwatchApp {
    pub state: AppState,
    pub fetch_manager: FetchManager,
    pub predict_manager: PredictManager,
}

impl StormwatchApp {
    /// Create a new application instance with the given state.
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            fetch_manager: FetchManager::new(),
            predict_manager: PredictManager::new(),
        }
    }

    fn handle_fetch_progress(&mut self, ctx: &egui::Context) {
        let messages = self.fetch_manager.poll_progress();
        let had_messages = !messages.is_empty();

        for msg in messages {
            match msg {
                FetchProgress::Started { query, source } => {
                    self.state.fetch_in_progress = true;
                    self.state.resolved_place = None;
                    self.state.status_message =
                        format!("Contacting {} for '{query}'\u{2026}", source.label());
                }
                FetchProgress::Geocoded {
                    place,
                    latitude,
                    longitude,
                } => {
                    self.state.status_message = format!(
                        "Resolved {place} ({latitude:.2}, {longitude:.2}); fetching forecast\u{2026}"
                    );
                    self.state.resolved_place = Some(ResolvedPlace {
                        name: place,
                        latitude,
                        longitude,
                    });
                }
                FetchProgress::Completed { report } => {
                    self.state.status_message = format!(
                        "Weather for {} \u{2014} {} alert(s).",
                        report.current.location,
                        report.alerts.len()
                    );
                    let query = self.state.query.clone();
                    self.state.remember_query(&query);
                    self.state.report = Some(*report);
                    self.state.fetch_error = None;
                    self.state.fetch_in_progress = false;
                    // Persist the session so the next launch restores this search.
                    self.state.save_session();
                }
                FetchProgress::Warning { message } => {
                    self.state.push_warning(message);
                }
                FetchProgress::Failed { error } => {
                    self.state.status_message = "Fetch failed.".to_string();
                    self.state.fetch_error = Some(error);
                    self.state.report = None;
                    self.state.fetch_in_progress = false;
                }
                FetchProgress::Cancelled => {
                    self.state.status_message = "Fetch cancelled.".to_string();
                    self.state.fetch_in_progress = false;
                }
            }
        }

        // Repaint while a fetch is active so progress updates appear promptly.
        if had_messages || self.state.fetch_in_progress {
            ctx.request_repaint();
        }
    }

    fn handle_predict_progress(&mut self, ctx: &egui::Context) {
        let messages = self.predict_manager.poll_progress();
        let had_messages = !messages.is_empty();

        for msg in messages {
            match msg {
                PredictProgress::Completed { assessment } => {
                    self.state.status_message = format!(
                        "Flood severity estimate: {}.",
                        assessment.severity_label
                    );
                    self.state.flood_assessment = Some(assessment);
                    self.state.flood_error = None;
                    self.state.predict_in_progress = false;
                    // The form values are part of the session.
                    self.state.save_session();
                }
                PredictProgress::Failed { error } => {
                    self.state.flood_error = Some(error);
                    self.state.predict_in_progress = false;
                }
            }
        }

        if had_messages || self.state.predict_in_progress {
            ctx.request_repaint();
        }
    }

    /// Act on flags set by panels during the previous frame.
    fn handle_panel_requests(&mut self) {
        // pending_fetch: the search panel requested a new fetch.
        if let Some(query) = self.state.pending_fetch.take() {
            self.state.fetch_error = None;
            self.state.warnings.clear();
            self.state.fetch_in_progress = true;
            self.fetch_manager
                .start_fetch(query, self.state.data_source, self.state.config.clone());
        }

        // initial_fetch: set at startup when restoring a previous session.
        if let Some(query) = self.state.initial_fetch.take() {
            self.state.fetch_in_progress = true;
            self.fetch_manager
                .start_fetch(query, self.state.data_source, self.state.config.clone());
        }

        // request_cancel: the status bar requested the fetch be cancelled.
        if self.state.request_cancel {
            self.state.request_cancel = false;
            self.fetch_manager.cancel_fetch();
        }

        // pending_predict: the flood panel submitted the form.
        if self.state.pending_predict {
            self.state.pending_predict = false;
            self.state.predict_in_progress = true;
            self.state.flood_error = None;
            self.state.flood_assessment = None;
            self.predict_manager
                .start_predict(self.state.flood_form, self.state.config.clone());
        }
    }

    fn render_menu_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    let has_report = self.state.report.is_some();

                    ui.add_enabled_ui(has_report, |ui| {
                        if ui.button("Export Report (JSON)\u{2026}").clicked() {
                            self.export_report_json();
                            ui.close_menu();
                        }
                        if ui.button("Export Alerts (CSV)\u{2026}").clicked() {
                            self.export_alerts_csv();
                            ui.close_menu();
                        }
                    });

                    ui.separator();
                    if ui.button("Exit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
                ui.menu_button("Help", |ui| {
                    if ui.button("About Stormwatch").clicked() {
                        self.state.show_about = true;
                        ui.close_menu();
                    }
                });
            });
        });
    }

    fn export_report_json(&mut self) {
        let Some(report) = self.state.report.clone() else {
            return;
        };
        if let Some(dest) = rfd::FileDialog::new()
            .add_filter("JSON", &["json"])
            .set_file_name("weather-report.json")
            .save_file()
        {
            match std::fs::File::create(&dest) {
                Ok(f) => match crate::core::export::export_report_json(&report, f, &dest) {
                    Ok(()) => {
                        self.state.status_message =
                            format!("Exported report to '{}'.", dest.display());
                    }
                    Err(e) => {
                        self.state.status_message = format!("JSON export failed: {e}");
                    }
                },
                Err(e) => {
                    self.state.status_message = format!("Cannot create file: {e}");
                }
            }
        }
    }

    fn export_alerts_csv(&mut self) {
        let Some(report) = self.state.report.clone() else {
            return;
        };
        if let Some(dest) = rfd::FileDialog::new()
            .add_filter("CSV", &["csv"])
            .set_file_name("alerts.csv")
            .save_file()
        {
            match std::fs::File::create(&dest) {
                Ok(f) => match crate::core::export::export_alerts_csv(&report.alerts, f, &dest) {
                    Ok(n) => {
                        self.state.status_message = format!("Exported {n} alert(s) to CSV.");
                    }
                    Err(e) => {
                        self.state.status_message = format!("CSV export failed: {e}");
                    }
                },
                Err(e) => {
                    self.state.status_message = format!("Cannot create file: {e}");
                }
            }
        }
    }

    fn render_status_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if self.state.fetch_in_progress {
                    ui.spinner();
                }
                ui.label(&self.state.status_message);
                // Cancel button visible only while a fetch is running.
                if self.state.fetch_in_progress && ui.small_button("Cancel").clicked() {
                    self.state.request_cancel = true;
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(format!("Source: {}", self.state.data_source.label()));
                    if let Some(ref place) = self.state.resolved_place {
                        ui.separator();
                        ui.label(format!(
                            "{} ({:.2}, {:.2})",
                            place.name, place.latitude, place.longitude
                        ));
                    }
                });
            });
        });
    }
}

impl eframe::App for StormwatchApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_fetch_progress(ctx);
        self.handle_predict_progress(ctx);
        self.handle_panel_requests();

        self.render_menu_bar(ctx);
        self.render_status_bar(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .id_salt("dashboard")
                .auto_shrink([false; 2])
                .show(ui, |ui| {
                    ui.set_max_width(ui::theme::CONTENT_MAX_WIDTH);

                    ui::panels::search::render(ui, &mut self.state);
                    ui.add_space(ui::theme::SECTION_SPACING);
                    ui.separator();

                    if self.state.fetch_in_progress {
                        ui.vertical_centered(|ui| {
                            ui.add_space(40.0);
                            ui.spinner();
                            ui.label("Contacting weather service\u{2026}");
                        });
                    } else if let Some(report) = &self.state.report {
                        ui.add_space(ui::theme::SECTION_SPACING);
                        ui.columns(2, |cols| {
                            ui::panels::current::render(&mut cols[0], &report.current);
                            ui::panels::alerts::render(&mut cols[1], &report.alerts);
                        });

                        ui.add_space(ui::theme::SECTION_SPACING);
                        ui.separator();
                        ui::panels::forecast::render(ui, &report.forecast);
                    } else if self.state.fetch_error.is_none() {
                        ui.add_space(ui::theme::SECTION_SPACING);
                        ui.label(
                            "Start by typing a city or state in the search bar above. \
                             Live mode fetches real conditions; demo mode works offline.",
                        );
                    }

                    // Flood widget is shown once a location is on screen,
                    // mirroring the rest of the dashboard.
                    if self.state.report.is_some() && !self.state.fetch_in_progress {
                        ui.add_space(ui::theme::SECTION_SPACING);
                        ui.separator();
                        ui::panels::flood::render(ui, &mut self.state);
                    }
                });
        });

        // About dialog (modal-ish).
        ui::panels::about::render(ctx, &mut self.state);
    }

    /// Called by eframe when the application window is about to close.
    ///
    /// Saves the current session so the next launch can restore it.
    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.state.save_session();
    }
}
