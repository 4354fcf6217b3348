use std::{path::PathBuf, time::Instant};

use arboard::Clipboard;
use client_core::{ConversionController, GenerateError, SubmitOutcome};
use crossbeam_channel::{Receiver, Sender};
use shared::domain::ConversionMode;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::controller::orchestration::dispatch_backend_command;

const SETTINGS_FILE_NAME: &str = "transliterator.toml";
const APP_DIR_NAME: &str = "bangla_transliterator";

#[derive(Debug, Clone, Default)]
pub struct StartupConfig {
    pub config_path: Option<PathBuf>,
    pub mode: ConversionMode,
}

impl StartupConfig {
    /// Explicit `--config`, then `./transliterator.toml`, then the per-user
    /// config dir. The returned file need not exist.
    pub fn settings_path(&self) -> PathBuf {
        if let Some(path) = &self.config_path {
            return path.clone();
        }
        let local = PathBuf::from(SETTINGS_FILE_NAME);
        if local.exists() {
            return local;
        }
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR_NAME).join(SETTINGS_FILE_NAME))
            .unwrap_or(local)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatusBannerSeverity {
    Error,
    Warning,
}

#[derive(Debug, Clone)]
struct StatusBanner {
    severity: StatusBannerSeverity,
    message: String,
}

pub struct TransliteratorApp {
    controller: ConversionController,
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    status: String,
    backend_banner: Option<StatusBanner>,
}

impl TransliteratorApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        mode: ConversionMode,
    ) -> Self {
        Self {
            controller: ConversionController::new(mode),
            cmd_tx,
            ui_rx,
            status: "Backend worker starting...".to_string(),
            backend_banner: None,
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::BackendReady { model } => {
                    self.status = format!("Ready ({model})");
                }
                UiEvent::BackendFailed(message) => {
                    self.status = "Backend unavailable".to_string();
                    self.backend_banner = Some(StatusBanner {
                        severity: StatusBannerSeverity::Error,
                        message,
                    });
                }
                UiEvent::ConversionSettled { ticket, result } => {
                    self.controller.settle(&ticket, result);
                }
            }
        }
    }

    fn try_convert(&mut self) {
        match self.controller.begin_submit() {
            SubmitOutcome::Dispatched(ticket) => {
                if let Err(BackendCommand::Convert { ticket }) = dispatch_backend_command(
                    &self.cmd_tx,
                    BackendCommand::Convert { ticket },
                    &mut self.status,
                ) {
                    let reason = self.status.clone();
                    self.controller
                        .settle(&ticket, Err(GenerateError::Unavailable(reason)));
                }
            }
            SubmitOutcome::Rejected(kind) => {
                tracing::debug!(kind = ?kind, "submission rejected");
            }
            SubmitOutcome::Ignored => {}
        }
    }

    fn copy_output(&mut self) {
        let output = self.controller.state().output.clone();
        if output.is_empty() {
            return;
        }
        match Clipboard::new().and_then(|mut clipboard| clipboard.set_text(output)) {
            Ok(()) => {
                self.controller.mark_copied(Instant::now());
            }
            Err(err) => tracing::warn!("clipboard write failed: {err}"),
        }
    }

    fn show_banner(ui: &mut egui::Ui, severity: StatusBannerSeverity, message: &str) -> bool {
        let (fill, stroke) = match severity {
            StatusBannerSeverity::Error => (
                egui::Color32::from_rgb(111, 53, 53),
                egui::Stroke::new(1.0, egui::Color32::from_rgb(175, 96, 96)),
            ),
            StatusBannerSeverity::Warning => (
                egui::Color32::from_rgb(105, 86, 38),
                egui::Stroke::new(1.0, egui::Color32::from_rgb(170, 140, 70)),
            ),
        };

        let mut dismissed = false;
        egui::Frame::NONE
            .fill(fill)
            .stroke(stroke)
            .corner_radius(8.0)
            .inner_margin(egui::Margin::symmetric(10, 8))
            .show(ui, |ui| {
                ui.horizontal_wrapped(|ui| {
                    ui.label(egui::RichText::new(message).color(egui::Color32::WHITE));
                    if severity == StatusBannerSeverity::Error {
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            dismissed = ui.button("Dismiss").clicked();
                        });
                    }
                });
            });
        dismissed
    }

    fn show_mode_row(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let mut selected = self.controller.mode();
            for mode in [ConversionMode::ToScript, ConversionMode::ToPhonetic] {
                ui.selectable_value(&mut selected, mode, mode.label());
            }
            if selected != self.controller.mode() {
                self.controller.set_mode(selected);
            }
            if ui.button("⇄ Swap").clicked() {
                self.controller.toggle_mode();
            }
        });
    }

    fn show_input(&mut self, ui: &mut egui::Ui) {
        let profile = self.controller.mode().profile();
        ui.label(egui::RichText::new(profile.source_label).strong());

        let mut draft = self.controller.state().input.clone();
        let response = ui.add(
            egui::TextEdit::multiline(&mut draft)
                .hint_text(profile.placeholder)
                .desired_rows(6)
                .desired_width(f32::INFINITY),
        );
        if response.changed() {
            self.controller.set_input(draft);
        }

        if let Some(warning) = self.controller.state().validation_warning {
            Self::show_banner(ui, StatusBannerSeverity::Warning, warning.message());
        }
    }

    fn show_actions(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let loading = self.controller.state().is_loading;
            let label = if loading { "Converting..." } else { "Convert" };
            let convert = egui::Button::new(egui::RichText::new(label).strong())
                .min_size(egui::vec2(140.0, 34.0));
            if ui.add_enabled(self.controller.can_submit(), convert).clicked() {
                self.try_convert();
            }
            if loading {
                ui.add(egui::Spinner::new());
            }
            if ui.button("Reset").clicked() {
                self.controller.reset();
            }
        });
    }

    fn show_output(&mut self, ui: &mut egui::Ui) {
        if let Some(err) = self.controller.state().error {
            Self::show_banner(ui, StatusBannerSeverity::Error, &err.user_message());
        }

        let profile = self.controller.mode().profile();
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new(profile.target_label).strong());
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let has_output = !self.controller.state().output.is_empty();
                let copy_label = if self.controller.is_copied(Instant::now()) {
                    "Copied!"
                } else {
                    "Copy"
                };
                if ui.add_enabled(has_output, egui::Button::new(copy_label)).clicked() {
                    self.copy_output();
                }
            });
        });

        let mut output = self.controller.state().output.as_str();
        ui.add(
            egui::TextEdit::multiline(&mut output)
                .desired_rows(6)
                .desired_width(f32::INFINITY),
        );
    }
}

impl eframe::App for TransliteratorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        let submit_shortcut = ctx.input(|i| i.modifiers.command && i.key_pressed(egui::Key::Enter));
        if submit_shortcut && self.controller.can_submit() {
            self.try_convert();
        }

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal_wrapped(|ui| {
                ui.small("Status:");
                ui.small(egui::RichText::new(&self.status).weak());
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.style_mut().spacing.item_spacing = egui::vec2(10.0, 10.0);
            ui.vertical(|ui| {
                ui.heading("Bangla Transliterator");
                ui.weak("Convert Banglish to Bangla script and back.");
            });

            if let Some(banner) = self.backend_banner.clone() {
                if Self::show_banner(ui, banner.severity, &banner.message) {
                    self.backend_banner = None;
                }
            }

            self.show_mode_row(ui);
            ui.separator();
            self.show_input(ui);
            self.show_actions(ui);
            ui.separator();
            self.show_output(ui);
        });

        // channel polling and the copy acknowledgment both need periodic frames
        ctx.request_repaint_after(std::time::Duration::from_millis(100));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::bounded;
    use shared::error::ErrorKind;

    fn app_with_input(cmd_tx: Sender<BackendCommand>) -> TransliteratorApp {
        let (_ui_tx, ui_rx) = bounded::<UiEvent>(1);
        let mut app = TransliteratorApp::new(cmd_tx, ui_rx, ConversionMode::ToScript);
        app.controller.set_input("ami bhalo achi");
        app
    }

    #[test]
    fn convert_with_stopped_worker_settles_as_unknown_error() {
        let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(1);
        drop(cmd_rx);
        let mut app = app_with_input(cmd_tx);

        app.try_convert();
        let state = app.controller.state();
        assert!(!state.is_loading);
        assert_eq!(state.error, Some(ErrorKind::UnknownError));
        assert!(app.controller.can_submit());
        assert!(app.status.contains("disconnected"));
    }

    #[test]
    fn convert_with_full_queue_releases_the_gate() {
        let (cmd_tx, _cmd_rx) = bounded::<BackendCommand>(0);
        let mut app = app_with_input(cmd_tx);

        app.try_convert();
        assert!(!app.controller.state().is_loading);
        assert_eq!(app.controller.state().error, Some(ErrorKind::UnknownError));
    }

    #[test]
    fn convert_queues_a_ticket_for_the_worker() {
        let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(1);
        let mut app = app_with_input(cmd_tx);

        app.try_convert();
        assert!(app.controller.state().is_loading);
        match cmd_rx.try_recv().expect("queued command") {
            BackendCommand::Convert { ticket } => assert_eq!(ticket.content, "ami bhalo achi"),
        }
    }

    #[test]
    fn explicit_config_path_wins() {
        let startup = StartupConfig {
            config_path: Some(PathBuf::from("/tmp/custom.toml")),
            mode: ConversionMode::ToScript,
        };
        assert_eq!(startup.settings_path(), PathBuf::from("/tmp/custom.toml"));
    }

    #[test]
    fn default_path_ends_with_settings_file_name() {
        let path = StartupConfig::default().settings_path();
        assert!(path.ends_with(SETTINGS_FILE_NAME));
    }
}
