use std::sync::mpsc;

use plastiscope_core::detection::detection_count_label;
use plastiscope_core::viewer::ImageSlot;

use crate::convert::rgba_to_color_image;
use crate::messages::{WorkerCommand, WorkerResult};
use crate::panels;
use crate::states::{ConfigState, Phase, UIState, ViewerState};
use crate::worker;

pub struct PlastiScopeApp {
    pub cmd_tx: mpsc::Sender<WorkerCommand>,
    pub result_tx: mpsc::Sender<WorkerResult>,
    pub result_rx: mpsc::Receiver<WorkerResult>,
    pub ui_state: UIState,
    pub viewer: ViewerState,
    pub config: ConfigState,
}

impl PlastiScopeApp {
    pub fn new(ctx: &egui::Context) -> Self {
        let (result_tx, result_rx) = mpsc::channel();
        let cmd_tx = worker::spawn_worker(result_tx.clone(), ctx.clone());

        let app = Self {
            cmd_tx,
            result_tx,
            result_rx,
            ui_state: UIState::default(),
            viewer: ViewerState::default(),
            config: ConfigState::load_startup(),
        };
        app.send_command(app.config.configure_command());
        app.send_command(WorkerCommand::CheckHealth);
        app
    }

    /// Drain all pending results from the worker.
    fn poll_results(&mut self, ctx: &egui::Context) {
        while let Ok(result) = self.result_rx.try_recv() {
            match result {
                WorkerResult::UploadStarted { file_name } => {
                    self.ui_state.add_log(format!("Analyzing {file_name}..."));
                    self.ui_state.start_analysis(file_name);
                }
                WorkerResult::AnalysisComplete {
                    file_name,
                    size,
                    bytes,
                    response,
                    elapsed,
                } => {
                    self.ui_state.add_log(format!(
                        "{file_name}: {} ({:.1}s)",
                        detection_count_label(response.detections.len()),
                        elapsed.as_secs_f32()
                    ));
                    let ticket = self.viewer.show_result(file_name, size, response);
                    self.ui_state.phase = Phase::Results;
                    self.send_command(WorkerCommand::DecodeImage { ticket, bytes });
                }
                WorkerResult::ImageDecoded { ticket, result } => {
                    if self.viewer.viewer.complete_load(ticket, result) {
                        self.update_texture(ctx);
                    }
                }
                WorkerResult::AnalysisFailed { message } => {
                    self.ui_state.fail_analysis(message);
                }
                WorkerResult::Health(health) => {
                    self.ui_state.add_log(format!(
                        "Backend {} (model {})",
                        health.status,
                        if health.model_loaded { "loaded" } else { "not loaded" }
                    ));
                    self.ui_state.health = Some(health);
                }
                WorkerResult::ConfigImported { config } => {
                    self.config = ConfigState::from_app_config(config);
                    self.send_command(self.config.configure_command());
                    self.ui_state.add_log("Config imported".into());
                }
                WorkerResult::Saved { path } => {
                    self.ui_state.add_log(format!("Saved: {}", path.display()));
                }
                WorkerResult::Error { message } => {
                    self.ui_state.add_log(format!("ERROR: {message}"));
                }
                WorkerResult::Log { message } => {
                    self.ui_state.add_log(message);
                }
            }
        }
    }

    fn update_texture(&mut self, ctx: &egui::Context) {
        self.viewer.texture = match self.viewer.viewer.image() {
            ImageSlot::Ready(image) => Some(ctx.load_texture(
                "analyzed_image",
                rgba_to_color_image(image),
                egui::TextureOptions::LINEAR,
            )),
            _ => None,
        };
    }

    pub fn send_command(&self, cmd: WorkerCommand) {
        let _ = self.cmd_tx.send(cmd);
    }

    /// Drop the current result and go back to the upload zone.
    pub fn new_analysis(&mut self) {
        self.viewer.clear();
        self.ui_state.phase = Phase::Idle;
        self.ui_state.error = None;
    }
}

impl eframe::App for PlastiScopeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_results(ctx);

        panels::upload::handle_dropped_files(ctx, self);
        panels::menu_bar::show(ctx, self);
        panels::status::show(ctx, self);

        if self.ui_state.phase == Phase::Results {
            panels::table::show(ctx, self);
            panels::analysis::show(ctx, self);
            panels::viewer::show(ctx, self);
        } else {
            panels::upload::show(ctx, self);
        }

        panels::settings::show(ctx, self);

        if self.ui_state.show_about {
            egui::Window::new("About PlastiScope")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.heading("PlastiScope");
                        ui.label("Microplastic detection in microscope images");
                        ui.add_space(8.0);
                        ui.label(format!("Version {}", env!("CARGO_PKG_VERSION")));
                        ui.add_space(8.0);
                        if ui.button("Close").clicked() {
                            self.ui_state.show_about = false;
                        }
                    });
                });
        }
    }
}
