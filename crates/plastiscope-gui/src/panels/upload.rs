use std::path::{Path, PathBuf};

use plastiscope_core::consts::{ALLOWED_EXTENSIONS, MAX_UPLOAD_BYTES};
use plastiscope_core::upload::is_supported_image;
use tracing::warn;

use crate::app::PlastiScopeApp;
use crate::messages::WorkerCommand;
use crate::states::Phase;

const ZONE_HEIGHT: f32 = 260.0;

pub fn show(ctx: &egui::Context, app: &mut PlastiScopeApp) {
    egui::CentralPanel::default().show(ctx, |ui| {
        ui.add_space(24.0);
        ui.vertical_centered(|ui| {
            ui.heading("Microplastic Detection");
            ui.label(
                egui::RichText::new("Upload a microscope image to detect and count microplastic particles")
                    .color(egui::Color32::from_gray(150)),
            );
        });
        ui.add_space(16.0);

        if let Some(ref error) = app.ui_state.error {
            egui::Frame::new()
                .fill(egui::Color32::from_rgb(80, 30, 30))
                .corner_radius(6.0)
                .inner_margin(10.0)
                .show(ui, |ui| {
                    ui.colored_label(egui::Color32::from_rgb(255, 170, 170), error);
                });
            ui.add_space(8.0);
        }

        match app.ui_state.phase.clone() {
            Phase::Analyzing { file_name } => show_analyzing(ui, &file_name),
            _ => show_drop_zone(ui, app),
        }
    });
}

fn show_analyzing(ui: &mut egui::Ui, file_name: &str) {
    ui.allocate_ui_with_layout(
        egui::vec2(ui.available_width(), ZONE_HEIGHT),
        egui::Layout::centered_and_justified(egui::Direction::TopDown),
        |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(ZONE_HEIGHT / 2.0 - 30.0);
                ui.spinner();
                ui.label(format!("Analyzing {file_name}..."));
            });
        },
    );
}

fn show_drop_zone(ui: &mut egui::Ui, app: &mut PlastiScopeApp) {
    let (rect, response) = ui.allocate_exact_size(
        egui::vec2(ui.available_width(), ZONE_HEIGHT),
        egui::Sense::click(),
    );

    let highlighted = app.ui_state.files_hovering || response.hovered();
    let stroke_color = if highlighted {
        egui::Color32::from_rgb(96, 165, 250)
    } else {
        egui::Color32::from_gray(90)
    };
    let painter = ui.painter();
    painter.rect_filled(rect, 12.0, egui::Color32::from_gray(28));
    painter.rect_stroke(
        rect,
        12.0,
        egui::Stroke::new(2.0, stroke_color),
        egui::StrokeKind::Inside,
    );
    painter.text(
        rect.center() - egui::vec2(0.0, 14.0),
        egui::Align2::CENTER_CENTER,
        "Drop an image here or click to browse",
        egui::FontId::proportional(18.0),
        egui::Color32::from_gray(210),
    );
    painter.text(
        rect.center() + egui::vec2(0.0, 16.0),
        egui::Align2::CENTER_CENTER,
        format!(
            "{} up to {} MB",
            ALLOWED_EXTENSIONS.join(", ").to_uppercase(),
            MAX_UPLOAD_BYTES / (1024 * 1024)
        ),
        egui::FontId::proportional(13.0),
        egui::Color32::from_gray(130),
    );

    if response.clicked() {
        open_image_dialog(app);
    }
}

/// Ask for an image on a dialog thread; the pick goes straight to the worker.
pub fn open_image_dialog(app: &PlastiScopeApp) {
    let cmd_tx = app.cmd_tx.clone();
    std::thread::spawn(move || {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Images", &ALLOWED_EXTENSIONS)
            .add_filter("All files", &["*"])
            .pick_file()
        {
            let _ = cmd_tx.send(WorkerCommand::AnalyzeFile { path });
        }
    });
}

pub fn analyze_path(app: &mut PlastiScopeApp, path: PathBuf) {
    app.ui_state.start_analysis(display_name(&path));
    app.send_command(WorkerCommand::AnalyzeFile { path });
}

/// Files dropped anywhere on the window start a new analysis. Only the
/// first supported image is used; everything else is logged and ignored.
pub fn handle_dropped_files(ctx: &egui::Context, app: &mut PlastiScopeApp) {
    let (hovering, dropped) = ctx.input(|i| {
        (!i.raw.hovered_files.is_empty(), i.raw.dropped_files.clone())
    });
    app.ui_state.files_hovering = hovering;
    if dropped.is_empty() || app.ui_state.is_busy() {
        return;
    }

    let mut accepted = false;
    for file in dropped {
        let name = file
            .path
            .as_deref()
            .map(display_name)
            .unwrap_or_else(|| file.name.clone());
        let supported = match file.path {
            Some(ref path) => is_supported_image(path),
            None => is_supported_image(Path::new(&file.name)),
        };
        if accepted || !supported {
            warn!("Ignoring dropped file {name}");
            app.ui_state.add_log(format!("Ignored {name}: not a supported image"));
            continue;
        }
        accepted = true;

        app.viewer.clear();
        if let Some(path) = file.path {
            analyze_path(app, path);
        } else if let Some(bytes) = file.bytes {
            app.ui_state.start_analysis(name.clone());
            app.send_command(WorkerCommand::AnalyzeBytes {
                file_name: name,
                bytes: bytes.to_vec(),
            });
        }
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
