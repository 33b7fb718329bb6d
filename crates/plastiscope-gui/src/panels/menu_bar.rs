use chrono::Utc;
use plastiscope_core::config::AppConfig;
use plastiscope_core::report::report_file_name;
use plastiscope_core::viewer::ImageSlot;

use crate::app::PlastiScopeApp;
use crate::messages::{WorkerCommand, WorkerResult};
use crate::panels::upload::open_image_dialog;
use crate::states::Phase;

pub fn show(ctx: &egui::Context, app: &mut PlastiScopeApp) {
    let open_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::O);
    let save_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::S);
    let quit_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::Q);
    let has_result = app.ui_state.phase == Phase::Results;

    egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
        egui::MenuBar::new().ui(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui
                    .add_enabled(
                        !app.ui_state.is_busy(),
                        egui::Button::new("Open Image...")
                            .shortcut_text(ctx.format_shortcut(&open_shortcut)),
                    )
                    .clicked()
                {
                    ui.close();
                    open_image_dialog(app);
                }

                if ui
                    .add_enabled(
                        has_result,
                        egui::Button::new("Download Report...")
                            .shortcut_text(ctx.format_shortcut(&save_shortcut)),
                    )
                    .clicked()
                {
                    ui.close();
                    save_report(app);
                }

                if ui
                    .add_enabled(has_result, egui::Button::new("Save Annotated Image..."))
                    .clicked()
                {
                    ui.close();
                    save_annotated(app);
                }

                if ui
                    .add_enabled(has_result, egui::Button::new("New Analysis"))
                    .clicked()
                {
                    ui.close();
                    app.new_analysis();
                }

                ui.separator();

                if ui.button("Import Config...").clicked() {
                    ui.close();
                    import_config(app);
                }

                if ui.button("Export Config...").clicked() {
                    ui.close();
                    export_config(app);
                }

                ui.separator();

                if ui
                    .add(egui::Button::new("Quit").shortcut_text(ctx.format_shortcut(&quit_shortcut)))
                    .clicked()
                {
                    ui.close();
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });

            ui.menu_button("Backend", |ui| {
                if ui.button("Settings...").clicked() {
                    ui.close();
                    app.ui_state.show_settings = true;
                }
                if ui.button("Check Connection").clicked() {
                    ui.close();
                    app.send_command(WorkerCommand::CheckHealth);
                }
            });

            ui.menu_button("Help", |ui| {
                if ui.button("About").clicked() {
                    ui.close();
                    app.ui_state.show_about = true;
                }
            });
        });

        // Keyboard shortcuts (consumed outside menus)
        if ctx.input_mut(|i| i.consume_shortcut(&open_shortcut)) && !app.ui_state.is_busy() {
            open_image_dialog(app);
        }
        if ctx.input_mut(|i| i.consume_shortcut(&save_shortcut)) && has_result {
            save_report(app);
        }
        if ctx.input_mut(|i| i.consume_shortcut(&quit_shortcut)) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    });
}

fn save_report(app: &PlastiScopeApp) {
    let Some(result) = app.viewer.result.clone() else {
        return;
    };
    let cmd_tx = app.cmd_tx.clone();
    std::thread::spawn(move || {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON", &["json"])
            .set_file_name(report_file_name(Utc::now()))
            .save_file()
        {
            let _ = cmd_tx.send(WorkerCommand::SaveReport { path, result });
        }
    });
}

fn save_annotated(app: &PlastiScopeApp) {
    let ImageSlot::Ready(image) = app.viewer.viewer.image() else {
        return;
    };
    let image = image.clone();
    let detections = app.viewer.detections.clone();
    let hovered = app.viewer.viewer.hovered();
    let stem = std::path::Path::new(&app.viewer.file_name)
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "image".to_string());
    let cmd_tx = app.cmd_tx.clone();

    std::thread::spawn(move || {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("PNG", &["png"])
            .set_file_name(format!("{stem}_annotated.png"))
            .save_file()
        {
            let _ = cmd_tx.send(WorkerCommand::SaveAnnotated {
                path,
                image,
                detections,
                hovered,
            });
        }
    });
}

fn import_config(app: &PlastiScopeApp) {
    let result_tx = app.result_tx.clone();
    std::thread::spawn(move || {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("TOML", &["toml"])
            .pick_file()
        else {
            return;
        };
        let result = match AppConfig::load(&path) {
            Ok(config) => WorkerResult::ConfigImported { config },
            Err(e) => WorkerResult::Error {
                message: format!("Failed to import {}: {e}", path.display()),
            },
        };
        let _ = result_tx.send(result);
    });
}

fn export_config(app: &PlastiScopeApp) {
    let config = app.config.to_app_config();
    let result_tx = app.result_tx.clone();

    std::thread::spawn(move || {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("TOML", &["toml"])
            .set_file_name(crate::states::DEFAULT_CONFIG_FILE)
            .save_file()
        {
            let written = config
                .to_toml()
                .map_err(|e| e.to_string())
                .and_then(|content| std::fs::write(&path, content).map_err(|e| e.to_string()));
            let result = match written {
                Ok(()) => WorkerResult::Saved { path },
                Err(e) => WorkerResult::Error {
                    message: format!("Failed to export config: {e}"),
                },
            };
            let _ = result_tx.send(result);
        }
    });
}
