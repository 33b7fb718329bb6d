use plastiscope_core::consts::{API_URL_ENV_VAR, DEFAULT_API_BASE_URL};

use crate::app::PlastiScopeApp;
use crate::messages::WorkerCommand;

pub fn show(ctx: &egui::Context, app: &mut PlastiScopeApp) {
    if !app.ui_state.show_settings {
        return;
    }

    let mut open = true;
    let mut apply = false;
    egui::Window::new("Backend Settings")
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .show(ctx, |ui| {
            egui::Grid::new("settings_grid")
                .num_columns(2)
                .spacing([12.0, 6.0])
                .show(ui, |ui| {
                    ui.label("Backend URL");
                    ui.add(
                        egui::TextEdit::singleline(&mut app.config.api_url_override)
                            .hint_text(
                                app.config
                                    .app
                                    .api
                                    .base_url
                                    .as_deref()
                                    .unwrap_or(DEFAULT_API_BASE_URL),
                            )
                            .desired_width(260.0),
                    );
                    ui.end_row();

                    ui.label("Timeout (s)");
                    ui.add(egui::DragValue::new(&mut app.config.app.api.timeout_secs).range(1..=600));
                    ui.end_row();

                    ui.label("Thumbnail size");
                    ui.add(
                        egui::DragValue::new(&mut app.config.app.viewer.thumbnail_size)
                            .range(32..=256)
                            .suffix(" px"),
                    );
                    ui.end_row();
                });

            ui.add_space(4.0);
            ui.small(format!(
                "An empty URL falls back to {API_URL_ENV_VAR}, then the config file, then {DEFAULT_API_BASE_URL}."
            ));
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                if ui.button("Apply").clicked() {
                    apply = true;
                }
            });
        });

    if apply {
        app.send_command(app.config.configure_command());
        app.send_command(WorkerCommand::CheckHealth);
    }
    app.ui_state.show_settings = open && !apply;
}
