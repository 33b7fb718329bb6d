use crate::app::PlastiScopeApp;
use crate::states::Phase;

pub fn show(ctx: &egui::Context, app: &mut PlastiScopeApp) {
    egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
        ui.add_space(2.0);

        if let Phase::Analyzing { ref file_name } = app.ui_state.phase {
            ui.add(
                egui::ProgressBar::new(0.0)
                    .text(format!("Analyzing {file_name}..."))
                    .animate(true),
            );
        } else {
            // Invisible placeholder, same height, no animation
            ui.add(egui::ProgressBar::new(0.0).text(""));
        }

        // Log area, fixed height for 3 lines, scrollable.
        let line_height = ui.text_style_height(&egui::TextStyle::Body);
        let spacing = ui.spacing().item_spacing.y;
        let log_height = line_height * 3.0 + spacing * 2.0;

        egui::ScrollArea::vertical()
            .max_height(log_height)
            .min_scrolled_height(log_height)
            .stick_to_bottom(true)
            .show(ui, |ui| {
                if app.ui_state.log_messages.is_empty() {
                    for _ in 0..3 {
                        ui.label("");
                    }
                } else {
                    for msg in &app.ui_state.log_messages {
                        ui.label(msg);
                    }
                }
            });

        ui.horizontal(|ui| {
            match app.ui_state.health {
                Some(ref health) if health.is_healthy() && health.model_loaded => {
                    ui.colored_label(egui::Color32::from_rgb(34, 197, 94), "\u{25cf} Backend ready");
                }
                Some(ref health) => {
                    ui.colored_label(
                        egui::Color32::from_rgb(234, 179, 8),
                        format!("\u{25cf} Backend {}", health.status),
                    );
                }
                None => {
                    ui.colored_label(egui::Color32::from_gray(120), "\u{25cf} Backend unknown");
                }
            }

            if app.ui_state.phase == Phase::Results {
                let size = app.viewer.viewer.source_size();
                ui.separator();
                ui.label(format!("{}x{}", size.width, size.height));
                ui.separator();
                ui.label(format!("Zoom: {}", app.viewer.viewer.viewport().percent_label()));
            }
        });

        ui.add_space(2.0);
    });
}
