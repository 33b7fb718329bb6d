use plastiscope_core::consts::COUNT_UP_DURATION_MS;
use plastiscope_core::stats::Statistics;

use crate::app::PlastiScopeApp;

pub fn show(ctx: &egui::Context, app: &mut PlastiScopeApp) {
    egui::SidePanel::right("analysis")
        .resizable(true)
        .default_width(380.0)
        .min_width(300.0)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.add_space(6.0);
                statistics_section(ui, app);
                ui.add_space(12.0);
                super::charts::show(ui, &app.viewer.detections);
            });
        });
}

fn statistics_section(ui: &mut egui::Ui, app: &PlastiScopeApp) {
    super::section_header(ui, "Statistics", Some(app.viewer.file_name.as_str()));
    ui.add_space(4.0);

    let stats = Statistics::from_detections(&app.viewer.detections);
    let elapsed = app
        .viewer
        .shown_at
        .map(|t| t.elapsed())
        .unwrap_or_default();
    let shown = stats.animated(elapsed);
    if elapsed.as_millis() < COUNT_UP_DURATION_MS as u128 {
        ui.ctx().request_repaint();
    }

    egui::Grid::new("stat_cards")
        .num_columns(2)
        .spacing([8.0, 8.0])
        .show(ui, |ui| {
            stat_card(ui, "Total Detections", shown.total.to_string());
            stat_card(ui, "Avg Confidence", percent(shown.average));
            ui.end_row();
            stat_card(ui, "Max Confidence", percent(shown.max));
            stat_card(ui, "Min Confidence", percent(shown.min));
            ui.end_row();
        });
}

fn percent(score: f64) -> String {
    format!("{:.1}%", score * 100.0)
}

fn stat_card(ui: &mut egui::Ui, title: &str, value: String) {
    egui::Frame::new()
        .fill(egui::Color32::from_gray(32))
        .corner_radius(8.0)
        .inner_margin(10.0)
        .show(ui, |ui| {
            ui.set_min_width(140.0);
            ui.vertical(|ui| {
                ui.label(
                    egui::RichText::new(title)
                        .small()
                        .color(egui::Color32::from_gray(150)),
                );
                ui.label(egui::RichText::new(value).size(22.0).strong());
            });
        });
}
