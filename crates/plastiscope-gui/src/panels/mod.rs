pub mod analysis;
pub mod charts;
pub mod menu_bar;
pub mod settings;
pub mod status;
pub mod table;
pub mod upload;
pub mod viewer;

pub(crate) fn section_header(ui: &mut egui::Ui, label: &str, status: Option<&str>) {
    ui.horizontal(|ui| {
        ui.strong(label);
        if let Some(s) = status {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.small(s);
            });
        }
    });
}
