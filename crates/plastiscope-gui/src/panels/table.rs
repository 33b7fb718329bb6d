use plastiscope_core::detection::ConfidenceLevel;
use plastiscope_core::table::{
    showing_label, ConfidenceFilter, SortField, TableQuery, TableRow, EMPTY_TABLE_MESSAGE,
};
use plastiscope_core::viewer::palette_color;

use crate::app::PlastiScopeApp;
use crate::convert::{level_color, to_color32};

pub fn show(ctx: &egui::Context, app: &mut PlastiScopeApp) {
    egui::TopBottomPanel::bottom("detection_table")
        .resizable(true)
        .default_height(240.0)
        .min_height(120.0)
        .show(ctx, |ui| {
            ui.add_space(4.0);
            let total = app.viewer.detections.len();
            let query = &mut app.viewer.table;

            filters_row(ui, query);
            let rows = query.apply(&app.viewer.detections);
            ui.small(showing_label(rows.len(), total));
            ui.add_space(4.0);

            let hovered = app.viewer.viewer.hovered();
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    egui::Grid::new("detections_grid")
                        .num_columns(SortField::ALL.len() + 2)
                        .striped(true)
                        .spacing([18.0, 4.0])
                        .show(ui, |ui| {
                            header_row(ui, &mut app.viewer.table);
                            for row in &rows {
                                table_row(ui, row, hovered == Some(row.index));
                            }
                        });
                    if rows.is_empty() {
                        ui.add_space(8.0);
                        ui.vertical_centered(|ui| {
                            ui.label(
                                egui::RichText::new(EMPTY_TABLE_MESSAGE)
                                    .color(egui::Color32::from_gray(140)),
                            );
                        });
                    }
                });
        });
}

fn filters_row(ui: &mut egui::Ui, query: &mut TableQuery) {
    ui.horizontal(|ui| {
        ui.strong("Detections");
        ui.add_space(12.0);
        ui.add(
            egui::TextEdit::singleline(&mut query.search)
                .hint_text("Search by ID...")
                .desired_width(140.0),
        );
        egui::ComboBox::from_id_salt("confidence_filter")
            .selected_text(query.filter.to_string())
            .show_ui(ui, |ui| {
                for filter in ConfidenceFilter::ALL {
                    ui.selectable_value(&mut query.filter, filter, filter.to_string());
                }
            });
    });
}

fn header_row(ui: &mut egui::Ui, query: &mut TableQuery) {
    for (position, field) in SortField::ALL.into_iter().enumerate() {
        let arrow = if query.sort_field == field {
            query.direction.arrow()
        } else {
            ""
        };
        if ui
            .add(egui::Button::new(egui::RichText::new(format!("{field} {arrow}")).strong()).frame(false))
            .clicked()
        {
            query.toggle_sort(field);
        }
        // Label column sits between ID and Confidence.
        if position == 0 {
            ui.strong("Label");
        }
    }
    ui.strong("Level");
    ui.end_row();
}

fn table_row(ui: &mut egui::Ui, row: &TableRow, hovered: bool) {
    let id_text = egui::RichText::new(&row.id).color(to_color32(palette_color(row.index)));
    ui.label(if hovered { id_text.strong() } else { id_text });
    ui.label(row.label);
    ui.label(&row.confidence);
    for coord in row.coords {
        ui.monospace(coord.to_string());
    }
    ui.colored_label(level_color(row.level), level_name(row.level));
    ui.end_row();
}

fn level_name(level: ConfidenceLevel) -> &'static str {
    match level {
        ConfidenceLevel::High => "High",
        ConfidenceLevel::Medium => "Medium",
        ConfidenceLevel::Low => "Low",
    }
}
