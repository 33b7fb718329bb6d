use std::f32::consts::TAU;

use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints};
use plastiscope_core::detection::Detection;
use plastiscope_core::stats::{confidence_bars, confidence_ranges, confidence_trend, RangeShare};
use plastiscope_core::viewer::palette_color;

use crate::convert::{level_color, to_color32};

/// Height of each chart in pixels.
const CHART_HEIGHT: f32 = 160.0;
const PIE_RADIUS: f32 = 60.0;
/// Arc segment per polygon; keeps every piece convex.
const PIE_SEGMENT: f32 = TAU / 48.0;

pub fn show(ui: &mut egui::Ui, detections: &[Detection]) {
    if detections.is_empty() {
        return;
    }

    super::section_header(ui, "Confidence per Detection", None);
    confidence_bar_chart(ui, detections);
    ui.add_space(10.0);

    super::section_header(ui, "Confidence Trend", Some("sorted ascending"));
    trend_chart(ui, detections);
    ui.add_space(10.0);

    super::section_header(ui, "Confidence Ranges", None);
    range_pie(ui, &confidence_ranges(detections));
}

fn confidence_bar_chart(ui: &mut egui::Ui, detections: &[Detection]) {
    let bars: Vec<Bar> = confidence_bars(detections)
        .into_iter()
        .enumerate()
        .map(|(i, bar)| {
            Bar::new(i as f64 + 1.0, bar.confidence)
                .name(bar.id)
                .fill(to_color32(palette_color(i)))
                .width(0.7)
        })
        .collect();

    Plot::new("confidence_bars")
        .height(CHART_HEIGHT)
        .include_y(0.0)
        .include_y(100.0)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show_grid(false)
        .y_axis_label("%")
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new("confidence", bars));
        });
}

fn trend_chart(ui: &mut egui::Ui, detections: &[Detection]) {
    let points: Vec<[f64; 2]> = confidence_trend(detections)
        .into_iter()
        .map(|(i, v)| [i as f64, v])
        .collect();
    let line = Line::new("confidence", PlotPoints::from(points))
        .color(to_color32(palette_color(0)))
        .width(2.0);

    Plot::new("confidence_trend")
        .height(CHART_HEIGHT)
        .include_y(0.0)
        .include_y(100.0)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .legend(Legend::default())
        .y_axis_label("%")
        .show(ui, |plot_ui| {
            plot_ui.line(line);
        });
}


fn range_pie(ui: &mut egui::Ui, ranges: &[RangeShare]) {
    ui.horizontal(|ui| {
        let (rect, _) = ui.allocate_exact_size(
            egui::vec2(PIE_RADIUS * 2.0, PIE_RADIUS * 2.0),
            egui::Sense::hover(),
        );
        let painter = ui.painter_at(rect);
        let center = rect.center();

        // Start at 12 o'clock, clockwise.
        let mut start = -TAU / 4.0;
        for range in ranges {
            let sweep = range.share as f32 * TAU;
            let color = level_color(range.level);
            let mut a = start;
            while a < start + sweep {
                let b = (a + PIE_SEGMENT).min(start + sweep);
                let arc = |t: f32| center + PIE_RADIUS * egui::vec2(t.cos(), t.sin());
                painter.add(egui::Shape::convex_polygon(
                    vec![center, arc(a), arc(b)],
                    color,
                    egui::Stroke::NONE,
                ));
                a = b;
            }
            start += sweep;
        }

        ui.vertical(|ui| {
            for range in ranges {
                ui.horizontal(|ui| {
                    let (swatch, _) =
                        ui.allocate_exact_size(egui::vec2(10.0, 10.0), egui::Sense::hover());
                    ui.painter()
                        .rect_filled(swatch, 2.0, level_color(range.level));
                    ui.label(format!(
                        "{}: {} ({:.0}%)",
                        range.level,
                        range.count,
                        range.share * 100.0
                    ));
                });
            }
        });
    });
}
