use std::time::Instant;

use plastiscope_core::consts::HOVER_GLOW_BLUR;
use plastiscope_core::viewer::{
    place_label_chip, BoxLayout, ImageSlot, Overlay, Point, Surface, SurfaceRect, ViewportState,
    WheelDirection,
};

use crate::app::PlastiScopeApp;
use crate::convert::{overlay_fill, to_color32};

/// Label font size at zoom 1.
const LABEL_FONT_SIZE: f32 = 14.0;
const GLOW_STEPS: usize = 5;

pub fn show(ctx: &egui::Context, app: &mut PlastiScopeApp) {
    egui::CentralPanel::default().show(ctx, |ui| {
        toolbar(ui, app);
        ui.separator();

        let now = Instant::now();
        let container_width = ui.available_width();
        let state = &mut app.viewer;
        state.viewer.poll(now, container_width);
        if let Some(wait) = state.viewer.measure_pending(now) {
            ctx.request_repaint_after(wait);
        }

        if state.viewer.is_minimized() {
            show_minimized(ui, app);
            return;
        }

        match state.viewer.image() {
            ImageSlot::Loading => {
                ui.centered_and_justified(|ui| ui.spinner());
                return;
            }
            // Failed decode draws nothing.
            ImageSlot::Empty | ImageSlot::Failed => return,
            ImageSlot::Ready(_) => {}
        }

        let (Some(surface), Some(texture_id)) =
            (state.viewer.surface(), state.texture.as_ref().map(|t| t.id()))
        else {
            return;
        };

        show_surface(ui, app, &surface, texture_id);
    });
}

fn toolbar(ui: &mut egui::Ui, app: &mut PlastiScopeApp) {
    let viewer = &mut app.viewer.viewer;
    ui.horizontal(|ui| {
        ui.heading("Detection Results");
        ui.label(
            egui::RichText::new(viewer.summary_label()).color(egui::Color32::from_gray(160)),
        );

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let minimized = viewer.is_minimized();
            let toggle = if minimized { "Maximize" } else { "Minimize" };
            if ui.button(toggle).clicked() {
                viewer.toggle_minimize(Instant::now());
            }
            if minimized {
                return;
            }

            ui.separator();
            if ui.button("Reset").on_hover_text("Reset zoom and pan").clicked() {
                viewer.reset_view();
            }
            let can_in = viewer.viewport().can_zoom_in();
            let can_out = viewer.viewport().can_zoom_out();
            if ui.add_enabled(can_in, egui::Button::new("+")).clicked() {
                viewer.zoom_in();
            }
            ui.label(viewer.viewport().percent_label());
            if ui.add_enabled(can_out, egui::Button::new("\u{2212}")).clicked() {
                viewer.zoom_out();
            }
        });
    });
}

fn show_minimized(ui: &mut egui::Ui, app: &mut PlastiScopeApp) {
    let edge = app.config.app.viewer.thumbnail_size as f32;
    let state = &app.viewer;
    ui.horizontal(|ui| {
        if let Some(ref texture) = state.texture {
            let thumb = state.viewer.thumbnail_size(edge);
            ui.add(egui::Image::new(egui::load::SizedTexture::new(
                texture.id(),
                egui::vec2(thumb.width, thumb.height),
            )));
        }
        ui.vertical(|ui| {
            ui.strong(&state.file_name);
            ui.label(state.viewer.summary_label());
        });
    });
}

fn show_surface(
    ui: &mut egui::Ui,
    app: &mut PlastiScopeApp,
    surface: &Surface,
    texture_id: egui::TextureId,
) {
    let size = egui::vec2(surface.display.width, surface.display.height);
    let (rect, response) = ui.allocate_exact_size(size, egui::Sense::click_and_drag());
    let viewer = &mut app.viewer.viewer;

    let local = |pos: egui::Pos2| Point::new(pos.x - rect.min.x, pos.y - rect.min.y);

    // Wheel. egui reports wheel-up as positive y.
    if response.hovered() {
        let dy = ui.input(|i| i.raw_scroll_delta.y);
        if let Some(direction) = WheelDirection::from_delta_y(-dy) {
            viewer.wheel(direction);
        }
    }

    // Drag, released on pointer-up or when the pointer leaves the surface.
    if response.drag_started_by(egui::PointerButton::Primary) {
        if let Some(pos) = response.interact_pointer_pos() {
            viewer.begin_drag(local(pos));
        }
    } else if response.dragged_by(egui::PointerButton::Primary) {
        match response.hover_pos() {
            Some(pos) => viewer.drag_to(local(pos)),
            None => viewer.end_drag(),
        }
    }
    if response.drag_stopped() {
        viewer.end_drag();
    }

    viewer.hover_at(response.hover_pos().map(local));

    // Hover changes after the surface snapshot was taken.
    let hovered = viewer.hovered();
    let viewport = *viewer.viewport();
    let painter = ui.painter_at(rect);
    let to_screen = |p: Point| {
        let s = viewport.to_screen(p);
        egui::pos2(rect.min.x + s.x, rect.min.y + s.y)
    };

    painter.rect_filled(rect, 0.0, egui::Color32::from_gray(20));
    let image_rect = egui::Rect::from_min_max(
        to_screen(Point::ZERO),
        to_screen(Point::new(surface.display.width, surface.display.height)),
    );
    painter.image(
        texture_id,
        image_rect,
        egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
        egui::Color32::WHITE,
    );

    if let Some(overlay) = surface.overlay {
        draw_overlay(&painter, image_rect, overlay, viewport.scale);
    }

    for b in &surface.boxes {
        let b = BoxLayout {
            hovered: hovered == Some(b.index),
            ..b.clone()
        };
        draw_box(&painter, &b, surface, &viewport, &to_screen);
    }

    if viewport.is_dragging() {
        ui.ctx().set_cursor_icon(egui::CursorIcon::Grabbing);
    } else if hovered.is_some() || response.hovered() {
        ui.ctx().set_cursor_icon(egui::CursorIcon::Grab);
    }
}

fn screen_rect(r: &SurfaceRect, to_screen: &impl Fn(Point) -> egui::Pos2) -> egui::Rect {
    let n = r.normalized();
    egui::Rect::from_min_max(
        to_screen(Point::new(n.x1, n.y1)),
        to_screen(Point::new(n.x2, n.y2)),
    )
}

fn draw_box(
    painter: &egui::Painter,
    b: &BoxLayout,
    surface: &Surface,
    viewport: &ViewportState,
    to_screen: &impl Fn(Point) -> egui::Pos2,
) {
    let color = to_color32(b.color);
    let rect = screen_rect(&b.rect, to_screen);
    let scale = viewport.scale;

    if b.hovered {
        let [r, g, bl, a] = b.color;
        let spread = HOVER_GLOW_BLUR * scale / GLOW_STEPS as f32;
        for step in 1..=GLOW_STEPS {
            let fade = 1.0 - step as f32 / (GLOW_STEPS + 1) as f32;
            let alpha = (a as f32 * 0.5 * fade) as u8;
            painter.rect_stroke(
                rect.expand(spread * step as f32),
                0.0,
                egui::Stroke::new(spread, egui::Color32::from_rgba_unmultiplied(r, g, bl, alpha)),
                egui::StrokeKind::Middle,
            );
        }
    }

    painter.rect_stroke(
        rect,
        0.0,
        egui::Stroke::new(b.line_width() * scale, color),
        egui::StrokeKind::Middle,
    );

    // Chip geometry lives in surface space, so measure the text at zoom 1.
    let font = egui::FontId::proportional(LABEL_FONT_SIZE);
    let text_width = painter
        .layout_no_wrap(b.label.clone(), font, egui::Color32::WHITE)
        .size()
        .x;
    let chip = place_label_chip(&b.rect, text_width, surface.display);
    let chip_rect = screen_rect(&chip, to_screen);
    painter.rect_filled(chip_rect, 0.0, color);

    let galley = painter.layout_no_wrap(
        b.label.clone(),
        egui::FontId::proportional(LABEL_FONT_SIZE * scale),
        egui::Color32::WHITE,
    );
    let pos = chip_rect.center() - galley.size() / 2.0;
    painter.galley(pos, galley, egui::Color32::WHITE);
}

fn draw_overlay(painter: &egui::Painter, image_rect: egui::Rect, overlay: Overlay, scale: f32) {
    painter.rect_filled(image_rect, 0.0, overlay_fill());
    let center = image_rect.center();
    painter.text(
        center - egui::vec2(0.0, 12.0 * scale),
        egui::Align2::CENTER_CENTER,
        overlay.title(),
        egui::FontId::proportional(20.0 * scale),
        egui::Color32::WHITE,
    );
    painter.text(
        center + egui::vec2(0.0, 14.0 * scale),
        egui::Align2::CENTER_CENTER,
        overlay.subtitle(),
        egui::FontId::proportional(14.0 * scale),
        egui::Color32::from_gray(190),
    );
}
