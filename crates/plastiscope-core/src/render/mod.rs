//! Raster rendering of a viewer [`Surface`] into an RGBA image.

use std::sync::Arc;
use std::time::Instant;

use ab_glyph::{Font, FontRef, PxScale, ScaleFont};
use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use imageproc::drawing::{
    draw_filled_rect_mut, draw_hollow_rect_mut, draw_text_mut, text_size, Blend, Canvas,
};
use imageproc::rect::Rect;

use crate::consts::{HOVER_GLOW_BLUR, OVERLAY_ALPHA, OVERLAY_RGB};
use crate::detection::Detection;
use crate::error::Result;
use crate::viewer::{
    place_label_chip, AnnotatedViewer, BoxLayout, DisplaySize, Overlay, SourceSize, Surface,
    SurfaceRect,
};

static LABEL_FONT_DATA: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans.ttf");

/// Confidence text size; the line fits the 20px text band of a chip.
const LABEL_FONT_PX: f32 = 16.0;
const OVERLAY_TITLE_PX: f32 = 20.0;
const OVERLAY_SUBTITLE_PX: f32 = 14.0;
/// Horizontal room kept free around overlay text.
const OVERLAY_MARGIN: f32 = 16.0;

const GLOW_STEPS: u32 = 5;

const TEXT_COLOR: Rgba<u8> = Rgba([255, 255, 255, 255]);
const SUBTITLE_COLOR: Rgba<u8> = Rgba([190, 190, 190, 255]);

fn label_font() -> Result<FontRef<'static>> {
    Ok(FontRef::try_from_slice(LABEL_FONT_DATA)?)
}

/// Draw the surface exactly as the viewer shows it at zoom 1, pan 0.
pub fn render_surface(surface: &Surface) -> Result<RgbaImage> {
    let font = label_font()?;
    let (w, h) = surface.display.pixel_size();
    let base = imageops::resize(surface.image.as_ref(), w.max(1), h.max(1), FilterType::Triangle);
    let mut canvas = Blend(base);

    if let Some(overlay) = surface.overlay {
        draw_overlay(&mut canvas, overlay, &font);
    }

    for b in &surface.boxes {
        if b.hovered {
            draw_glow(&mut canvas, b);
        }
        stroke_rect(&mut canvas, &b.rect, b.line_width(), Rgba(b.color));
        draw_label_chip(&mut canvas, b, surface.display, &font);
    }

    Ok(canvas.0)
}

/// Render `image` with `detections` fitted to `container_width`, with the
/// box at `hovered` highlighted. `None` when the width leaves nothing to draw.
pub fn render_annotated(
    image: Arc<RgbaImage>,
    detections: &[Detection],
    container_width: f32,
    hovered: Option<usize>,
) -> Result<Option<RgbaImage>> {
    let mut viewer = AnnotatedViewer::default();
    let source = SourceSize::new(image.width(), image.height());
    let ticket = viewer.load(source, Arc::from(detections), Instant::now());
    viewer.complete_load(ticket, Ok(image));
    viewer.container_resized(container_width);
    viewer.set_hovered(hovered);
    viewer.surface().map(|s| render_surface(&s)).transpose()
}

/// Normalized `rect` limited to the canvas grown by `margin` on every side.
/// `None` when it lies fully outside or has a non-finite coordinate.
fn clip_to_canvas(
    rect: &SurfaceRect,
    width: u32,
    height: u32,
    margin: f32,
) -> Option<SurfaceRect> {
    let n = rect.normalized();
    if ![n.x1, n.y1, n.x2, n.y2].iter().all(|v| v.is_finite()) {
        return None;
    }
    let (max_x, max_y) = (width as f32 + margin, height as f32 + margin);
    if n.x2 < -margin || n.y2 < -margin || n.x1 > max_x || n.y1 > max_y {
        return None;
    }
    Some(SurfaceRect::new(
        n.x1.max(-margin),
        n.y1.max(-margin),
        n.x2.min(max_x),
        n.y2.min(max_y),
    ))
}

/// Stroke `rect` centred on its edges, like a canvas `strokeRect`.
/// Edges beyond the canvas are cut off before any pixel is visited.
fn stroke_rect<C>(canvas: &mut C, rect: &SurfaceRect, width: f32, color: Rgba<u8>)
where
    C: Canvas<Pixel = Rgba<u8>>,
{
    let lines = width.round().max(1.0) as i32;
    let (cw, ch) = canvas.dimensions();
    let Some(n) = clip_to_canvas(rect, cw, ch, lines as f32) else {
        return;
    };
    let half = lines / 2;
    for t in 0..lines {
        let inset = t - half;
        let x = n.x1.round() as i32 + inset;
        let y = n.y1.round() as i32 + inset;
        let w = (n.x2.round() - n.x1.round()) as i32 - 2 * inset;
        let h = (n.y2.round() - n.y1.round()) as i32 - 2 * inset;
        if w < 1 || h < 1 {
            continue;
        }
        draw_hollow_rect_mut(canvas, Rect::at(x, y).of_size(w as u32, h as u32), color);
    }
}

fn draw_glow<C>(canvas: &mut C, b: &BoxLayout)
where
    C: Canvas<Pixel = Rgba<u8>>,
{
    let [r, g, bl, a] = b.color;
    let spread = HOVER_GLOW_BLUR / GLOW_STEPS as f32;
    let n = b.rect.normalized();
    for step in 1..=GLOW_STEPS {
        let grow = spread * step as f32;
        let fade = 1.0 - step as f32 / (GLOW_STEPS + 1) as f32;
        let alpha = (a as f32 * 0.5 * fade) as u8;
        let halo = SurfaceRect::new(n.x1 - grow, n.y1 - grow, n.x2 + grow, n.y2 + grow);
        stroke_rect(canvas, &halo, spread, Rgba([r, g, bl, alpha]));
    }
}

/// Height of one text line at `px`, ascent to descent.
fn line_height(font: &FontRef<'_>, px: f32) -> f32 {
    font.as_scaled(PxScale::from(px)).height()
}

fn draw_label_chip<C>(canvas: &mut C, b: &BoxLayout, display: DisplaySize, font: &FontRef<'_>)
where
    C: Canvas<Pixel = Rgba<u8>>,
{
    let (text_w, _) = text_size(LABEL_FONT_PX, font, &b.label);
    let chip = place_label_chip(&b.rect, text_w as f32, display);
    let (cw, ch) = canvas.dimensions();
    // Boxes below the surface or with NaN corners get no chip.
    let Some(visible) = clip_to_canvas(&chip, cw, ch, 0.0) else {
        return;
    };

    let chip_w = visible.width().round().max(1.0) as u32;
    let chip_h = visible.height().round().max(1.0) as u32;
    draw_filled_rect_mut(
        canvas,
        Rect::at(visible.x1.round() as i32, visible.y1.round() as i32).of_size(chip_w, chip_h),
        Rgba(b.color),
    );

    let text_x = chip.x1 + (chip.width() - text_w as f32) / 2.0;
    let text_y = chip.y1 + (chip.height() - line_height(font, LABEL_FONT_PX)) / 2.0;
    draw_text_mut(
        canvas,
        TEXT_COLOR,
        text_x.round() as i32,
        text_y.round() as i32,
        LABEL_FONT_PX,
        font,
        &b.label,
    );
}

/// Dim the whole surface and centre the overlay's title and subtitle on it.
fn draw_overlay<C>(canvas: &mut C, overlay: Overlay, font: &FontRef<'_>)
where
    C: Canvas<Pixel = Rgba<u8>>,
{
    let (w, h) = canvas.dimensions();
    let [r, g, b] = OVERLAY_RGB;
    draw_filled_rect_mut(
        canvas,
        Rect::at(0, 0).of_size(w, h),
        Rgba([r, g, b, OVERLAY_ALPHA]),
    );

    // Shrink both lines together when either is wider than the surface.
    let (title_w, _) = text_size(OVERLAY_TITLE_PX, font, overlay.title());
    let (subtitle_w, _) = text_size(OVERLAY_SUBTITLE_PX, font, overlay.subtitle());
    let room = (w as f32 - OVERLAY_MARGIN).max(1.0);
    let fit = (room / title_w.max(subtitle_w).max(1) as f32).min(1.0);

    let lines = [
        (overlay.title(), OVERLAY_TITLE_PX * fit, TEXT_COLOR),
        (overlay.subtitle(), OVERLAY_SUBTITLE_PX * fit, SUBTITLE_COLOR),
    ];
    let gap = 6.0 * fit;
    let total_h: f32 =
        lines.iter().map(|(_, px, _)| line_height(font, *px)).sum::<f32>() + gap;

    let mut y = (h as f32 - total_h) / 2.0;
    for (text, px, color) in lines {
        let (text_w, _) = text_size(px, font, text);
        let x = (w as f32 - text_w as f32) / 2.0;
        draw_text_mut(canvas, color, x.round() as i32, y.round() as i32, px, font, text);
        y += line_height(font, px) + gap;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flipped_rect_strokes_like_normalized() {
        let color = Rgba([255, 0, 0, 255]);
        let mut a = Blend(RgbaImage::new(20, 20));
        let mut b = Blend(RgbaImage::new(20, 20));
        stroke_rect(&mut a, &SurfaceRect::new(15.0, 15.0, 5.0, 5.0), 2.0, color);
        stroke_rect(&mut b, &SurfaceRect::new(5.0, 5.0, 15.0, 15.0), 2.0, color);
        assert_eq!(a.0, b.0);
        assert_eq!(a.0.get_pixel(5, 10).0, [255, 0, 0, 255]);
    }

    #[test]
    fn clip_keeps_inside_rects_and_drops_far_ones() {
        let inside = SurfaceRect::new(2.0, 3.0, 8.0, 9.0);
        assert_eq!(clip_to_canvas(&inside, 10, 10, 2.0), Some(inside));

        let huge = SurfaceRect::new(-1e12, 4.0, 1e12, 6.0);
        assert_eq!(
            clip_to_canvas(&huge, 10, 10, 2.0),
            Some(SurfaceRect::new(-2.0, 4.0, 12.0, 6.0))
        );

        assert!(clip_to_canvas(&SurfaceRect::new(50.0, 0.0, 60.0, 5.0), 10, 10, 2.0).is_none());
        assert!(clip_to_canvas(&SurfaceRect::new(f32::NAN, 0.0, 5.0, 5.0), 10, 10, 2.0).is_none());
    }

    #[test]
    fn embedded_font_measures_labels() {
        let font = label_font().unwrap();
        let (w, h) = text_size(LABEL_FONT_PX, &font, "97.3%");
        assert!(w > 20 && w < 80, "width {w}");
        assert!(h > 0 && (h as f32) <= 20.0, "height {h}");
        assert!(line_height(&font, LABEL_FONT_PX) <= 20.0);
    }
}
