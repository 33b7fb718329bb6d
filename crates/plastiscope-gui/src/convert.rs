use image::RgbaImage;
use plastiscope_core::consts::{OVERLAY_ALPHA, OVERLAY_RGB};
use plastiscope_core::detection::ConfidenceLevel;

/// Copy an RGBA8 image into an egui ColorImage.
pub fn rgba_to_color_image(image: &RgbaImage) -> egui::ColorImage {
    let size = [image.width() as usize, image.height() as usize];
    egui::ColorImage::from_rgba_unmultiplied(size, image.as_raw())
}

/// Palette colour as an egui colour.
pub fn to_color32(rgba: [u8; 4]) -> egui::Color32 {
    egui::Color32::from_rgba_unmultiplied(rgba[0], rgba[1], rgba[2], rgba[3])
}

/// Fill of the no-detections overlay, shared with exported images.
pub fn overlay_fill() -> egui::Color32 {
    let [r, g, b] = OVERLAY_RGB;
    egui::Color32::from_rgba_unmultiplied(r, g, b, OVERLAY_ALPHA)
}

/// Traffic-light colour of a confidence range.
pub fn level_color(level: ConfidenceLevel) -> egui::Color32 {
    match level {
        ConfidenceLevel::High => egui::Color32::from_rgb(34, 197, 94),
        ConfidenceLevel::Medium => egui::Color32::from_rgb(234, 179, 8),
        ConfidenceLevel::Low => egui::Color32::from_rgb(239, 68, 68),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlay_fill_is_nearly_opaque() {
        let fill = overlay_fill();
        assert_eq!(fill.a(), OVERLAY_ALPHA);
        assert!(fill.a() as f32 / 255.0 > 0.94);
    }
}
