use crate::consts::{
    BOX_LINE_WIDTH, HOVER_LINE_WIDTH, LABEL_PADDING, LABEL_TEXT_HEIGHT, PALETTE, PALETTE_ALPHA,
};
use crate::detection::Detection;

use super::display::{DisplaySize, ScaleFactors};
use super::viewport::Point;

/// Rectangle on the draw surface, kept in `x1, y1, x2, y2` order as given.
/// Width and height go negative for flipped boxes; drawing code normalizes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceRect {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl SurfaceRect {
    pub const fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub fn from_bbox(bbox: [f32; 4]) -> Self {
        Self::new(bbox[0], bbox[1], bbox[2], bbox[3])
    }

    pub fn width(&self) -> f32 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> f32 {
        self.y2 - self.y1
    }

    pub fn normalized(&self) -> Self {
        Self::new(
            self.x1.min(self.x2),
            self.y1.min(self.y2),
            self.x1.max(self.x2),
            self.y1.max(self.y2),
        )
    }

    pub fn contains(&self, p: Point) -> bool {
        let n = self.normalized();
        p.x >= n.x1 && p.x <= n.x2 && p.y >= n.y1 && p.y <= n.y2
    }
}

/// Palette colour (RGBA) for the detection at `index`.
pub fn palette_color(index: usize) -> [u8; 4] {
    let [r, g, b] = PALETTE[index % PALETTE.len()];
    [r, g, b, PALETTE_ALPHA]
}

/// One detection placed on the draw surface.
#[derive(Clone, Debug, PartialEq)]
pub struct BoxLayout {
    /// Position in the original detection sequence.
    pub index: usize,
    pub rect: SurfaceRect,
    pub color: [u8; 4],
    pub label: String,
    pub hovered: bool,
}

impl BoxLayout {
    pub fn line_width(&self) -> f32 {
        if self.hovered {
            HOVER_LINE_WIDTH
        } else {
            BOX_LINE_WIDTH
        }
    }
}

/// Message drawn over the image in place of boxes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Overlay {
    NoDetections,
}

impl Overlay {
    pub fn title(&self) -> &'static str {
        match self {
            Overlay::NoDetections => "No microplastics detected",
        }
    }

    pub fn subtitle(&self) -> &'static str {
        match self {
            Overlay::NoDetections => "The image appears to be free of microplastics",
        }
    }
}

/// Transform every detection into surface coordinates. Order is preserved,
/// so later boxes are drawn on top of earlier ones.
pub fn layout_boxes(detections: &[Detection], factors: ScaleFactors) -> Vec<BoxLayout> {
    detections
        .iter()
        .enumerate()
        .map(|(index, det)| BoxLayout {
            index,
            rect: SurfaceRect::from_bbox(factors.apply(det.bbox)),
            color: palette_color(index),
            label: det.confidence_label(),
            hovered: false,
        })
        .collect()
}

/// Place the confidence chip directly above the box's top edge, pulled back
/// inside the surface when it would leave it.
pub fn place_label_chip(rect: &SurfaceRect, text_width: f32, surface: DisplaySize) -> SurfaceRect {
    let chip_w = text_width.max(0.0) + LABEL_PADDING * 2.0;
    let chip_h = LABEL_TEXT_HEIGHT + LABEL_PADDING;

    let left = rect.x1.min(rect.x2);
    let top = rect.y1.min(rect.y2);

    let max_x = (surface.width - chip_w).max(0.0);
    let x = left.clamp(0.0, max_x);
    let y = (top - chip_h).max(0.0);

    SurfaceRect::new(x, y, x + chip_w, y + chip_h)
}

/// Topmost box under `point` (surface coordinates).
pub fn hit_test(boxes: &[BoxLayout], point: Point) -> Option<usize> {
    boxes
        .iter()
        .rev()
        .find(|b| b.rect.contains(point))
        .map(|b| b.index)
}
