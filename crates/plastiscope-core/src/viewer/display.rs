use serde::{Deserialize, Serialize};

/// Intrinsic pixel size of the source image.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSize {
    pub width: u32,
    pub height: u32,
}

impl SourceSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

/// On-screen size of the source image after fitting, before zoom/pan.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DisplaySize {
    pub width: f32,
    pub height: f32,
}

impl DisplaySize {
    pub const ZERO: DisplaySize = DisplaySize {
        width: 0.0,
        height: 0.0,
    };

    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Fit `source` to `container_width`, preserving aspect ratio. Never
    /// scales up: a container wider than the image yields the intrinsic size.
    pub fn fit_to_container(container_width: f32, source: SourceSize) -> Self {
        if source.is_empty() || container_width.is_nan() || container_width <= 0.0 {
            return Self::ZERO;
        }
        let width = container_width.min(source.width as f32);
        Self::new(width, width / source.aspect_ratio())
    }

    /// Largest size that fits inside `max_width` x `max_height` keeping the
    /// aspect ratio (object-fit: contain). Used for the minimized preview.
    pub fn fit_within(source: SourceSize, max_width: f32, max_height: f32) -> Self {
        if source.is_empty() || max_width <= 0.0 || max_height <= 0.0 {
            return Self::ZERO;
        }
        let scale = (max_width / source.width as f32).min(max_height / source.height as f32);
        Self::new(source.width as f32 * scale, source.height as f32 * scale)
    }

    pub fn scale_factors(&self, source: SourceSize) -> ScaleFactors {
        if source.is_empty() {
            return ScaleFactors { x: 0.0, y: 0.0 };
        }
        ScaleFactors {
            x: self.width / source.width as f32,
            y: self.height / source.height as f32,
        }
    }

    /// Pixel dimensions of the draw surface, rounded.
    pub fn pixel_size(&self) -> (u32, u32) {
        (
            self.width.round().max(0.0) as u32,
            self.height.round().max(0.0) as u32,
        )
    }
}

/// Per-axis factors mapping source pixels onto the display surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleFactors {
    pub x: f32,
    pub y: f32,
}

impl ScaleFactors {
    /// Map a source-space bbox onto the surface, narrowing to `f32`.
    pub fn apply(&self, bbox: [f64; 4]) -> [f32; 4] {
        let (x, y) = (self.x as f64, self.y as f64);
        [
            (bbox[0] * x) as f32,
            (bbox[1] * y) as f32,
            (bbox[2] * x) as f32,
            (bbox[3] * y) as f32,
        ]
    }
}
