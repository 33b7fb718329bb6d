/// Lower bound of the viewport zoom factor.
pub const MIN_SCALE: f32 = 0.5;

/// Upper bound of the viewport zoom factor.
pub const MAX_SCALE: f32 = 3.0;

/// Zoom multiplier applied per wheel event when scrolling down.
pub const WHEEL_ZOOM_OUT: f32 = 0.9;

/// Zoom multiplier applied per wheel event when scrolling up.
pub const WHEEL_ZOOM_IN: f32 = 1.1;

/// Zoom step of the zoom-in / zoom-out controls.
pub const BUTTON_ZOOM_STEP: f32 = 1.2;

/// Delay before the container is measured after an image is shown.
pub const INITIAL_MEASURE_DELAY_MS: u64 = 10;

/// Delay before the container is re-measured after maximizing, so layout can settle.
pub const MAXIMIZE_SETTLE_DELAY_MS: u64 = 50;

/// Outline width of a detection box, in surface pixels.
pub const BOX_LINE_WIDTH: f32 = 2.0;

/// Outline width of the hovered detection box.
pub const HOVER_LINE_WIDTH: f32 = 3.0;

/// Glow radius drawn around the hovered detection box.
pub const HOVER_GLOW_BLUR: f32 = 10.0;

/// Height reserved for the confidence text inside a label chip.
pub const LABEL_TEXT_HEIGHT: f32 = 20.0;

/// Padding around the confidence text inside a label chip.
pub const LABEL_PADDING: f32 = 10.0;

/// Alpha of every palette colour (0.9).
pub const PALETTE_ALPHA: u8 = 230;

/// Cyclic box palette, RGB.
pub const PALETTE: [[u8; 3]; 5] = [
    [96, 165, 250],
    [147, 197, 253],
    [59, 130, 246],
    [125, 211, 252],
    [56, 189, 248],
];

/// Fill of the no-detections overlay, RGB.
pub const OVERLAY_RGB: [u8; 3] = [24, 27, 33];

/// Alpha of the no-detections overlay (0.95).
pub const OVERLAY_ALPHA: u8 = 242;

/// Edge length of the minimized preview thumbnail.
pub const THUMBNAIL_SIZE: u32 = 80;

/// Scores at or above this are "high" confidence.
pub const HIGH_CONFIDENCE: f64 = 0.8;

/// Scores at or above this (and below [`HIGH_CONFIDENCE`]) are "medium" confidence.
pub const MEDIUM_CONFIDENCE: f64 = 0.5;

/// Duration of the statistics count-up animation.
pub const COUNT_UP_DURATION_MS: u64 = 1000;

/// Largest file the backend accepts (10 MiB).
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// Largest image edge the backend accepts.
pub const MAX_IMAGE_DIMENSION: u32 = 10_000;

/// File extensions the backend accepts.
pub const ALLOWED_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "bmp", "webp"];

/// Backend used when nothing else is configured.
pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000";

/// Environment variable overriding the backend base URL.
pub const API_URL_ENV_VAR: &str = "PLASTISCOPE_API_URL";

/// Default HTTP timeout for backend calls.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Container width used when rendering outside a window.
pub const DEFAULT_RENDER_WIDTH: u32 = 1024;
