use std::ops::{Add, Div, Mul, Sub};

use crate::consts::{BUTTON_ZOOM_STEP, MAX_SCALE, MIN_SCALE, WHEEL_ZOOM_IN, WHEEL_ZOOM_OUT};

/// A 2D point or vector in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Point {
    type Output = Point;
    fn mul(self, rhs: f32) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f32> for Point {
    type Output = Point;
    fn div(self, rhs: f32) -> Point {
        Point::new(self.x / rhs, self.y / rhs)
    }
}

/// Direction of a single wheel event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WheelDirection {
    Up,
    Down,
}

impl WheelDirection {
    /// Browser convention: positive `delta_y` scrolls down. Zero is no event.
    pub fn from_delta_y(delta_y: f32) -> Option<Self> {
        if delta_y > 0.0 {
            Some(Self::Down)
        } else if delta_y < 0.0 {
            Some(Self::Up)
        } else {
            None
        }
    }
}

/// User-controlled zoom and pan, applied after the fit-to-container scale.
///
/// A surface point `p` lands on screen at `p * scale + offset`, which is the
/// same as `scale(s) translate(offset / s)` with a top-left origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportState {
    pub scale: f32,
    pub offset: Point,
    /// Pointer position minus offset, captured when a drag starts.
    drag_anchor: Option<Point>,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self {
            scale: 1.0,
            offset: Point::ZERO,
            drag_anchor: None,
        }
    }
}

impl ViewportState {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Set the zoom factor, clamped to `[MIN_SCALE, MAX_SCALE]`.
    /// Non-finite requests leave the scale unchanged.
    pub fn set_scale(&mut self, scale: f32) {
        if scale.is_finite() {
            self.scale = scale.clamp(MIN_SCALE, MAX_SCALE);
        }
    }

    pub fn wheel(&mut self, direction: WheelDirection) {
        let factor = match direction {
            WheelDirection::Down => WHEEL_ZOOM_OUT,
            WheelDirection::Up => WHEEL_ZOOM_IN,
        };
        self.set_scale(self.scale * factor);
    }

    pub fn zoom_in(&mut self) {
        self.set_scale(self.scale * BUTTON_ZOOM_STEP);
    }

    pub fn zoom_out(&mut self) {
        self.set_scale(self.scale / BUTTON_ZOOM_STEP);
    }

    pub fn can_zoom_in(&self) -> bool {
        self.scale < MAX_SCALE
    }

    pub fn can_zoom_out(&self) -> bool {
        self.scale > MIN_SCALE
    }

    pub fn begin_drag(&mut self, pointer: Point) {
        self.drag_anchor = Some(pointer - self.offset);
    }

    /// Track the pointer 1:1 while a drag is active. No-op otherwise.
    pub fn drag_to(&mut self, pointer: Point) {
        if let Some(anchor) = self.drag_anchor {
            self.offset = pointer - anchor;
        }
    }

    /// Pointer-up or pointer-leave.
    pub fn end_drag(&mut self) {
        self.drag_anchor = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_anchor.is_some()
    }

    /// The translate part of the `scale(..) translate(..)` transform.
    pub fn translation(&self) -> Point {
        self.offset / self.scale
    }

    pub fn to_screen(&self, surface_point: Point) -> Point {
        (surface_point + self.translation()) * self.scale
    }

    pub fn to_surface(&self, screen_point: Point) -> Point {
        screen_point / self.scale - self.translation()
    }

    /// Zoom indicator text, e.g. `"120%"`.
    pub fn percent_label(&self) -> String {
        format!("{}%", (self.scale * 100.0).round() as i32)
    }
}
