//! Annotated image viewer: fit-to-container surface, box layout and a
//! zoom/pan viewport applied uniformly on top of the surface.

pub mod display;
pub mod layout;
pub mod state;
pub mod viewport;

pub use display::{DisplaySize, ScaleFactors, SourceSize};
pub use layout::{
    hit_test, layout_boxes, palette_color, place_label_chip, BoxLayout, Overlay, SurfaceRect,
};
pub use state::{AnnotatedViewer, ImageSlot, LoadTicket, Surface};
pub use viewport::{Point, ViewportState, WheelDirection};
