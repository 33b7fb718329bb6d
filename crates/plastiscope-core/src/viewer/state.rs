use std::sync::Arc;
use std::time::{Duration, Instant};

use image::RgbaImage;
use tracing::{debug, warn};

use crate::consts::{INITIAL_MEASURE_DELAY_MS, MAXIMIZE_SETTLE_DELAY_MS};
use crate::detection::{detection_count_label, Detection};

use super::display::{DisplaySize, SourceSize};
use super::layout::{hit_test, layout_boxes, BoxLayout, Overlay};
use super::viewport::{Point, ViewportState, WheelDirection};

/// Decode state of the source image.
#[derive(Clone, Debug, Default)]
pub enum ImageSlot {
    #[default]
    Empty,
    Loading,
    Ready(Arc<RgbaImage>),
    Failed,
}

/// Identifies one image load. Completions carrying an older ticket are dropped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// Everything needed to draw one frame of the viewer, before zoom/pan.
#[derive(Clone, Debug)]
pub struct Surface {
    pub display: DisplaySize,
    pub image: Arc<RgbaImage>,
    pub boxes: Vec<BoxLayout>,
    pub overlay: Option<Overlay>,
}

/// Owned state of the annotated image viewer.
///
/// Box geometry depends only on the display size and is recomputed when the
/// display size changes. Zoom, pan and hover never touch it.
#[derive(Debug, Default)]
pub struct AnnotatedViewer {
    source: SourceSize,
    detections: Arc<[Detection]>,
    image: ImageSlot,
    generation: u64,
    viewport: ViewportState,
    display: DisplaySize,
    boxes: Vec<BoxLayout>,
    hovered: Option<usize>,
    minimized: bool,
    /// Container width the current display size was computed from.
    measured_width: Option<f32>,
    measure_due: Option<Instant>,
}

impl AnnotatedViewer {
    /// Start showing a new image. Resets zoom, pan, hover and the minimized
    /// flag, and schedules the first container measurement.
    pub fn load(
        &mut self,
        source: SourceSize,
        detections: Arc<[Detection]>,
        now: Instant,
    ) -> LoadTicket {
        self.generation += 1;
        self.source = source;
        self.detections = detections;
        self.image = ImageSlot::Loading;
        self.viewport.reset();
        self.display = DisplaySize::ZERO;
        self.boxes.clear();
        self.hovered = None;
        self.minimized = false;
        self.measured_width = None;
        self.measure_due = Some(now + Duration::from_millis(INITIAL_MEASURE_DELAY_MS));
        LoadTicket(self.generation)
    }

    /// Drop the image and detections. The load generation keeps counting, so
    /// a decode still in flight for the dropped image stays stale.
    pub fn clear(&mut self) {
        *self = Self {
            generation: self.generation,
            ..Self::default()
        };
    }

    /// Deliver the result of an image decode. Returns `false` when the ticket
    /// belongs to a superseded load.
    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        result: std::result::Result<Arc<RgbaImage>, String>,
    ) -> bool {
        if ticket.0 != self.generation {
            warn!(
                "Ignoring stale image load (ticket {}, current {})",
                ticket.0, self.generation
            );
            return false;
        }
        self.image = match result {
            Ok(image) => ImageSlot::Ready(image),
            Err(message) => {
                debug!("Source image failed to load: {message}");
                ImageSlot::Failed
            }
        };
        true
    }

    /// Per-frame hook. Runs a pending measurement once it is due, and
    /// re-fits immediately when the container width changes.
    /// Returns `true` when the display size was recomputed.
    pub fn poll(&mut self, now: Instant, container_width: f32) -> bool {
        if self.minimized || self.source.is_empty() {
            return false;
        }
        match self.measure_due {
            Some(due) if now >= due => {
                self.measure_due = None;
                self.measure(container_width);
                true
            }
            Some(_) => false,
            None if self.measured_width != Some(container_width) => {
                self.measure(container_width);
                true
            }
            None => false,
        }
    }

    /// Time left until the scheduled measurement, if one is pending.
    pub fn measure_pending(&self, now: Instant) -> Option<Duration> {
        self.measure_due.map(|due| due.saturating_duration_since(now))
    }

    /// Resize listener: re-fit right away.
    pub fn container_resized(&mut self, container_width: f32) {
        if !self.minimized && !self.source.is_empty() {
            self.measure(container_width);
        }
    }

    fn measure(&mut self, container_width: f32) {
        self.display = DisplaySize::fit_to_container(container_width, self.source);
        self.measured_width = Some(container_width);
        let factors = self.display.scale_factors(self.source);
        self.boxes = layout_boxes(&self.detections, factors);
        debug!(
            "Display size {:.1}x{:.1} for container {:.1} ({} boxes)",
            self.display.width,
            self.display.height,
            container_width,
            self.boxes.len()
        );
    }

    /// Minimizing resets the viewport and releases the surface. Maximizing
    /// schedules a re-measure after a short settling delay.
    pub fn toggle_minimize(&mut self, now: Instant) {
        self.minimized = !self.minimized;
        if self.minimized {
            self.viewport.reset();
            self.display = DisplaySize::ZERO;
            self.boxes.clear();
            self.hovered = None;
            self.measured_width = None;
            self.measure_due = None;
        } else {
            self.measure_due = Some(now + Duration::from_millis(MAXIMIZE_SETTLE_DELAY_MS));
        }
    }

    /// The drawable surface, or `None` while minimized, unmeasured or before
    /// the image has decoded successfully.
    pub fn surface(&self) -> Option<Surface> {
        if self.minimized || self.display.is_empty() {
            return None;
        }
        let ImageSlot::Ready(image) = &self.image else {
            return None;
        };

        let boxes = self
            .boxes
            .iter()
            .map(|b| BoxLayout {
                hovered: self.hovered == Some(b.index),
                ..b.clone()
            })
            .collect::<Vec<_>>();
        let overlay = self.detections.is_empty().then_some(Overlay::NoDetections);

        Some(Surface {
            display: self.display,
            image: Arc::clone(image),
            boxes,
            overlay,
        })
    }

    /// Update hover from a pointer position in viewer-local screen space.
    pub fn hover_at(&mut self, screen_point: Option<Point>) {
        self.hovered = screen_point
            .filter(|_| !self.minimized)
            .and_then(|p| hit_test(&self.boxes, self.viewport.to_surface(p)));
    }

    pub fn set_hovered(&mut self, index: Option<usize>) {
        self.hovered = index.filter(|i| *i < self.detections.len());
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    pub fn wheel(&mut self, direction: WheelDirection) {
        self.viewport.wheel(direction);
    }

    pub fn zoom_in(&mut self) {
        self.viewport.zoom_in();
    }

    pub fn zoom_out(&mut self) {
        self.viewport.zoom_out();
    }

    pub fn reset_view(&mut self) {
        self.viewport.reset();
    }

    pub fn begin_drag(&mut self, pointer: Point) {
        self.viewport.begin_drag(pointer);
    }

    pub fn drag_to(&mut self, pointer: Point) {
        self.viewport.drag_to(pointer);
    }

    pub fn end_drag(&mut self) {
        self.viewport.end_drag();
    }

    pub fn viewport(&self) -> &ViewportState {
        &self.viewport
    }

    pub fn display_size(&self) -> DisplaySize {
        self.display
    }

    pub fn source_size(&self) -> SourceSize {
        self.source
    }

    pub fn image(&self) -> &ImageSlot {
        &self.image
    }

    pub fn detections(&self) -> &[Detection] {
        &self.detections
    }

    pub fn is_minimized(&self) -> bool {
        self.minimized
    }

    /// Size of the minimized preview thumbnail.
    pub fn thumbnail_size(&self, max_edge: f32) -> DisplaySize {
        DisplaySize::fit_within(self.source, max_edge, max_edge)
    }

    pub fn summary_label(&self) -> String {
        detection_count_label(self.detections.len())
    }
}
