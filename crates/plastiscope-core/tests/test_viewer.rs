mod common;

use std::sync::Arc;
use std::time::{Duration, Instant};

use approx::assert_relative_eq;

use common::{det, sample_detections, solid_image};
use plastiscope_core::detection::Detection;
use plastiscope_core::consts::{LABEL_PADDING, LABEL_TEXT_HEIGHT};
use plastiscope_core::viewer::{
    place_label_chip, AnnotatedViewer, DisplaySize, ImageSlot, Overlay, Point, SourceSize,
    SurfaceRect,
};

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

/// Load, decode and measure in one go.
fn ready_viewer(
    source: SourceSize,
    detections: Vec<Detection>,
    container_width: f32,
) -> (AnnotatedViewer, Instant) {
    let t0 = Instant::now();
    let mut viewer = AnnotatedViewer::default();
    let ticket = viewer.load(source, Arc::from(detections), t0);
    assert!(viewer.complete_load(ticket, Ok(solid_image(source.width, source.height, [0, 0, 0]))));
    assert!(viewer.poll(t0 + ms(10), container_width));
    (viewer, t0)
}

// ---------------------------------------------------------------------------
// Geometry
// ---------------------------------------------------------------------------

#[test]
fn test_box_scales_with_display() {
    let (viewer, _) = ready_viewer(
        SourceSize::new(100, 100),
        vec![det(10.0, 10.0, 50.0, 50.0, 0.9)],
        50.0,
    );
    let surface = viewer.surface().expect("surface");
    assert_relative_eq!(surface.display.width, 50.0);
    assert_relative_eq!(surface.display.height, 50.0);
    assert_eq!(surface.boxes.len(), 1);
    assert_eq!(surface.boxes[0].rect, SurfaceRect::new(5.0, 5.0, 25.0, 25.0));
    assert_eq!(surface.boxes[0].label, "90.0%");
    assert!(surface.overlay.is_none());
}

#[test]
fn test_never_upscales_past_intrinsic_width() {
    let (viewer, _) = ready_viewer(SourceSize::new(200, 100), sample_detections(), 800.0);
    let size = viewer.display_size();
    assert_relative_eq!(size.width, 200.0);
    assert_relative_eq!(size.height, 100.0);
}

#[test]
fn test_measure_waits_for_initial_delay() {
    let t0 = Instant::now();
    let mut viewer = AnnotatedViewer::default();
    viewer.load(SourceSize::new(100, 100), Arc::from(sample_detections()), t0);
    assert_eq!(viewer.measure_pending(t0 + ms(4)), Some(ms(6)));
    assert!(!viewer.poll(t0 + ms(5), 100.0));
    assert!(viewer.display_size().is_empty());
    assert!(viewer.poll(t0 + ms(10), 100.0));
    assert!(!viewer.display_size().is_empty());
    assert_eq!(viewer.measure_pending(t0 + ms(10)), None);
}

#[test]
fn test_container_resize_remeasures_without_touching_zoom() {
    let (mut viewer, t0) = ready_viewer(SourceSize::new(400, 200), sample_detections(), 400.0);
    viewer.zoom_in();
    viewer.container_resized(200.0);
    assert_relative_eq!(viewer.display_size().width, 200.0);
    assert_relative_eq!(viewer.display_size().height, 100.0);
    assert_relative_eq!(viewer.viewport().scale, 1.2);

    // A width change seen by poll re-fits right away.
    assert!(viewer.poll(t0 + ms(20), 100.0));
    assert_relative_eq!(viewer.display_size().width, 100.0);
    assert!(!viewer.poll(t0 + ms(30), 100.0));
}

#[test]
fn test_zero_container_width_gives_no_surface() {
    let (viewer, _) = ready_viewer(SourceSize::new(100, 100), sample_detections(), 0.0);
    assert!(viewer.display_size().is_empty());
    assert!(viewer.surface().is_none());
}

// ---------------------------------------------------------------------------
// Empty results
// ---------------------------------------------------------------------------

#[test]
fn test_no_detections_shows_overlay() {
    let (viewer, _) = ready_viewer(SourceSize::new(100, 100), Vec::new(), 100.0);
    let surface = viewer.surface().expect("surface");
    assert!(surface.boxes.is_empty());
    assert_eq!(surface.overlay, Some(Overlay::NoDetections));
    assert_eq!(Overlay::NoDetections.title(), "No microplastics detected");
    assert_eq!(viewer.summary_label(), "0 microplastics detected");
}

// ---------------------------------------------------------------------------
// Minimize / maximize
// ---------------------------------------------------------------------------

#[test]
fn test_minimize_resets_viewport_and_maximize_remeasures() {
    let (mut viewer, t0) = ready_viewer(SourceSize::new(100, 100), sample_detections(), 100.0);
    viewer.zoom_in();
    viewer.begin_drag(Point::new(0.0, 0.0));
    viewer.drag_to(Point::new(30.0, 30.0));
    viewer.end_drag();

    viewer.toggle_minimize(t0 + ms(100));
    assert!(viewer.is_minimized());
    assert!(viewer.surface().is_none());
    assert_eq!(viewer.viewport().scale, 1.0);
    assert_eq!(viewer.viewport().offset, Point::ZERO);
    assert!(!viewer.poll(t0 + ms(200), 100.0));

    let thumb = viewer.thumbnail_size(80.0);
    assert_relative_eq!(thumb.width, 80.0);
    assert_relative_eq!(thumb.height, 80.0);

    viewer.toggle_minimize(t0 + ms(300));
    assert!(!viewer.is_minimized());
    assert!(!viewer.poll(t0 + ms(320), 100.0));
    assert!(viewer.poll(t0 + ms(350), 100.0));
    let surface = viewer.surface().expect("surface after maximize");
    assert!(!surface.display.is_empty());
    assert_eq!(surface.boxes.len(), 5);
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

#[test]
fn test_stale_load_is_ignored() {
    let t0 = Instant::now();
    let mut viewer = AnnotatedViewer::default();
    let first = viewer.load(SourceSize::new(10, 10), Arc::from(Vec::new()), t0);
    let second = viewer.load(SourceSize::new(100, 100), Arc::from(sample_detections()), t0);

    assert!(!viewer.complete_load(first, Ok(solid_image(10, 10, [1, 2, 3]))));
    assert!(matches!(viewer.image(), ImageSlot::Loading));

    assert!(viewer.complete_load(second, Ok(solid_image(100, 100, [1, 2, 3]))));
    assert!(matches!(viewer.image(), ImageSlot::Ready(img) if img.width() == 100));
}

#[test]
fn test_clear_keeps_earlier_tickets_stale() {
    let t0 = Instant::now();
    let mut viewer = AnnotatedViewer::default();
    let dropped = viewer.load(SourceSize::new(10, 10), Arc::from(Vec::new()), t0);

    viewer.clear();
    assert!(matches!(viewer.image(), ImageSlot::Empty));
    assert!(viewer.detections().is_empty());

    let next = viewer.load(SourceSize::new(100, 100), Arc::from(sample_detections()), t0);
    assert_ne!(dropped, next);
    assert!(!viewer.complete_load(dropped, Ok(solid_image(10, 10, [1, 2, 3]))));
    assert!(matches!(viewer.image(), ImageSlot::Loading));
    assert!(viewer.complete_load(next, Ok(solid_image(100, 100, [1, 2, 3]))));
}

#[test]
fn test_failed_load_shows_nothing() {
    let t0 = Instant::now();
    let mut viewer = AnnotatedViewer::default();
    let ticket = viewer.load(SourceSize::new(100, 100), Arc::from(sample_detections()), t0);
    assert!(viewer.complete_load(ticket, Err("corrupt".to_string())));
    viewer.poll(t0 + ms(10), 100.0);
    assert!(matches!(viewer.image(), ImageSlot::Failed));
    assert!(viewer.surface().is_none());
}

#[test]
fn test_new_load_resets_interaction_state() {
    let (mut viewer, t0) = ready_viewer(SourceSize::new(100, 100), sample_detections(), 100.0);
    viewer.zoom_in();
    viewer.set_hovered(Some(1));
    viewer.toggle_minimize(t0);

    viewer.load(SourceSize::new(50, 50), Arc::from(Vec::new()), t0 + ms(500));
    assert!(!viewer.is_minimized());
    assert_eq!(viewer.viewport().scale, 1.0);
    assert_eq!(viewer.hovered(), None);
    assert!(viewer.detections().is_empty());
}

// ---------------------------------------------------------------------------
// Hover
// ---------------------------------------------------------------------------

#[test]
fn test_hover_uses_inverse_transform() {
    let (mut viewer, _) = ready_viewer(
        SourceSize::new(100, 100),
        vec![det(10.0, 10.0, 30.0, 30.0, 0.9), det(60.0, 60.0, 90.0, 90.0, 0.4)],
        100.0,
    );
    viewer.hover_at(Some(Point::new(20.0, 20.0)));
    assert_eq!(viewer.hovered(), Some(0));

    // Panned by 10px: screen (80, 80) maps back to surface (70, 70).
    viewer.begin_drag(Point::new(0.0, 0.0));
    viewer.drag_to(Point::new(10.0, 10.0));
    viewer.end_drag();
    viewer.hover_at(Some(Point::new(80.0, 80.0)));
    assert_eq!(viewer.hovered(), Some(1));

    viewer.hover_at(Some(Point::new(5.0, 5.0)));
    assert_eq!(viewer.hovered(), None);

    viewer.hover_at(None);
    assert_eq!(viewer.hovered(), None);
}

#[test]
fn test_hovered_box_is_flagged_on_surface() {
    let (mut viewer, _) = ready_viewer(SourceSize::new(100, 100), sample_detections(), 100.0);
    viewer.set_hovered(Some(2));
    let surface = viewer.surface().expect("surface");
    let flagged: Vec<usize> = surface.boxes.iter().filter(|b| b.hovered).map(|b| b.index).collect();
    assert_eq!(flagged, vec![2]);
    assert_eq!(surface.boxes[2].line_width(), 3.0);
    assert_eq!(surface.boxes[1].line_width(), 2.0);

    viewer.set_hovered(Some(99));
    assert_eq!(viewer.hovered(), None);
}

// ---------------------------------------------------------------------------
// Label chips
// ---------------------------------------------------------------------------

const CHIP_H: f32 = LABEL_TEXT_HEIGHT + LABEL_PADDING;

fn assert_chip_inside(chip: &SurfaceRect, surface: DisplaySize) {
    let max_x = (surface.width - chip.width()).max(0.0);
    assert!(chip.x1 >= 0.0 && chip.x1 <= max_x, "x {} outside [0, {max_x}]", chip.x1);
    assert!(chip.y1 >= 0.0, "y {}", chip.y1);
}

#[test]
fn test_chip_sits_directly_above_box() {
    let surface = DisplaySize::new(200.0, 200.0);
    let chip = place_label_chip(&SurfaceRect::new(50.0, 80.0, 90.0, 120.0), 40.0, surface);
    assert_eq!(chip, SurfaceRect::new(50.0, 80.0 - CHIP_H, 110.0, 80.0));
}

#[test]
fn test_chip_at_top_left_corner_is_pulled_inside() {
    let surface = DisplaySize::new(200.0, 200.0);
    let chip = place_label_chip(&SurfaceRect::new(0.0, 0.0, 20.0, 20.0), 40.0, surface);
    assert_chip_inside(&chip, surface);
    assert_eq!((chip.x1, chip.y1), (0.0, 0.0));
    assert_relative_eq!(chip.height(), CHIP_H);
}

#[test]
fn test_chip_at_right_edge_is_shifted_left() {
    let surface = DisplaySize::new(200.0, 200.0);
    let chip = place_label_chip(&SurfaceRect::new(190.0, 100.0, 200.0, 150.0), 40.0, surface);
    assert_chip_inside(&chip, surface);
    assert_relative_eq!(chip.x2, 200.0);
    assert_relative_eq!(chip.y1, 100.0 - CHIP_H);
}

#[test]
fn test_chip_wider_than_surface_starts_at_zero() {
    let surface = DisplaySize::new(7.0, 7.0);
    for rect in [
        SurfaceRect::new(0.0, 0.0, 3.0, 3.0),
        SurfaceRect::new(6.0, 2.0, 7.0, 7.0),
        SurfaceRect::new(-5.0, -5.0, 20.0, 20.0),
    ] {
        let chip = place_label_chip(&rect, 40.0, surface);
        assert_chip_inside(&chip, surface);
        assert_eq!(chip.x1, 0.0);
    }
}

#[test]
fn test_flipped_box_places_chip_from_its_top_left() {
    let surface = DisplaySize::new(200.0, 200.0);
    let chip = place_label_chip(&SurfaceRect::new(90.0, 120.0, 50.0, 80.0), 40.0, surface);
    assert_eq!((chip.x1, chip.y2), (50.0, 80.0));
}
