mod common;

use std::sync::Arc;
use std::time::{Duration, Instant};

use image::Rgba;

use common::{det, solid_image};
use plastiscope_core::consts::{OVERLAY_ALPHA, OVERLAY_RGB};
use plastiscope_core::render::{render_annotated, render_surface};
use plastiscope_core::viewer::{AnnotatedViewer, SourceSize, Surface};

fn surface_for(detections: Vec<plastiscope_core::detection::Detection>, rgb: [u8; 3]) -> Surface {
    let t0 = Instant::now();
    let mut viewer = AnnotatedViewer::default();
    let ticket = viewer.load(SourceSize::new(100, 100), Arc::from(detections), t0);
    viewer.complete_load(ticket, Ok(solid_image(100, 100, rgb)));
    viewer.poll(t0 + Duration::from_millis(10), 100.0);
    viewer.surface().expect("surface")
}

#[test]
fn test_output_matches_display_size() {
    let surface = surface_for(vec![det(10.0, 10.0, 50.0, 50.0, 0.9)], [0, 0, 0]);
    let img = render_surface(&surface).unwrap();
    assert_eq!(img.dimensions(), (100, 100));
}

#[test]
fn test_box_edge_is_stroked_and_interior_untouched() {
    let black = Rgba([0, 0, 0, 255]);
    let surface = surface_for(vec![det(20.0, 40.0, 80.0, 90.0, 0.9)], [0, 0, 0]);
    let img = render_surface(&surface).unwrap();

    assert_ne!(*img.get_pixel(20, 70), black, "left edge should be painted");
    assert_ne!(*img.get_pixel(50, 90), black, "bottom edge should be painted");
    assert_eq!(*img.get_pixel(50, 70), black, "interior stays clear");
    // Outside the box and away from the label chip above it.
    assert_eq!(*img.get_pixel(5, 95), black);
}

#[test]
fn test_label_chip_sits_above_box() {
    let black = Rgba([0, 0, 0, 255]);
    let surface = surface_for(vec![det(20.0, 40.0, 80.0, 90.0, 0.9)], [0, 0, 0]);
    let img = render_surface(&surface).unwrap();
    // Chip spans y 10..40 starting at the box's left edge.
    assert_ne!(*img.get_pixel(22, 12), black);
    assert_eq!(*img.get_pixel(22, 5), black);
}

#[test]
fn test_no_detection_overlay_darkens_image() {
    let img = render_surface(&surface_for(Vec::new(), [255, 255, 255])).unwrap();
    let corner = img.get_pixel(3, 3);
    // 0.95 dark fill over white.
    let a = OVERLAY_ALPHA as f32 / 255.0;
    let expected = OVERLAY_RGB[0] as f32 * a + 255.0 * (1.0 - a);
    assert!(
        (corner.0[0] as f32 - expected).abs() <= 2.0,
        "overlay should cover the image: {corner:?}"
    );
}

#[test]
fn test_render_annotated_fits_width() {
    let dets = vec![det(10.0, 10.0, 90.0, 40.0, 0.7)];
    let img = render_annotated(solid_image(200, 100, [0, 0, 0]), &dets, 100.0, Some(0))
        .unwrap()
        .expect("rendered");
    assert_eq!(img.dimensions(), (100, 50));

    // Wider than the source: stays at intrinsic size.
    let img = render_annotated(solid_image(200, 100, [0, 0, 0]), &dets, 1000.0, None)
        .unwrap()
        .expect("rendered");
    assert_eq!(img.dimensions(), (200, 100));

    assert!(render_annotated(solid_image(200, 100, [0, 0, 0]), &dets, 0.0, None)
        .unwrap()
        .is_none());
}

#[test]
fn test_overlay_draws_its_title_text() {
    let img = render_annotated(solid_image(600, 200, [0, 0, 0]), &[], 600.0, None)
        .unwrap()
        .expect("rendered");
    let bright = img.pixels().filter(|p| p.0[0] > 200).count();
    assert!(bright > 0, "overlay text should be drawn");
    // Corners stay dim fill.
    assert!(img.get_pixel(2, 2).0[0] < 64);
}

#[test]
fn test_oversized_and_degenerate_boxes_are_not_fatal() {
    let dets = vec![
        det(0.0, 0.0, 1e10, 50.0, 0.9),
        det(-1e12, -1e12, 1e12, 1e12, 0.8),
        det(5e9, 5e9, 6e9, 6e9, 0.7),
        det(40.0, 40.0, 40.0, 40.0, 0.6),
        det(f64::NAN, 10.0, 20.0, f64::INFINITY, 0.5),
    ];
    let img = render_annotated(solid_image(100, 100, [0, 0, 0]), &dets, 100.0, Some(1))
        .unwrap()
        .expect("rendered");
    assert_eq!(img.dimensions(), (100, 100));
    // The first box runs off the right edge; its left and top edges are still drawn.
    assert_ne!(*img.get_pixel(0, 30), Rgba([0, 0, 0, 255]));
}

#[test]
fn test_edge_boxes_render_on_narrow_surface() {
    let dets = vec![
        det(0.0, 0.0, 20.0, 20.0, 0.9),
        det(80.0, 0.0, 100.0, 30.0, 0.8),
    ];
    let img = render_annotated(solid_image(100, 100, [0, 0, 0]), &dets, 7.0, Some(0))
        .unwrap()
        .expect("rendered");
    assert_eq!(img.dimensions(), (7, 7));
}
