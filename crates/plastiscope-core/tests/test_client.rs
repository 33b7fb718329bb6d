mod common;

use std::net::TcpListener;
use std::time::Duration;

use approx::assert_relative_eq;

use common::{png_bytes, serve_once};
use plastiscope_core::api::{resolve_base_url, InferenceClient};
use plastiscope_core::error::ScopeError;
use plastiscope_core::upload::validate_bytes;

fn client_for(base: &str) -> InferenceClient {
    let endpoint = resolve_base_url(Some(base), None, None).unwrap();
    InferenceClient::new(endpoint, Duration::from_secs(5)).unwrap()
}

#[test]
fn test_predict_posts_multipart_and_parses_result() {
    let (base, server) = serve_once(
        "200 OK",
        r#"{"width": 8, "height": 4, "detections": [{"bbox": [1.0, 1.0, 3.0, 3.0], "score": 0.875, "label": 1}]}"#,
    );
    let upload = validate_bytes("slide.png", png_bytes(8, 4)).unwrap();
    let result = client_for(&base).predict(&upload).unwrap();

    assert_eq!((result.width, result.height), (8, 4));
    assert_eq!(result.detections.len(), 1);
    assert_relative_eq!(result.detections[0].score, 0.875);

    let request = server.join().unwrap();
    assert!(request.starts_with("POST /predict "), "request: {request}");
    assert!(request.to_ascii_lowercase().contains("multipart/form-data"));
    assert!(request.contains(r#"name="file""#));
    assert!(request.contains(r#"filename="slide.png""#));
}

#[test]
fn test_missing_detections_field_defaults_to_empty() {
    let (base, server) = serve_once("200 OK", r#"{"width": 8, "height": 4}"#);
    let upload = validate_bytes("slide.png", png_bytes(8, 4)).unwrap();
    let result = client_for(&base).predict(&upload).unwrap();
    assert!(result.detections.is_empty());
    server.join().unwrap();
}

#[test]
fn test_backend_error_detail_is_surfaced() {
    let (base, server) = serve_once(
        "400 Bad Request",
        r#"{"detail": "Invalid file type. Allowed: .jpg, .png"}"#,
    );
    let upload = validate_bytes("slide.png", png_bytes(8, 4)).unwrap();
    let err = client_for(&base).predict(&upload).unwrap_err();
    match err {
        ScopeError::Backend { status, detail } => {
            assert_eq!(status, 400);
            assert_eq!(detail, "Invalid file type. Allowed: .jpg, .png");
        }
        other => panic!("expected backend error, got {other:?}"),
    }
    server.join().unwrap();
}

#[test]
fn test_malformed_body_is_invalid_response() {
    let (base, server) = serve_once("200 OK", r#"{"width": "wide"}"#);
    let upload = validate_bytes("slide.png", png_bytes(8, 4)).unwrap();
    let err = client_for(&base).predict(&upload).unwrap_err();
    assert!(matches!(err, ScopeError::InvalidResponse(_)), "got {err:?}");
    server.join().unwrap();
}

#[test]
fn test_unreachable_backend() {
    // Grab a free port, then release it so nothing is listening.
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let client = client_for(&format!("http://127.0.0.1:{port}"));
    let err = client.health().unwrap_err();
    assert!(matches!(err, ScopeError::Unreachable { .. }), "got {err:?}");
    assert!(err.to_string().contains(&format!("127.0.0.1:{port}")));
}

#[test]
fn test_health() {
    let (base, server) = serve_once(
        "200 OK",
        r#"{"status": "healthy", "model_loaded": true, "device": "cpu"}"#,
    );
    let health = client_for(&base).health().unwrap();
    assert!(health.is_healthy());
    assert!(health.model_loaded);
    assert_eq!(health.device.as_deref(), Some("cpu"));

    let request = server.join().unwrap();
    assert!(request.starts_with("GET /health "));
}
