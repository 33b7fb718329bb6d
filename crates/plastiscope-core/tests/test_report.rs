mod common;

use chrono::{TimeZone, Utc};

use common::sample_response;
use plastiscope_core::detection::PredictionResponse;
use plastiscope_core::report::{report_file_name, AnalysisReport};

#[test]
fn test_report_fields() {
    let at = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();
    let report = AnalysisReport::new(&sample_response(), at);
    assert_eq!(report.timestamp, "2025-01-02T03:04:05.000Z");
    assert_eq!(report.total_detections, 5);
    assert_eq!(report.image_size.width, 100);
    assert_eq!(report.detections[0].id, 1);
    assert_eq!(report.detections[0].confidence, "92.00%");
    assert_eq!(report.detections[4].bbox, [0.0, 0.0, 12.4, 7.6]);
}

#[test]
fn test_report_json_uses_camel_case() {
    let at = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();
    let json = AnalysisReport::new(&sample_response(), at)
        .to_json_pretty()
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["totalDetections"], 5);
    assert_eq!(value["imageSize"]["height"], 100);
    assert_eq!(value["detections"][1]["confidence"], "55.00%");
    assert!(value.get("total_detections").is_none());
}

#[test]
fn test_report_for_empty_result() {
    let empty = PredictionResponse {
        width: 64,
        height: 32,
        detections: Vec::new(),
    };
    let report = AnalysisReport::new(&empty, Utc::now());
    assert_eq!(report.total_detections, 0);
    assert!(report.detections.is_empty());
}

#[test]
fn test_report_save_and_file_name() {
    let dir = tempfile::tempdir().unwrap();
    let at = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();
    let name = report_file_name(at);
    assert_eq!(name, "microplastic-report-1735787045000.json");

    let path = dir.path().join(&name);
    let report = AnalysisReport::new(&sample_response(), at);
    report.save(&path).unwrap();
    let loaded: AnalysisReport =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(loaded, report);
}

#[test]
fn test_backend_precision_survives_resave_and_report() {
    let body = r#"{
        "width": 4000,
        "height": 3000,
        "detections": [
            {"bbox": [1234.5678, 2345.6789, 3456.789, 2999.123456], "score": 0.873456789, "label": 1}
        ]
    }"#;
    let response = PredictionResponse::from_json(body).unwrap();
    let d = &response.detections[0];
    assert_eq!(d.bbox, [1234.5678, 2345.6789, 3456.789, 2999.123456]);
    assert_eq!(d.score, 0.873456789);

    // What `plastiscope predict` writes next to the image.
    let resaved: serde_json::Value =
        serde_json::from_str(&serde_json::to_string_pretty(&response).unwrap()).unwrap();
    assert_eq!(resaved["detections"][0]["bbox"][0], 1234.5678);
    assert_eq!(resaved["detections"][0]["bbox"][3], 2999.123456);
    assert_eq!(resaved["detections"][0]["score"], 0.873456789);

    let at = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();
    let report = AnalysisReport::new(&response, at);
    assert_eq!(report.detections[0].bbox, d.bbox);
    assert_eq!(report.detections[0].confidence, "87.35%");
    let value: serde_json::Value =
        serde_json::from_str(&report.to_json_pretty().unwrap()).unwrap();
    assert_eq!(value["detections"][0]["bbox"][1], 2345.6789);
}
