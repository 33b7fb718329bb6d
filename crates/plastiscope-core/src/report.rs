use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::detection::PredictionResponse;
use crate::error::Result;

/// Downloadable summary of one analysis.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub timestamp: String,
    pub total_detections: usize,
    pub image_size: ImageSize,
    pub detections: Vec<ReportEntry>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReportEntry {
    /// 1-based position in the backend's detection order.
    pub id: usize,
    /// Percentage with two decimals, e.g. `"97.32%"`.
    pub confidence: String,
    /// As received from the backend.
    pub bbox: [f64; 4],
}

impl AnalysisReport {
    pub fn new(result: &PredictionResponse, at: DateTime<Utc>) -> Self {
        Self {
            timestamp: at.to_rfc3339_opts(SecondsFormat::Millis, true),
            total_detections: result.detections.len(),
            image_size: ImageSize {
                width: result.width,
                height: result.height,
            },
            detections: result
                .detections
                .iter()
                .enumerate()
                .map(|(i, d)| ReportEntry {
                    id: i + 1,
                    confidence: format!("{:.2}%", d.score * 100.0),
                    bbox: d.bbox,
                })
                .collect(),
        }
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_json_pretty()?)?;
        Ok(())
    }
}

/// `microplastic-report-<unix millis>.json`.
pub fn report_file_name(at: DateTime<Utc>) -> String {
    format!("microplastic-report-{}.json", at.timestamp_millis())
}
