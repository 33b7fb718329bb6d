use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::{HIGH_CONFIDENCE, MEDIUM_CONFIDENCE};

/// One predicted bounding box as returned by the backend.
///
/// Coordinates are in source-image pixels, `[x1, y1, x2, y2]`. Values keep
/// the backend's double precision so saved results and reports round-trip;
/// drawing code narrows them to `f32` when laying out boxes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub bbox: [f64; 4],
    pub score: f64,
    pub label: i64,
}

impl Detection {
    pub fn new(bbox: [f64; 4], score: f64, label: i64) -> Self {
        Self { bbox, score, label }
    }

    pub fn x1(&self) -> f64 {
        self.bbox[0]
    }

    pub fn y1(&self) -> f64 {
        self.bbox[1]
    }

    pub fn x2(&self) -> f64 {
        self.bbox[2]
    }

    pub fn y2(&self) -> f64 {
        self.bbox[3]
    }

    /// Confidence as a percentage with one decimal, e.g. `"97.3%"`.
    pub fn confidence_label(&self) -> String {
        format!("{:.1}%", self.score * 100.0)
    }

    pub fn level(&self) -> ConfidenceLevel {
        ConfidenceLevel::from_score(self.score)
    }
}

/// Body of a successful `POST /predict`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub detections: Vec<Detection>,
}

impl PredictionResponse {
    pub fn from_json(text: &str) -> crate::error::Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: &std::path::Path) -> crate::error::Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }
}

/// Confidence bucket used by the table filter and the range chart.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConfidenceLevel {
    High,
    Medium,
    Low,
}

impl ConfidenceLevel {
    pub const ALL: [ConfidenceLevel; 3] = [Self::High, Self::Medium, Self::Low];

    pub fn from_score(score: f64) -> Self {
        if score >= HIGH_CONFIDENCE {
            Self::High
        } else if score >= MEDIUM_CONFIDENCE {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::High => write!(f, "High (≥80%)"),
            Self::Medium => write!(f, "Medium (50-80%)"),
            Self::Low => write!(f, "Low (<50%)"),
        }
    }
}

/// `"#001"` style identifier for the detection at `index` (0-based).
pub fn detection_id(index: usize) -> String {
    format!("#{:03}", index + 1)
}

/// `"3 microplastics detected"`, singular for one.
pub fn detection_count_label(count: usize) -> String {
    let plural = if count == 1 { "" } else { "s" };
    format!("{count} microplastic{plural} detected")
}
