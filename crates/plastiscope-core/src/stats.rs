use std::time::Duration;

use crate::consts::COUNT_UP_DURATION_MS;
use crate::detection::{detection_id, ConfidenceLevel, Detection};

/// Summary over all detection scores. Everything is zero when empty.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Statistics {
    pub total: usize,
    pub average: f64,
    pub max: f64,
    pub min: f64,
}

impl Statistics {
    pub fn from_detections(detections: &[Detection]) -> Self {
        if detections.is_empty() {
            return Self::default();
        }
        let scores = detections.iter().map(|d| d.score);
        let sum: f64 = scores.clone().sum();
        Self {
            total: detections.len(),
            average: sum / detections.len() as f64,
            max: scores.clone().fold(f64::NEG_INFINITY, f64::max),
            min: scores.fold(f64::INFINITY, f64::min),
        }
    }

    /// Intermediate value of the count-up animation after `elapsed`.
    pub fn animated(&self, elapsed: Duration) -> Self {
        let progress =
            (elapsed.as_secs_f64() / Duration::from_millis(COUNT_UP_DURATION_MS).as_secs_f64())
                .min(1.0);
        let eased = ease_out_cubic(progress);
        Self {
            total: (self.total as f64 * eased).round() as usize,
            average: self.average * eased,
            max: self.max * eased,
            min: self.min * eased,
        }
    }
}

/// `1 - (1 - p)^3`, with `p` clamped to `[0, 1]`.
pub fn ease_out_cubic(progress: f64) -> f64 {
    let p = progress.clamp(0.0, 1.0);
    1.0 - (1.0 - p).powi(3)
}

/// Score as a percentage rounded to one decimal, e.g. `0.9734 -> 97.3`.
pub fn percent_one_decimal(score: f64) -> f64 {
    (score * 1000.0).round() / 10.0
}

/// One bar per detection, in detection order.
#[derive(Clone, Debug, PartialEq)]
pub struct ConfidenceBar {
    pub id: String,
    pub confidence: f64,
}

pub fn confidence_bars(detections: &[Detection]) -> Vec<ConfidenceBar> {
    detections
        .iter()
        .enumerate()
        .map(|(i, d)| ConfidenceBar {
            id: detection_id(i),
            confidence: percent_one_decimal(d.score),
        })
        .collect()
}

/// Scores sorted ascending, as `(1-based position, percent)`.
pub fn confidence_trend(detections: &[Detection]) -> Vec<(usize, f64)> {
    let mut scores: Vec<f64> = detections.iter().map(|d| d.score).collect();
    scores.sort_by(f64::total_cmp);
    scores
        .into_iter()
        .enumerate()
        .map(|(i, s)| (i + 1, percent_one_decimal(s)))
        .collect()
}

/// One slice of the confidence-range distribution.
#[derive(Clone, Debug, PartialEq)]
pub struct RangeShare {
    pub level: ConfidenceLevel,
    pub count: usize,
    /// Fraction of all detections in `[0, 1]`.
    pub share: f64,
}

/// High / medium / low counts; empty ranges are left out.
pub fn confidence_ranges(detections: &[Detection]) -> Vec<RangeShare> {
    let total = detections.len();
    ConfidenceLevel::ALL
        .iter()
        .map(|level| {
            let count = detections.iter().filter(|d| d.level() == *level).count();
            RangeShare {
                level: *level,
                count,
                share: if total == 0 {
                    0.0
                } else {
                    count as f64 / total as f64
                },
            }
        })
        .filter(|r| r.count > 0)
        .collect()
}
