use std::cmp::Ordering;
use std::fmt;

use crate::detection::{detection_id, ConfidenceLevel, Detection};

/// Column a detection table can be sorted by.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortField {
    #[default]
    Id,
    Confidence,
    X1,
    Y1,
    X2,
    Y2,
}

impl SortField {
    pub const ALL: [SortField; 6] = [
        Self::Id,
        Self::Confidence,
        Self::X1,
        Self::Y1,
        Self::X2,
        Self::Y2,
    ];

    fn key(&self, index: usize, d: &Detection) -> f64 {
        match self {
            Self::Id => index as f64,
            Self::Confidence => d.score,
            Self::X1 => d.x1(),
            Self::Y1 => d.y1(),
            Self::X2 => d.x2(),
            Self::Y2 => d.y2(),
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id => write!(f, "ID"),
            Self::Confidence => write!(f, "Confidence"),
            Self::X1 => write!(f, "X1"),
            Self::Y1 => write!(f, "Y1"),
            Self::X2 => write!(f, "X2"),
            Self::Y2 => write!(f, "Y2"),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    pub fn arrow(&self) -> &'static str {
        match self {
            Self::Ascending => "↑",
            Self::Descending => "↓",
        }
    }
}

/// Confidence filter of the table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConfidenceFilter {
    #[default]
    All,
    Only(ConfidenceLevel),
}

impl ConfidenceFilter {
    pub const ALL: [ConfidenceFilter; 4] = [
        Self::All,
        Self::Only(ConfidenceLevel::High),
        Self::Only(ConfidenceLevel::Medium),
        Self::Only(ConfidenceLevel::Low),
    ];

    pub fn matches(&self, d: &Detection) -> bool {
        match self {
            Self::All => true,
            Self::Only(level) => d.level() == *level,
        }
    }
}

impl fmt::Display for ConfidenceFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "All Confidence"),
            Self::Only(level) => write!(f, "{level}"),
        }
    }
}

/// One rendered row; `index` points back into the original sequence.
#[derive(Clone, Debug, PartialEq)]
pub struct TableRow {
    pub index: usize,
    pub id: String,
    pub label: &'static str,
    pub confidence: String,
    pub level: ConfidenceLevel,
    pub coords: [i64; 4],
}

impl TableRow {
    fn new(index: usize, d: &Detection) -> Self {
        Self {
            index,
            id: detection_id(index),
            label: "Microplastic",
            confidence: d.confidence_label(),
            level: d.level(),
            coords: d.bbox.map(|v| v.round() as i64),
        }
    }
}

/// Sort, search and filter settings of the detection table.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TableQuery {
    pub sort_field: SortField,
    pub direction: SortDirection,
    /// Substring matched against the unpadded 1-based ID.
    pub search: String,
    pub filter: ConfidenceFilter,
}

impl TableQuery {
    /// Header click: same column flips direction, new column sorts ascending.
    pub fn toggle_sort(&mut self, field: SortField) {
        if self.sort_field == field {
            self.direction = self.direction.toggled();
        } else {
            self.sort_field = field;
            self.direction = SortDirection::Ascending;
        }
    }

    pub fn apply(&self, detections: &[Detection]) -> Vec<TableRow> {
        let search = self.search.trim();
        let mut rows: Vec<(usize, &Detection)> = detections
            .iter()
            .enumerate()
            .filter(|(i, _)| search.is_empty() || (i + 1).to_string().contains(search))
            .filter(|(_, d)| self.filter.matches(d))
            .collect();

        rows.sort_by(|(ia, a), (ib, b)| {
            let ord = self
                .sort_field
                .key(*ia, a)
                .partial_cmp(&self.sort_field.key(*ib, b))
                .unwrap_or(Ordering::Equal);
            match self.direction {
                SortDirection::Ascending => ord,
                SortDirection::Descending => ord.reverse(),
            }
        });

        rows.into_iter().map(|(i, d)| TableRow::new(i, d)).collect()
    }
}

/// `"Showing 3 of 10"`.
pub fn showing_label(shown: usize, total: usize) -> String {
    format!("Showing {shown} of {total}")
}

pub const EMPTY_TABLE_MESSAGE: &str = "No detections found matching your filters";
