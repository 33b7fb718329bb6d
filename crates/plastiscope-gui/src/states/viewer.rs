use std::sync::Arc;
use std::time::Instant;

use plastiscope_core::detection::{Detection, PredictionResponse};
use plastiscope_core::table::TableQuery;
use plastiscope_core::viewer::{AnnotatedViewer, LoadTicket, SourceSize};

/// The current analysis result and everything the result panels show.
#[derive(Default)]
pub struct ViewerState {
    pub viewer: AnnotatedViewer,
    pub texture: Option<egui::TextureHandle>,
    pub result: Option<PredictionResponse>,
    pub detections: Arc<[Detection]>,
    pub file_name: String,
    /// When the statistics count-up started.
    pub shown_at: Option<Instant>,
    pub table: TableQuery,
}

impl ViewerState {
    /// Show a new result. The returned ticket must accompany the decoded image.
    pub fn show_result(
        &mut self,
        file_name: String,
        size: SourceSize,
        response: PredictionResponse,
    ) -> LoadTicket {
        let now = Instant::now();
        self.detections = Arc::from(response.detections.as_slice());
        self.texture = None;
        self.file_name = file_name;
        self.result = Some(response);
        self.shown_at = Some(now);
        self.table = TableQuery::default();
        self.viewer.load(size, Arc::clone(&self.detections), now)
    }

    pub fn clear(&mut self) {
        self.viewer.clear();
        self.texture = None;
        self.result = None;
        self.detections = Arc::from(Vec::new());
        self.file_name.clear();
        self.shown_at = None;
        self.table = TableQuery::default();
    }
}
