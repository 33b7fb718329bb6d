use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use image::RgbaImage;
use plastiscope_core::api::HealthStatus;
use plastiscope_core::config::AppConfig;
use plastiscope_core::detection::{Detection, PredictionResponse};
use plastiscope_core::viewer::{LoadTicket, SourceSize};

/// Commands sent from UI thread to worker thread.
pub enum WorkerCommand {
    /// Rebuild the HTTP client for a new backend URL or timeout.
    Configure {
        api_url: Option<String>,
        config: AppConfig,
    },

    /// Validate an image file from disk and send it to `/predict`.
    AnalyzeFile { path: PathBuf },

    /// Same as `AnalyzeFile` for a dropped file that only has bytes.
    AnalyzeBytes { file_name: String, bytes: Vec<u8> },

    /// Decode the analyzed image for the viewer.
    DecodeImage { ticket: LoadTicket, bytes: Arc<[u8]> },

    CheckHealth,

    /// Write the JSON analysis report.
    SaveReport {
        path: PathBuf,
        result: PredictionResponse,
    },

    /// Render boxes onto the image at full resolution and save as PNG.
    SaveAnnotated {
        path: PathBuf,
        image: Arc<RgbaImage>,
        detections: Arc<[Detection]>,
        hovered: Option<usize>,
    },
}

/// Results sent from worker thread back to UI thread.
pub enum WorkerResult {
    /// Upload passed local validation and is on its way to the backend.
    UploadStarted { file_name: String },

    AnalysisComplete {
        file_name: String,
        size: SourceSize,
        bytes: Arc<[u8]>,
        response: PredictionResponse,
        elapsed: Duration,
    },

    ImageDecoded {
        ticket: LoadTicket,
        result: Result<Arc<RgbaImage>, String>,
    },

    Health(HealthStatus),
    ConfigImported {
        config: AppConfig,
    },
    Saved {
        path: PathBuf,
    },
    /// Upload or analysis failed; the UI leaves the analyzing state.
    AnalysisFailed {
        message: String,
    },
    Error {
        message: String,
    },
    Log {
        message: String,
    },
}
