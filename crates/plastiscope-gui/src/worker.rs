use std::path::Path;
use std::sync::mpsc;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use plastiscope_core::api::{resolve_from_env, InferenceClient};
use plastiscope_core::config::AppConfig;
use plastiscope_core::detection::{detection_count_label, Detection, PredictionResponse};
use plastiscope_core::io::image_io::{decode_rgba, save_png};
use plastiscope_core::render::render_annotated;
use plastiscope_core::report::AnalysisReport;
use plastiscope_core::upload::{validate_bytes, validate_upload, UploadFile};
use plastiscope_core::viewer::LoadTicket;
use tracing::{info, warn};

use crate::messages::{WorkerCommand, WorkerResult};

/// Spawn the worker thread. Returns the command sender.
pub fn spawn_worker(
    result_tx: mpsc::Sender<WorkerResult>,
    ctx: egui::Context,
) -> mpsc::Sender<WorkerCommand> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<WorkerCommand>();

    std::thread::Builder::new()
        .name("plastiscope-worker".into())
        .spawn(move || {
            worker_loop(cmd_rx, result_tx, ctx);
        })
        .expect("Failed to spawn worker thread");

    cmd_tx
}

fn send(tx: &mpsc::Sender<WorkerResult>, ctx: &egui::Context, result: WorkerResult) {
    let _ = tx.send(result);
    ctx.request_repaint();
}

fn send_log(tx: &mpsc::Sender<WorkerResult>, ctx: &egui::Context, msg: impl Into<String>) {
    send(tx, ctx, WorkerResult::Log { message: msg.into() });
}

fn send_error(tx: &mpsc::Sender<WorkerResult>, ctx: &egui::Context, msg: impl Into<String>) {
    send(tx, ctx, WorkerResult::Error { message: msg.into() });
}

fn worker_loop(
    cmd_rx: mpsc::Receiver<WorkerCommand>,
    tx: mpsc::Sender<WorkerResult>,
    ctx: egui::Context,
) {
    let mut client: Option<InferenceClient> = None;

    while let Ok(cmd) = cmd_rx.recv() {
        match cmd {
            WorkerCommand::Configure { api_url, config } => {
                client = handle_configure(api_url.as_deref(), &config, &tx, &ctx);
            }
            WorkerCommand::AnalyzeFile { path } => {
                let upload = validate_upload(&path)
                    .with_context(|| format!("{} was rejected", path.display()));
                handle_analyze(upload, client.as_ref(), &tx, &ctx);
            }
            WorkerCommand::AnalyzeBytes { file_name, bytes } => {
                let upload = validate_bytes(&file_name, bytes)
                    .with_context(|| format!("{file_name} was rejected"));
                handle_analyze(upload, client.as_ref(), &tx, &ctx);
            }
            WorkerCommand::DecodeImage { ticket, bytes } => {
                handle_decode(ticket, &bytes, &tx, &ctx);
            }
            WorkerCommand::CheckHealth => {
                handle_health(client.as_ref(), &tx, &ctx);
            }
            WorkerCommand::SaveReport { path, result } => {
                match save_report(&path, &result) {
                    Ok(()) => send(&tx, &ctx, WorkerResult::Saved { path }),
                    Err(e) => send_error(&tx, &ctx, format!("{e:#}")),
                }
            }
            WorkerCommand::SaveAnnotated {
                path,
                image,
                detections,
                hovered,
            } => match save_annotated(&path, image, &detections, hovered) {
                Ok(()) => send(&tx, &ctx, WorkerResult::Saved { path }),
                Err(e) => send_error(&tx, &ctx, format!("{e:#}")),
            },
        }
    }
}

fn handle_configure(
    api_url: Option<&str>,
    config: &AppConfig,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) -> Option<InferenceClient> {
    let built = resolve_from_env(api_url, config.api.base_url.as_deref()).and_then(|endpoint| {
        InferenceClient::new(endpoint, Duration::from_secs(config.api.timeout_secs))
    });
    match built {
        Ok(client) => {
            let endpoint = client.endpoint();
            send_log(
                tx,
                ctx,
                format!("Backend: {} ({})", endpoint.base_url, endpoint.source),
            );
            Some(client)
        }
        Err(e) => {
            send_error(tx, ctx, format!("Invalid backend settings: {e}"));
            None
        }
    }
}

fn handle_analyze(
    upload: Result<UploadFile>,
    client: Option<&InferenceClient>,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) {
    let result = upload.and_then(|upload| {
        let client = client.context("No backend configured")?;
        send(
            tx,
            ctx,
            WorkerResult::UploadStarted {
                file_name: upload.file_name.clone(),
            },
        );
        let start = Instant::now();
        let response = client.predict(&upload)?;
        Ok((upload, response, start.elapsed()))
    });

    match result {
        Ok((upload, response, elapsed)) => {
            info!(
                "{}: {} in {:.1}s",
                upload.file_name,
                detection_count_label(response.detections.len()),
                elapsed.as_secs_f32()
            );
            send(
                tx,
                ctx,
                WorkerResult::AnalysisComplete {
                    file_name: upload.file_name,
                    size: upload.size,
                    bytes: Arc::from(upload.bytes),
                    response,
                    elapsed,
                },
            );
        }
        Err(e) => {
            warn!("Analysis failed: {e:#}");
            send(
                tx,
                ctx,
                WorkerResult::AnalysisFailed {
                    message: format!("{e:#}"),
                },
            );
        }
    }
}

fn handle_decode(
    ticket: LoadTicket,
    bytes: &[u8],
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) {
    let result = decode_rgba(bytes).map_err(|e| e.to_string());
    send(tx, ctx, WorkerResult::ImageDecoded { ticket, result });
}

fn handle_health(
    client: Option<&InferenceClient>,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) {
    let Some(client) = client else {
        send_error(tx, ctx, "No backend configured");
        return;
    };
    match client.health() {
        Ok(health) => send(tx, ctx, WorkerResult::Health(health)),
        Err(e) => send_error(tx, ctx, format!("Health check failed: {e}")),
    }
}

fn save_report(path: &Path, result: &PredictionResponse) -> Result<()> {
    AnalysisReport::new(result, chrono::Utc::now())
        .save(path)
        .with_context(|| format!("Failed to write report to {}", path.display()))
}

fn save_annotated(
    path: &Path,
    image: Arc<image::RgbaImage>,
    detections: &[Detection],
    hovered: Option<usize>,
) -> Result<()> {
    let width = image.width() as f32;
    let annotated = render_annotated(image, detections, width, hovered)?.context("Image is empty")?;
    save_png(&annotated, path)
        .with_context(|| format!("Failed to save annotated image to {}", path.display()))
}
