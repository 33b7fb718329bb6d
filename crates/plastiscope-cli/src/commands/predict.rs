use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use plastiscope_core::api::InferenceClient;
use plastiscope_core::config::AppConfig;
use plastiscope_core::detection::PredictionResponse;
use plastiscope_core::io::image_io::{decode_rgba, save_png};
use plastiscope_core::render::render_annotated;
use plastiscope_core::upload::validate_upload;
use rayon::prelude::*;
use tracing::warn;

use super::{connect, sibling_path};

#[derive(Args)]
pub struct PredictArgs {
    /// Images to analyze (jpg, jpeg, png, bmp, webp)
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Backend base URL (overrides PLASTISCOPE_API_URL and the config)
    #[arg(long)]
    pub api_url: Option<String>,

    /// Directory for result files (defaults to each image's directory)
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Also save an annotated PNG next to each result
    #[arg(long)]
    pub annotate: bool,

    /// Width of the annotated image (defaults to the config's render_width)
    #[arg(long)]
    pub width: Option<u32>,
}

struct Outcome {
    file: PathBuf,
    result: Result<(PredictionResponse, PathBuf)>,
}

pub fn run(args: &PredictArgs, config: &AppConfig) -> Result<()> {
    let client = connect(args.api_url.as_deref(), config)?;
    crate::summary::print_endpoint(client.endpoint());

    if let Some(ref dir) = args.output_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
    }
    let width = args.width.unwrap_or(config.viewer.render_width) as f32;

    let pb = ProgressBar::new(args.files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg:20} [{bar:40}] {pos}/{len}")?
            .progress_chars("=> "),
    );
    pb.set_message("Analyzing");

    let outcomes: Vec<Outcome> = args
        .files
        .par_iter()
        .map(|file| {
            let result = analyze_one(&client, file, args, width);
            pb.inc(1);
            Outcome {
                file: file.clone(),
                result,
            }
        })
        .collect();
    pb.finish_with_message("Done");

    let mut failed = 0;
    for outcome in &outcomes {
        match &outcome.result {
            Ok((response, saved)) => {
                crate::summary::print_prediction(&outcome.file, response, saved);
            }
            Err(e) => {
                failed += 1;
                warn!("{}: {e:#}", outcome.file.display());
                crate::summary::print_failure(&outcome.file, e);
            }
        }
    }

    if failed > 0 {
        bail!("{failed} of {} image(s) failed", outcomes.len());
    }
    Ok(())
}

fn analyze_one(
    client: &InferenceClient,
    file: &Path,
    args: &PredictArgs,
    width: f32,
) -> Result<(PredictionResponse, PathBuf)> {
    let upload = validate_upload(file)?;
    let response = client.predict(&upload)?;

    let out_dir = args.output_dir.as_deref();
    let result_path = sibling_path(file, out_dir, ".json");
    std::fs::write(&result_path, serde_json::to_string_pretty(&response)?)
        .with_context(|| format!("Failed to write {}", result_path.display()))?;

    if args.annotate {
        let image = decode_rgba(&upload.bytes)?;
        let annotated = render_annotated(image, &response.detections, width, None)?
            .context("Nothing to draw at the requested width")?;
        save_png(&annotated, &sibling_path(file, out_dir, "_annotated.png"))?;
    }

    Ok((response, result_path))
}
