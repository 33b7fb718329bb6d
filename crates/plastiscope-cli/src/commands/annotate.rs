use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Args;
use plastiscope_core::config::AppConfig;
use plastiscope_core::detection::PredictionResponse;
use plastiscope_core::io::image_io::{load_rgba, save_png};
use plastiscope_core::render::render_annotated;

use super::sibling_path;

#[derive(Args)]
pub struct AnnotateArgs {
    /// Source image
    pub image: PathBuf,

    /// Result JSON written by `predict`
    pub result: PathBuf,

    /// Container width to fit the image to (defaults to the config's render_width)
    #[arg(long)]
    pub width: Option<u32>,

    /// Highlight one detection by its 1-based ID
    #[arg(long)]
    pub hover: Option<usize>,

    /// Output PNG path (defaults to <image>_annotated.png)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn run(args: &AnnotateArgs, config: &AppConfig) -> Result<()> {
    let response = PredictionResponse::load(&args.result)
        .with_context(|| format!("Failed to read result {}", args.result.display()))?;
    let image = load_rgba(&args.image)
        .with_context(|| format!("Failed to open image {}", args.image.display()))?;

    let hovered = match args.hover {
        Some(0) => bail!("Detection IDs start at 1"),
        Some(id) if id > response.detections.len() => {
            bail!("No detection #{id:03} (result has {})", response.detections.len())
        }
        Some(id) => Some(id - 1),
        None => None,
    };

    let width = args.width.unwrap_or(config.viewer.render_width) as f32;
    let annotated = render_annotated(Arc::new(image), &response.detections, width, hovered)?
        .context("Nothing to draw at the requested width")?;

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| sibling_path(&args.image, None, "_annotated.png"));
    save_png(&annotated, &output)?;

    println!(
        "Annotated {}x{} image saved to {}",
        annotated.width(),
        annotated.height(),
        output.display()
    );
    Ok(())
}
