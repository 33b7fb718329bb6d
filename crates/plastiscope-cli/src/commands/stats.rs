use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use plastiscope_core::detection::PredictionResponse;
use plastiscope_core::stats::{confidence_bars, confidence_ranges, Statistics};

#[derive(Args)]
pub struct StatsArgs {
    /// Result JSON written by `predict`
    pub result: PathBuf,
}

pub fn run(args: &StatsArgs) -> Result<()> {
    let response = PredictionResponse::load(&args.result)
        .with_context(|| format!("Failed to read result {}", args.result.display()))?;

    let stats = Statistics::from_detections(&response.detections);
    crate::summary::print_statistics(
        &stats,
        &confidence_ranges(&response.detections),
        &confidence_bars(&response.detections),
    );
    Ok(())
}
