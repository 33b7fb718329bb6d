use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Args;
use plastiscope_core::detection::PredictionResponse;
use plastiscope_core::report::{report_file_name, AnalysisReport};

#[derive(Args)]
pub struct ReportArgs {
    /// Result JSON written by `predict`
    pub result: PathBuf,

    /// Output path (defaults to microplastic-report-<millis>.json)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn run(args: &ReportArgs) -> Result<()> {
    let response = PredictionResponse::load(&args.result)
        .with_context(|| format!("Failed to read result {}", args.result.display()))?;

    let now = Utc::now();
    let report = AnalysisReport::new(&response, now);
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(report_file_name(now)));
    report
        .save(&output)
        .with_context(|| format!("Failed to write report to {}", output.display()))?;

    println!(
        "Report with {} detection(s) saved to {}",
        report.total_detections,
        output.display()
    );
    Ok(())
}
