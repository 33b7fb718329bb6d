mod commands;
mod summary;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use plastiscope_core::config::AppConfig;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "plastiscope", about = "Microplastic detection client")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Application config file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload images to the backend and save the detections
    Predict(commands::predict::PredictArgs),
    /// Draw detections from a saved result onto its image
    Annotate(commands::annotate::AnnotateArgs),
    /// Summarize detection confidence
    Stats(commands::stats::StatsArgs),
    /// List detections with sorting and filtering
    Table(commands::table::TableArgs),
    /// Write a JSON analysis report
    Report(commands::report::ReportArgs),
    /// Check that the backend is up and the model is loaded
    Health(commands::health::HealthArgs),
    /// Show image metadata and upload eligibility
    Info(commands::info::InfoArgs),
    /// Print or save the default config
    Config(commands::config::ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = AppConfig::load_or_default(cli.config.as_deref()).with_context(|| {
        let path = cli.config.as_ref().map(|p| p.display().to_string());
        format!("Failed to load config {}", path.unwrap_or_default())
    })?;

    match &cli.command {
        Commands::Predict(args) => commands::predict::run(args, &config),
        Commands::Annotate(args) => commands::annotate::run(args, &config),
        Commands::Stats(args) => commands::stats::run(args),
        Commands::Table(args) => commands::table::run(args),
        Commands::Report(args) => commands::report::run(args),
        Commands::Health(args) => commands::health::run(args, &config),
        Commands::Info(args) => commands::info::run(args),
        Commands::Config(args) => commands::config::run(args),
    }
}
