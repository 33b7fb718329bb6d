use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use plastiscope_core::detection::{ConfidenceLevel, PredictionResponse};
use plastiscope_core::table::{
    showing_label, ConfidenceFilter, SortDirection, SortField, TableQuery, EMPTY_TABLE_MESSAGE,
};

#[derive(Clone, ValueEnum)]
pub enum SortArg {
    Id,
    Confidence,
    X1,
    Y1,
    X2,
    Y2,
}

#[derive(Clone, ValueEnum)]
pub enum LevelArg {
    All,
    High,
    Medium,
    Low,
}

#[derive(Args)]
pub struct TableArgs {
    /// Result JSON written by `predict`
    pub result: PathBuf,

    /// Column to sort by
    #[arg(long, value_enum, default_value = "id")]
    pub sort: SortArg,

    /// Sort descending
    #[arg(long)]
    pub desc: bool,

    /// Only IDs containing this text
    #[arg(long)]
    pub search: Option<String>,

    /// Confidence range to show
    #[arg(long, value_enum, default_value = "all")]
    pub confidence: LevelArg,
}

pub fn run(args: &TableArgs) -> Result<()> {
    let response = PredictionResponse::load(&args.result)
        .with_context(|| format!("Failed to read result {}", args.result.display()))?;

    let query = TableQuery {
        sort_field: match args.sort {
            SortArg::Id => SortField::Id,
            SortArg::Confidence => SortField::Confidence,
            SortArg::X1 => SortField::X1,
            SortArg::Y1 => SortField::Y1,
            SortArg::X2 => SortField::X2,
            SortArg::Y2 => SortField::Y2,
        },
        direction: if args.desc {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        },
        search: args.search.clone().unwrap_or_default(),
        filter: match args.confidence {
            LevelArg::All => ConfidenceFilter::All,
            LevelArg::High => ConfidenceFilter::Only(ConfidenceLevel::High),
            LevelArg::Medium => ConfidenceFilter::Only(ConfidenceLevel::Medium),
            LevelArg::Low => ConfidenceFilter::Only(ConfidenceLevel::Low),
        },
    };
    let rows = query.apply(&response.detections);

    println!(
        "{:>6}  {:<14}  {:>10}  {:>6}  {:>6}  {:>6}  {:>6}",
        "ID", "Label", "Confidence", "X1", "Y1", "X2", "Y2"
    );
    println!("{}", "-".repeat(66));
    if rows.is_empty() {
        println!("{EMPTY_TABLE_MESSAGE}");
    }
    for row in &rows {
        let [x1, y1, x2, y2] = row.coords;
        println!(
            "{:>6}  {:<14}  {:>10}  {:>6}  {:>6}  {:>6}  {:>6}",
            row.id, row.label, row.confidence, x1, y1, x2, y2
        );
    }
    println!(
        "\n{} (sorted by {} {})",
        showing_label(rows.len(), response.detections.len()),
        query.sort_field,
        query.direction.arrow()
    );
    Ok(())
}
