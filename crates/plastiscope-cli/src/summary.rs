use std::path::Path;

use console::Style;
use plastiscope_core::api::{Endpoint, HealthStatus};
use plastiscope_core::detection::{detection_count_label, PredictionResponse};
use plastiscope_core::stats::{ConfidenceBar, RangeShare, Statistics};

const BAR_WIDTH: usize = 30;

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    good: Style,
    bad: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            good: Style::new().green(),
            bad: Style::new().red().bold(),
            path: Style::new().underlined(),
        }
    }
}

fn rule(len: usize) -> String {
    "\u{2550}".repeat(len)
}

pub fn print_endpoint(endpoint: &Endpoint) {
    let s = Styles::new();
    println!(
        "  {:<14}{} {}",
        s.label.apply_to("Backend"),
        s.path.apply_to(&endpoint.base_url),
        s.label.apply_to(format!("({})", endpoint.source))
    );
}

pub fn print_prediction(file: &Path, response: &PredictionResponse, saved: &Path) {
    let s = Styles::new();
    let count = response.detections.len();
    let count_style = if count == 0 { &s.good } else { &s.value };

    println!();
    println!("  {}", s.header.apply_to(file.display()));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Size"),
        s.value.apply_to(format!("{}x{}", response.width, response.height))
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Result"),
        count_style.apply_to(detection_count_label(count))
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Saved"),
        s.path.apply_to(saved.display())
    );
}

pub fn print_failure(file: &Path, err: &anyhow::Error) {
    let s = Styles::new();
    println!();
    println!("  {}", s.header.apply_to(file.display()));
    println!("    {:<12}{}", s.label.apply_to("Error"), s.bad.apply_to(err));
}

pub fn print_statistics(stats: &Statistics, ranges: &[RangeShare], bars: &[ConfidenceBar]) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("Detection Statistics"));
    println!("  {}", s.title.apply_to(rule(20)));
    println!();

    println!(
        "  {:<16}{}",
        s.label.apply_to("Total"),
        s.value.apply_to(stats.total)
    );
    if stats.total == 0 {
        println!();
        println!("  {}", s.good.apply_to("No microplastics detected"));
        println!();
        return;
    }
    for (name, value) in [
        ("Avg Confidence", stats.average),
        ("Max Confidence", stats.max),
        ("Min Confidence", stats.min),
    ] {
        println!(
            "  {:<16}{}",
            s.label.apply_to(name),
            s.value.apply_to(format!("{:.1}%", value * 100.0))
        );
    }
    println!();

    println!("  {}", s.header.apply_to("Confidence Ranges"));
    for r in ranges {
        println!(
            "    {:<18}{:>4}  {}",
            s.label.apply_to(r.level),
            s.value.apply_to(r.count),
            s.label.apply_to(format!("{:.0}%", r.share * 100.0))
        );
    }
    println!();

    println!("  {}", s.header.apply_to("Confidence by Detection"));
    for bar in bars {
        let filled = ((bar.confidence / 100.0) * BAR_WIDTH as f64).round() as usize;
        println!(
            "    {:<6}{} {}",
            s.label.apply_to(&bar.id),
            s.good.apply_to("\u{2588}".repeat(filled.min(BAR_WIDTH))),
            s.value.apply_to(format!("{:.1}%", bar.confidence))
        );
    }
    println!();
}

pub fn print_health(health: &HealthStatus) {
    let s = Styles::new();
    let status_style = if health.is_healthy() { &s.good } else { &s.bad };

    println!(
        "  {:<14}{}",
        s.label.apply_to("Status"),
        status_style.apply_to(&health.status)
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Model"),
        if health.model_loaded {
            s.good.apply_to("loaded")
        } else {
            s.bad.apply_to("not loaded")
        }
    );
    if let Some(ref device) = health.device {
        println!("  {:<14}{}", s.label.apply_to("Device"), s.value.apply_to(device));
    }
    if let Some(ref note) = health.note {
        println!("  {:<14}{}", s.label.apply_to("Note"), s.label.apply_to(note));
    }
}
