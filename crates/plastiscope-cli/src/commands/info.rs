use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use plastiscope_core::io::image_io::probe_size;
use plastiscope_core::upload::{mime_for_extension, validate_upload};

#[derive(Args)]
pub struct InfoArgs {
    /// Input image file
    pub file: PathBuf,
}

pub fn run(args: &InfoArgs) -> Result<()> {
    let size = probe_size(&args.file)?;
    let bytes = std::fs::metadata(&args.file)?.len();
    let mime = args
        .file
        .extension()
        .and_then(|e| e.to_str())
        .and_then(mime_for_extension)
        .unwrap_or("unsupported");

    println!("File:        {}", args.file.display());
    println!("Dimensions:  {}x{}", size.width, size.height);
    println!("Type:        {mime}");
    println!("File size:   {:.2} MB", bytes as f64 / (1024.0 * 1024.0));

    match validate_upload(&args.file) {
        Ok(_) => println!("Upload:      ok"),
        Err(e) => println!("Upload:      rejected ({e})"),
    }

    Ok(())
}
