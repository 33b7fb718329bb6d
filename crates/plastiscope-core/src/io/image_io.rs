use std::path::Path;
use std::sync::Arc;

use image::{ImageFormat, ImageReader, RgbaImage};

use crate::error::Result;
use crate::viewer::SourceSize;

/// Decode an image file into RGBA8.
pub fn load_rgba(path: &Path) -> Result<RgbaImage> {
    let img = image::open(path)?;
    Ok(img.to_rgba8())
}

/// Decode an in-memory image (e.g. the bytes that were uploaded).
pub fn decode_rgba(bytes: &[u8]) -> Result<Arc<RgbaImage>> {
    let img = image::load_from_memory(bytes)?;
    Ok(Arc::new(img.to_rgba8()))
}

/// Read only the header to get the intrinsic size.
pub fn probe_size(path: &Path) -> Result<SourceSize> {
    let (width, height) = ImageReader::open(path)?
        .with_guessed_format()?
        .into_dimensions()?;
    Ok(SourceSize::new(width, height))
}

/// Save as 8-bit RGBA PNG.
pub fn save_png(image: &RgbaImage, path: &Path) -> Result<()> {
    image.save_with_format(path, ImageFormat::Png)?;
    Ok(())
}
