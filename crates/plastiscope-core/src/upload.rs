//! Client-side admission checks for images before they are uploaded.
//!
//! The rules mirror what the inference backend enforces, so a bad file is
//! rejected locally with a precise message instead of a round trip.

use std::io::Cursor;
use std::path::Path;

use image::ImageReader;

use crate::consts::{ALLOWED_EXTENSIONS, MAX_IMAGE_DIMENSION, MAX_UPLOAD_BYTES};
use crate::error::{Result, ScopeError};
use crate::viewer::SourceSize;

/// A validated image ready to be sent to `/predict`.
#[derive(Clone, Debug)]
pub struct UploadFile {
    pub file_name: String,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
    pub size: SourceSize,
}

/// MIME type for an allowed extension.
pub fn mime_for_extension(extension: &str) -> Option<&'static str> {
    match extension.to_ascii_lowercase().as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "bmp" => Some("image/bmp"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}

/// Whether `path` looks like an image the backend accepts, by extension only.
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .and_then(mime_for_extension)
        .is_some()
}

/// Read and validate an image file from disk.
pub fn validate_upload(path: &Path) -> Result<UploadFile> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "upload".to_string());
    let size = std::fs::metadata(path)?.len();
    check_size(size)?;
    let bytes = std::fs::read(path)?;
    validate_bytes(&file_name, bytes)
}

/// Validate an in-memory upload (e.g. a dropped file).
pub fn validate_bytes(file_name: &str, bytes: Vec<u8>) -> Result<UploadFile> {
    let extension = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_string();
    let mime = mime_for_extension(&extension).ok_or_else(|| ScopeError::UnsupportedFileType {
        extension: extension.clone(),
        allowed: ALLOWED_EXTENSIONS.join(", "),
    })?;

    check_size(bytes.len() as u64)?;

    let (width, height) = ImageReader::new(Cursor::new(&bytes))
        .with_guessed_format()?
        .into_dimensions()?;
    if width == 0 || height == 0 || width > MAX_IMAGE_DIMENSION || height > MAX_IMAGE_DIMENSION {
        return Err(ScopeError::InvalidDimensions { width, height });
    }

    Ok(UploadFile {
        file_name: file_name.to_string(),
        mime,
        bytes,
        size: SourceSize::new(width, height),
    })
}

fn check_size(size: u64) -> Result<()> {
    if size > MAX_UPLOAD_BYTES {
        return Err(ScopeError::FileTooLarge {
            size,
            max: MAX_UPLOAD_BYTES,
        });
    }
    Ok(())
}
