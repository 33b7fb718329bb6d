use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScopeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Font error: {0}")]
    Font(#[from] ab_glyph::InvalidFont),

    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Invalid file type '{extension}'. Allowed extensions: {allowed}")]
    UnsupportedFileType { extension: String, allowed: String },

    #[error("File too large ({size} bytes). Maximum size: {max} bytes")]
    FileTooLarge { size: u64, max: u64 },

    #[error("Invalid API endpoint '{url}': {reason}")]
    InvalidEndpoint { url: String, reason: String },

    #[error("Cannot connect to backend server at {url}")]
    Unreachable { url: String },

    #[error("Backend returned {status}: {detail}")]
    Backend { status: u16, detail: String },

    #[error("Invalid backend response: {0}")]
    InvalidResponse(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Config serialization error: {0}")]
    ConfigWrite(#[from] toml::ser::Error),
}

pub type Result<T> = std::result::Result<T, ScopeError>;
