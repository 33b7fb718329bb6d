use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_RENDER_WIDTH, DEFAULT_TIMEOUT_SECS, THUMBNAIL_SIZE};
use crate::error::Result;

/// Application settings shared by the CLI and the GUI.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub viewer: ViewerConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Backend base URL; lower precedence than `--api-url` and the environment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewerConfig {
    /// Container width used when rendering without a window.
    #[serde(default = "default_render_width")]
    pub render_width: u32,
    /// Edge length of the minimized preview.
    #[serde(default = "default_thumbnail_size")]
    pub thumbnail_size: u32,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}
fn default_render_width() -> u32 {
    DEFAULT_RENDER_WIDTH
}
fn default_thumbnail_size() -> u32 {
    THUMBNAIL_SIZE
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            render_width: DEFAULT_RENDER_WIDTH,
            thumbnail_size: THUMBNAIL_SIZE,
        }
    }
}

impl AppConfig {
    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    /// Load `path` when given, defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}
