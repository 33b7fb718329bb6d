pub mod annotate;
pub mod config;
pub mod health;
pub mod info;
pub mod predict;
pub mod report;
pub mod stats;
pub mod table;

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use plastiscope_core::api::{resolve_from_env, InferenceClient};
use plastiscope_core::config::AppConfig;

/// Client for the backend picked by `--api-url`, the environment or the config.
pub fn connect(api_url: Option<&str>, config: &AppConfig) -> Result<InferenceClient> {
    let endpoint = resolve_from_env(api_url, config.api.base_url.as_deref())
        .context("Invalid backend URL")?;
    let client = InferenceClient::new(endpoint, Duration::from_secs(config.api.timeout_secs))?;
    Ok(client)
}

/// `dir/<stem><suffix>`, with `dir` defaulting to the input's directory.
pub fn sibling_path(input: &Path, dir: Option<&Path>, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "image".to_string());
    let dir = dir
        .map(Path::to_path_buf)
        .or_else(|| input.parent().map(Path::to_path_buf))
        .unwrap_or_default();
    dir.join(format!("{stem}{suffix}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sibling_path_defaults_to_input_dir() {
        let p = sibling_path(Path::new("data/slide_01.jpg"), None, ".json");
        assert_eq!(p, PathBuf::from("data/slide_01.json"));
    }

    #[test]
    fn sibling_path_uses_output_dir() {
        let p = sibling_path(Path::new("data/slide_01.jpg"), Some(Path::new("out")), "_annotated.png");
        assert_eq!(p, PathBuf::from("out/slide_01_annotated.png"));
    }
}
