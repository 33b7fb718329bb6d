use std::fmt;

use reqwest::Url;
use tracing::debug;

use crate::consts::{API_URL_ENV_VAR, DEFAULT_API_BASE_URL};
use crate::error::{Result, ScopeError};

/// Where the backend base URL came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EndpointSource {
    Override,
    Environment,
    ConfigFile,
    Default,
}

impl fmt::Display for EndpointSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Override => write!(f, "command line"),
            Self::Environment => write!(f, "{API_URL_ENV_VAR}"),
            Self::ConfigFile => write!(f, "config file"),
            Self::Default => write!(f, "default"),
        }
    }
}

/// A validated backend base URL without trailing slash.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoint {
    pub base_url: String,
    pub source: EndpointSource,
}

impl Endpoint {
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

/// Pick the backend base URL. First non-empty wins:
/// explicit override, `PLASTISCOPE_API_URL`, config file, built-in default.
pub fn resolve_base_url(
    explicit: Option<&str>,
    environment: Option<&str>,
    config: Option<&str>,
) -> Result<Endpoint> {
    let candidates = [
        (explicit, EndpointSource::Override),
        (environment, EndpointSource::Environment),
        (config, EndpointSource::ConfigFile),
        (Some(DEFAULT_API_BASE_URL), EndpointSource::Default),
    ];

    let (raw, source) = candidates
        .into_iter()
        .find_map(|(value, source)| {
            value
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(|v| (v, source))
        })
        .unwrap_or((DEFAULT_API_BASE_URL, EndpointSource::Default));

    let base_url = normalize(raw)?;
    debug!("Backend endpoint {base_url} (from {source})");
    Ok(Endpoint { base_url, source })
}

/// Same as [`resolve_base_url`], reading the environment variable itself.
pub fn resolve_from_env(explicit: Option<&str>, config: Option<&str>) -> Result<Endpoint> {
    let env = std::env::var(API_URL_ENV_VAR).ok();
    resolve_base_url(explicit, env.as_deref(), config)
}

fn normalize(raw: &str) -> Result<String> {
    let parsed = Url::parse(raw).map_err(|e| ScopeError::InvalidEndpoint {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ScopeError::InvalidEndpoint {
            url: raw.to_string(),
            reason: format!("unsupported scheme '{}'", parsed.scheme()),
        });
    }
    Ok(raw.trim_end_matches('/').to_string())
}
