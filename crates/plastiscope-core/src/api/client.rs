use std::time::Duration;

use reqwest::blocking::multipart::{Form, Part};
use reqwest::blocking::{Client, Response};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::detection::PredictionResponse;
use crate::error::{Result, ScopeError};
use crate::upload::UploadFile;

use super::endpoint::Endpoint;

const GENERIC_FAILURE: &str = "Failed to analyze image.";

/// Body of `GET /health`. Unknown fields are ignored, missing ones defaulted.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub model_loaded: bool,
    #[serde(default)]
    pub device: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: Option<serde_json::Value>,
}

/// Blocking client; callers run it on a worker thread.
#[derive(Clone, Debug)]
pub struct InferenceClient {
    endpoint: Endpoint,
    http: Client,
}

impl InferenceClient {
    pub fn new(endpoint: Endpoint, timeout: Duration) -> Result<Self> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { endpoint, http })
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// `POST /predict` with the image as multipart field `file`.
    pub fn predict(&self, upload: &UploadFile) -> Result<PredictionResponse> {
        let url = self.endpoint.url("predict");
        debug!("Uploading {} ({} bytes) to {url}", upload.file_name, upload.bytes.len());

        let part = Part::bytes(upload.bytes.clone())
            .file_name(upload.file_name.clone())
            .mime_str(upload.mime)?;
        let form = Form::new().part("file", part);

        let response = self
            .http
            .post(&url)
            .multipart(form)
            .send()
            .map_err(|e| self.map_send_error(e))?;
        let response = check_status(response)?;
        let result: PredictionResponse = decode(response)?;

        info!(
            "{}: {}x{}, {} detections",
            upload.file_name,
            result.width,
            result.height,
            result.detections.len()
        );
        Ok(result)
    }

    /// `GET /health`.
    pub fn health(&self) -> Result<HealthStatus> {
        let url = self.endpoint.url("health");
        let response = self
            .http
            .get(&url)
            .send()
            .map_err(|e| self.map_send_error(e))?;
        decode(check_status(response)?)
    }

    fn map_send_error(&self, err: reqwest::Error) -> ScopeError {
        if err.is_connect() || err.is_timeout() {
            ScopeError::Unreachable {
                url: self.endpoint.base_url.clone(),
            }
        } else {
            ScopeError::Http(err)
        }
    }
}

fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().unwrap_or_default();
    Err(ScopeError::Backend {
        status: status.as_u16(),
        detail: error_detail(&body),
    })
}

fn decode<T: serde::de::DeserializeOwned>(response: Response) -> Result<T> {
    let body = response.text()?;
    serde_json::from_str(&body).map_err(|e| ScopeError::InvalidResponse(e.to_string()))
}

/// The backend's `detail` message, or a generic one.
pub fn error_detail(body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody {
            detail: Some(serde_json::Value::String(s)),
        }) if !s.is_empty() => s,
        Ok(ErrorBody {
            detail: Some(other),
        }) if !other.is_null() => other.to_string(),
        _ => GENERIC_FAILURE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_string_is_used() {
        assert_eq!(
            error_detail(r#"{"detail": "File too large. Maximum size: 10.0MB"}"#),
            "File too large. Maximum size: 10.0MB"
        );
    }

    #[test]
    fn structured_detail_is_stringified() {
        let d = error_detail(r#"{"detail": [{"loc": ["body", "file"]}]}"#);
        assert!(d.contains("loc"), "got: {d}");
    }

    #[test]
    fn missing_detail_falls_back() {
        assert_eq!(error_detail("<html>oops</html>"), GENERIC_FAILURE);
        assert_eq!(error_detail("{}"), GENERIC_FAILURE);
    }
}
