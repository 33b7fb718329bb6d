//! HTTP client for the inference backend.

pub mod client;
pub mod endpoint;

pub use client::{HealthStatus, InferenceClient};
pub use endpoint::{resolve_base_url, resolve_from_env, Endpoint, EndpointSource};
