use std::path::Path;

use plastiscope_core::config::AppConfig;
use tracing::{info, warn};

use crate::messages::WorkerCommand;

/// Loaded at startup when present in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "plastiscope.toml";

/// Editable settings behind the Settings window.
#[derive(Clone, Debug, Default)]
pub struct ConfigState {
    pub app: AppConfig,
    /// Backend URL typed in the Settings window; empty means "not set".
    pub api_url_override: String,
}

impl ConfigState {
    pub fn load_startup() -> Self {
        let path = Path::new(DEFAULT_CONFIG_FILE);
        if !path.exists() {
            return Self::default();
        }
        match AppConfig::load(path) {
            Ok(app) => {
                info!("Loaded {DEFAULT_CONFIG_FILE}");
                Self::from_app_config(app)
            }
            Err(e) => {
                warn!("Ignoring {DEFAULT_CONFIG_FILE}: {e}");
                Self::default()
            }
        }
    }

    pub fn from_app_config(app: AppConfig) -> Self {
        Self {
            app,
            api_url_override: String::new(),
        }
    }

    /// Snapshot for export; a typed override becomes the file's base URL.
    pub fn to_app_config(&self) -> AppConfig {
        let mut app = self.app.clone();
        let typed = self.api_url_override.trim();
        if !typed.is_empty() {
            app.api.base_url = Some(typed.to_string());
        }
        app
    }

    pub fn configure_command(&self) -> WorkerCommand {
        let typed = self.api_url_override.trim();
        WorkerCommand::Configure {
            api_url: (!typed.is_empty()).then(|| typed.to_string()),
            config: self.app.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_override_is_not_sent() {
        let state = ConfigState {
            api_url_override: "   ".into(),
            ..Default::default()
        };
        match state.configure_command() {
            WorkerCommand::Configure { api_url, .. } => assert!(api_url.is_none()),
            _ => panic!("expected Configure"),
        }
        assert!(state.to_app_config().api.base_url.is_none());
    }

    #[test]
    fn typed_override_is_exported() {
        let state = ConfigState {
            api_url_override: " http://lab:8000 ".into(),
            ..Default::default()
        };
        assert_eq!(
            state.to_app_config().api.base_url.as_deref(),
            Some("http://lab:8000")
        );
    }
}
