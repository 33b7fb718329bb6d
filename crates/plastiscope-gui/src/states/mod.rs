mod config;
mod ui;
mod viewer;

pub use config::{ConfigState, DEFAULT_CONFIG_FILE};
pub use ui::{Phase, UIState};
pub use viewer::ViewerState;
