use plastiscope_core::api::HealthStatus;

/// What the main area is showing.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Phase {
    /// Upload zone, waiting for an image.
    #[default]
    Idle,
    /// Upload sent, waiting for `/predict`.
    Analyzing { file_name: String },
    /// A result is loaded into the viewer.
    Results,
}

/// Overall UI state.
#[derive(Default)]
pub struct UIState {
    pub phase: Phase,
    /// Last analysis error, shown above the upload zone until the next attempt.
    pub error: Option<String>,
    pub health: Option<HealthStatus>,
    pub log_messages: Vec<String>,
    pub show_about: bool,
    pub show_settings: bool,
    /// Pointer is dragging files over the window.
    pub files_hovering: bool,
}

impl UIState {
    pub fn is_busy(&self) -> bool {
        matches!(self.phase, Phase::Analyzing { .. })
    }

    pub fn add_log(&mut self, msg: String) {
        self.log_messages.push(msg);
    }

    pub fn start_analysis(&mut self, file_name: String) {
        self.error = None;
        self.phase = Phase::Analyzing { file_name };
    }

    pub fn fail_analysis(&mut self, message: String) {
        self.add_log(format!("ERROR: {message}"));
        self.error = Some(message);
        self.phase = Phase::Idle;
    }
}
