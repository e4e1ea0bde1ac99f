use std::time::Duration;

use colored::Colorize;
use indicatif::{ProgressBar, ProgressDrawTarget};

use crate::record::Prediction;
use crate::theme::Palette;

/// Generation stamp handed out when a request starts. A response may only
/// land while its token is still the latest one issued.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RequestToken {
    generation: u64,
}

impl RequestToken {
    pub fn generation(self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Default)]
pub struct RequestTracker {
    generation: u64,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self) -> RequestToken {
        self.generation += 1;
        RequestToken {
            generation: self.generation,
        }
    }

    pub fn accepts(&self, token: RequestToken) -> bool {
        token.generation == self.generation
    }
}

/// Per-operation lifecycle: Idle → Pending → {Loaded, Failed}. Terminal
/// states are rendered as status lines; there is no retry and no queue.
#[derive(Clone, Debug, PartialEq)]
pub enum FlowState<T> {
    Idle,
    Pending { generation: u64 },
    Loaded(T),
    Failed(String),
}

#[derive(Debug)]
pub struct Flow<T> {
    state: FlowState<T>,
    tracker: RequestTracker,
}

impl<T> Default for Flow<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Flow<T> {
    pub fn new() -> Self {
        Self {
            state: FlowState::Idle,
            tracker: RequestTracker::new(),
        }
    }

    pub fn state(&self) -> &FlowState<T> {
        &self.state
    }

    pub fn loaded(&self) -> Option<&T> {
        match &self.state {
            FlowState::Loaded(value) => Some(value),
            _ => None,
        }
    }

    /// Enters Pending under a fresh generation, superseding any request
    /// still in flight.
    pub fn start(&mut self) -> RequestToken {
        let token = self.tracker.begin();
        self.state = FlowState::Pending {
            generation: token.generation(),
        };
        token
    }

    /// Applies a terminal outcome. Returns false and leaves the state
    /// untouched when the token has been superseded.
    pub fn resolve(&mut self, token: RequestToken, outcome: Result<T, String>) -> bool {
        if !self.tracker.accepts(token) {
            return false;
        }
        self.state = match outcome {
            Ok(value) => FlowState::Loaded(value),
            Err(message) => FlowState::Failed(message),
        };
        true
    }
}

/// Status rendering for the three flows. Carries the palette explicitly so
/// callers decide the settings once and every line comes out consistent.
#[derive(Clone, Copy, Debug)]
pub struct StatusPanel {
    pub palette: Palette,
}

impl StatusPanel {
    pub fn new(palette: Palette) -> Self {
        Self { palette }
    }

    pub fn success_line(&self, message: &str) -> String {
        format!("{} {}", "✔".green().bold(), message.bold().white())
    }

    pub fn info_line(&self, message: &str) -> String {
        format!("{} {}", "•".cyan().bold(), message.bold().white())
    }

    pub fn error_line(&self, message: &str) -> String {
        format!("{} {}", "✖".red().bold(), message.bold().red())
    }

    pub fn prediction_line(&self, prediction: Prediction) -> String {
        let message = format!("Prediction: {}", prediction.label());
        match prediction {
            Prediction::Malignant => format!("{} {}", "⚠".red().bold(), message.bold().red()),
            Prediction::Benign => format!("{} {}", "✔".green().bold(), message.bold().green()),
            Prediction::Unknown => format!("{} {}", "•".cyan().bold(), message.bold().white()),
        }
    }

    pub fn print_success(&self, message: &str) {
        println!("{}", self.success_line(message));
    }

    pub fn print_info(&self, message: &str) {
        println!("{}", self.info_line(message));
    }

    pub fn print_error(&self, message: &str) {
        println!("{}", self.error_line(message));
    }

    pub fn print_prediction(&self, prediction: Prediction) {
        println!("{}", self.prediction_line(prediction));
    }

    /// Spinner shown while a flow sits in Pending.
    pub fn spinner(&self, message: &str) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        pb.set_draw_target(ProgressDrawTarget::stderr());
        pb.enable_steady_tick(Duration::from_millis(120));
        pb.set_message(message.to_string());
        pb
    }
}
