use crate::config::ProgressConfig;
use crate::config::constants::progress::{COMPLETE, SPINNER_COLORS, STATUS_MESSAGES};

/// Synthetic loading progress driven by fragment arrivals
#[derive(Debug, Clone)]
pub struct ProgressTracker {
    config: ProgressConfig,
    value: f64,
    fragments: usize,
}

impl ProgressTracker {
    pub fn new(config: ProgressConfig) -> Self {
        Self {
            config,
            value: 0.0,
            fragments: 0,
        }
    }

    pub fn config(&self) -> &ProgressConfig {
        &self.config
    }

    pub fn reset(&mut self) {
        self.value = 0.0;
        self.fragments = 0;
    }

    /// Immediate feedback once the stream is accepted
    pub fn start(&mut self) {
        self.value = self.value.max(self.config.initial_bump);
    }

    /// Move a damped step toward the ceiling; never reaches it exactly
    pub fn on_fragment(&mut self) {
        let ceiling = self.config.ceiling;
        self.value = (self.value + (ceiling - self.value) * self.config.damping).min(ceiling);
        self.fragments += 1;
    }

    pub fn complete(&mut self) {
        self.value = COMPLETE;
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn fragments(&self) -> usize {
        self.fragments
    }

    /// Index into the status messages, advancing every N fragments
    pub fn message_index(&self) -> usize {
        let step = self.fragments / self.config.fragments_per_message.max(1);
        step.min(STATUS_MESSAGES.len() - 1)
    }

    pub fn status_message(&self) -> &'static str {
        STATUS_MESSAGES[self.message_index()]
    }

    pub fn spinner_color(&self) -> &'static str {
        SPINNER_COLORS[self.message_index() % SPINNER_COLORS.len()]
    }
}

impl Default for ProgressTracker {
    fn default() -> Self {
        Self::new(ProgressConfig::default())
    }
}
