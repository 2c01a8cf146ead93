use crate::config::constants::progress;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Synthetic loading-progress settings
///
/// The curve is cosmetic: each fragment moves the value `damping` of the way
/// toward `ceiling`, and only completion reaches 100.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProgressConfig {
    #[serde(default = "default_ceiling")]
    pub ceiling: f64,

    #[serde(default = "default_damping")]
    pub damping: f64,

    /// Value shown as soon as the stream starts
    #[serde(default = "default_initial_bump")]
    pub initial_bump: f64,

    /// Fragments received before the status message rotates
    #[serde(default = "default_fragments_per_message")]
    pub fragments_per_message: usize,

    /// Delay before the loading indicator is cleared after completion
    #[serde(default = "default_clear_delay_ms")]
    pub clear_delay_ms: u64,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            ceiling: default_ceiling(),
            damping: default_damping(),
            initial_bump: default_initial_bump(),
            fragments_per_message: default_fragments_per_message(),
            clear_delay_ms: default_clear_delay_ms(),
        }
    }
}

impl ProgressConfig {
    pub fn clear_delay(&self) -> Duration {
        Duration::from_millis(self.clear_delay_ms)
    }

    /// Clamp user-provided values into a range the progress curve can use
    pub fn sanitized(mut self) -> Self {
        if !(self.ceiling > 0.0 && self.ceiling < progress::COMPLETE) {
            tracing::warn!(ceiling = self.ceiling, "progress ceiling out of range, using default");
            self.ceiling = default_ceiling();
        }
        if !(self.damping > 0.0 && self.damping <= 1.0) {
            tracing::warn!(damping = self.damping, "progress damping out of range, using default");
            self.damping = default_damping();
        }
        self.initial_bump = self.initial_bump.clamp(0.0, self.ceiling);
        self.fragments_per_message = self.fragments_per_message.max(1);
        self
    }
}

fn default_ceiling() -> f64 {
    progress::CEILING
}
fn default_damping() -> f64 {
    progress::DAMPING
}
fn default_initial_bump() -> f64 {
    progress::INITIAL_BUMP
}
fn default_fragments_per_message() -> usize {
    progress::FRAGMENTS_PER_MESSAGE
}
fn default_clear_delay_ms() -> u64 {
    progress::CLEAR_DELAY_MS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_ceiling_falls_back_to_default() {
        let config = ProgressConfig {
            ceiling: 0.0,
            ..ProgressConfig::default()
        }
        .sanitized();
        assert_eq!(config.ceiling, progress::CEILING);
        assert_eq!(config.initial_bump, progress::INITIAL_BUMP);
    }

    #[test]
    fn in_range_values_are_kept() {
        let config = ProgressConfig {
            ceiling: 80.0,
            damping: 0.2,
            initial_bump: 90.0,
            ..ProgressConfig::default()
        }
        .sanitized();
        assert_eq!(config.ceiling, 80.0);
        assert_eq!(config.damping, 0.2);
        assert_eq!(config.initial_bump, 80.0);
    }
}
