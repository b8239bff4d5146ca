//! Configuration for a run.

use std::time::Duration;

/// Default pause applied before each accepted action.
pub const DEFAULT_PACING: Duration = Duration::from_millis(650);

/// Configuration for a single run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Dice seed. `None` draws one from OS entropy.
    pub seed: Option<u64>,
    /// Pause applied by the shared handle before each action.
    pub pacing: Duration,
    /// How many journal entries to keep.
    pub log_limit: usize,
    /// How many recent rolls the dice tray remembers.
    pub dice_tray_limit: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seed: None,
            pacing: DEFAULT_PACING,
            log_limit: 50,
            dice_tray_limit: 1,
        }
    }
}

impl RunConfig {
    /// Set the dice seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the action pacing.
    pub fn with_pacing(mut self, pacing: Duration) -> Self {
        self.pacing = pacing;
        self
    }

    /// Disable pacing entirely.
    pub fn without_pacing(self) -> Self {
        self.with_pacing(Duration::ZERO)
    }

    /// Set the journal size (at least 1).
    pub fn with_log_limit(mut self, limit: usize) -> Self {
        self.log_limit = limit.max(1);
        self
    }

    /// Set how many rolls the dice tray keeps (at least 1).
    pub fn with_dice_tray_limit(mut self, limit: usize) -> Self {
        self.dice_tray_limit = limit.max(1);
        self
    }
}
