//! Background sweep configuration

use serde::{Deserialize, Serialize};

/// Configuration of the periodic expired-record sweep
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SweepConfig {
    /// Whether to run the background sweep at all
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// How often to run the sweep (in seconds)
    #[serde(default = "default_interval_seconds")]
    pub interval_seconds: u64,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            interval_seconds: default_interval_seconds(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_interval_seconds() -> u64 {
    300 // every 5 minutes
}
