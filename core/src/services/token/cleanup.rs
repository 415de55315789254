//! Periodic sweep of expired credentials and idle rate-limit keys
//!
//! Lazy expiry keeps expired records invisible but not gone: a token that is
//! issued and never presented again stays in memory until something removes
//! it. The sweeper walks every registered target on an interval and reaps
//! them.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use cl_shared::SweepConfig;

/// Something holding state that can expire
#[async_trait]
pub trait Sweep: Send + Sync {
    /// Name reported in sweep results
    fn name(&self) -> &str;

    /// Remove everything that has expired. Returns the number of entries removed.
    async fn sweep(&self) -> usize;
}

/// Service running [`Sweep`] over a fixed set of targets
pub struct TokenSweeper {
    targets: Vec<Arc<dyn Sweep>>,
    config: SweepConfig,
}

impl TokenSweeper {
    pub fn new(targets: Vec<Arc<dyn Sweep>>, config: SweepConfig) -> Self {
        Self { targets, config }
    }

    /// Run a single sweep cycle over every target
    ///
    /// Runs even when the background task is disabled, so callers can drive
    /// sweeping themselves.
    pub async fn run_sweep(&self) -> SweepResult {
        let mut result = SweepResult::default();

        for target in &self.targets {
            let removed = target.sweep().await;
            if removed > 0 {
                debug!(target = target.name(), removed, "swept expired entries");
            }
            result.removed.push((target.name().to_string(), removed));
        }

        if result.total_removed() > 0 {
            info!(
                "Sweep completed - removed {} entries across {} targets",
                result.total_removed(),
                self.targets.len()
            );
        }

        result
    }

    /// Start the sweeper as a background task
    ///
    /// Returns `None` without spawning when the sweep is disabled.
    pub fn start_background_task(self: Arc<Self>) -> Option<JoinHandle<()>> {
        if !self.config.enabled {
            warn!("Token sweep is disabled");
            return None;
        }

        let period = std::time::Duration::from_secs(self.config.interval_seconds.max(1));

        let handle = tokio::spawn(async move {
            info!(
                "Token sweeper started - will run every {} seconds",
                period.as_secs()
            );

            let mut interval_timer = tokio::time::interval(period);
            // The first tick completes immediately; skip it so the first sweep
            // happens one period after start.
            interval_timer.tick().await;

            loop {
                interval_timer.tick().await;
                self.run_sweep().await;
            }
        });

        Some(handle)
    }
}

/// Result of one sweep cycle
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SweepResult {
    /// `(target name, entries removed)` in registration order
    pub removed: Vec<(String, usize)>,
}

impl SweepResult {
    /// Total number of entries removed across all targets
    pub fn total_removed(&self) -> usize {
        self.removed.iter().map(|(_, count)| count).sum()
    }

    /// Entries removed from the named target, if it was swept
    pub fn removed_from(&self, name: &str) -> Option<usize> {
        self.removed
            .iter()
            .find(|(target, _)| target == name)
            .map(|(_, count)| *count)
    }
}
