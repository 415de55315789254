//! # Infrastructure Layer
//!
//! Concrete collaborators for the credential core and the wiring that turns
//! an [`AppConfig`] into a running set of services.
//!
//! ## Contents
//!
//! - **Directory**: in-memory account directory keyed by email
//! - **Audit**: bounded in-memory audit log
//! - **Wiring**: [`initialize`] builds the stores, the lifecycle manager, the
//!   rate limiter and the sweeper, and starts the background sweep

use anyhow::Context;
use std::sync::Arc;
use tokio::task::JoinHandle;

use cl_core::services::{
    CredentialLifecycleManager, CredentialStores, LifecycleConfig, SlidingWindowLimiter, Sweep,
    TokenSweeper,
};
use cl_core::{Clock, SystemClock};
use cl_shared::{AppConfig, ConfigError};

// Re-export core types for convenience
pub use cl_core::errors::*;

/// Audit trail implementations
pub mod audit;

/// Account directory implementations
pub mod directory;

pub use audit::InMemoryAuditLog;
pub use directory::{AccountRecord, InMemoryAccountDirectory};

/// Lifecycle manager wired to the in-memory collaborators
pub type InMemoryLifecycleManager = CredentialLifecycleManager<InMemoryAccountDirectory, InMemoryAuditLog>;

/// Every service built from one configuration
pub struct CredentialServices {
    pub config: AppConfig,
    pub stores: CredentialStores,
    pub directory: Arc<InMemoryAccountDirectory>,
    pub audit_log: Arc<InMemoryAuditLog>,
    pub manager: Arc<InMemoryLifecycleManager>,
    pub limiter: Arc<SlidingWindowLimiter>,
    pub sweeper: Arc<TokenSweeper>,
    sweep_task: Option<JoinHandle<()>>,
}

impl CredentialServices {
    /// Build every service on the system clock without starting anything
    pub fn build(config: AppConfig) -> Self {
        Self::build_with_clock(config, Arc::new(SystemClock))
    }

    /// Build every service reading time from `clock`
    pub fn build_with_clock(config: AppConfig, clock: Arc<dyn Clock>) -> Self {
        let stores = CredentialStores::with_clock(clock.clone());
        let directory = Arc::new(InMemoryAccountDirectory::new());
        let audit_log = Arc::new(InMemoryAuditLog::new());

        let manager = CredentialLifecycleManager::new(
            stores.clone(),
            directory.clone(),
            LifecycleConfig::from(&config.credentials),
        )
        .with_audit(audit_log.clone());

        let limiter = Arc::new(SlidingWindowLimiter::from_config(&config.rate_limit, clock));

        let mut targets = stores.sweep_targets();
        targets.push(limiter.clone() as Arc<dyn Sweep>);
        let sweeper = Arc::new(TokenSweeper::new(targets, config.sweep.clone()));

        Self {
            config,
            stores,
            directory,
            audit_log,
            manager: Arc::new(manager),
            limiter,
            sweeper,
            sweep_task: None,
        }
    }

    /// Whether the background sweep task is running
    pub fn is_sweeping(&self) -> bool {
        self.sweep_task
            .as_ref()
            .is_some_and(|task| !task.is_finished())
    }

    /// Stop the background sweep task
    pub fn shutdown(&mut self) {
        if let Some(task) = self.sweep_task.take() {
            task.abort();
            tracing::info!("Background sweep stopped");
        }
    }
}

impl Drop for CredentialServices {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Build every service from `config` and start the background sweep
///
/// Must be called from within a tokio runtime.
pub async fn initialize(config: AppConfig) -> Result<CredentialServices, InfrastructureError> {
    tracing::info!(environment = %config.environment, "Initializing credential services...");

    if config.rate_limit.enabled && config.rate_limit.limit == 0 {
        return Err(InfrastructureError::Config(
            "rate_limit.limit must be greater than zero when rate limiting is enabled".to_string(),
        ));
    }

    let mut services = CredentialServices::build(config);
    services.sweep_task = services.sweeper.clone().start_background_task();

    tracing::info!(
        sweeping = services.is_sweeping(),
        "Credential services initialized successfully"
    );
    Ok(services)
}

/// Load layered configuration (preset, optional file, `CREDLIFE__`
/// variables) and [`initialize`] from it
pub async fn initialize_from_env() -> Result<CredentialServices, InfrastructureError> {
    let config = AppConfig::load(None)?;
    initialize(config).await
}

/// Load layered configuration from `path`, the environment preset and
/// `CREDLIFE__` variables
pub fn load_config(path: Option<&str>) -> anyhow::Result<AppConfig> {
    AppConfig::load(path).with_context(|| {
        format!(
            "failed to load configuration from {}",
            path.unwrap_or("the environment default file")
        )
    })
}

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Configuration could not be loaded
    #[error(transparent)]
    Load(#[from] ConfigError),

    /// Configuration loaded but is unusable
    #[error("Configuration error: {0}")]
    Config(String),
}
