//! Configuration module with one sub-module per concern
//!
//! - `credentials` - token lifetimes and account directory bounds
//! - `environment` - environment detection and logging presets
//! - `rate_limit` - sliding window admission control
//! - `sweep` - periodic purge of expired records

pub mod credentials;
pub mod environment;
pub mod rate_limit;
pub mod sweep;

use serde::{Deserialize, Serialize};

pub use credentials::CredentialConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use rate_limit::RateLimitConfig;
pub use sweep::SweepConfig;

/// Prefix for environment variable overrides, e.g.
/// `CREDLIFE__RATE_LIMIT__LIMIT=20`
pub const ENV_PREFIX: &str = "CREDLIFE";

/// Errors raised while assembling the configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] ::config::ConfigError),
}

/// Complete configuration combining all sub-configurations
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub environment: Environment,

    #[serde(default)]
    pub credentials: CredentialConfig,

    #[serde(default)]
    pub rate_limit: RateLimitConfig,

    #[serde(default)]
    pub sweep: SweepConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            credentials: CredentialConfig::default(),
            rate_limit: RateLimitConfig::default(),
            sweep: SweepConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Create configuration for development environment
    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            credentials: CredentialConfig::default(),
            rate_limit: RateLimitConfig::development(),
            sweep: SweepConfig::default(),
            logging: LoggingConfig::for_environment(Environment::Development),
        }
    }

    /// Create configuration for production environment
    pub fn production() -> Self {
        Self {
            environment: Environment::Production,
            credentials: CredentialConfig::default(),
            rate_limit: RateLimitConfig::production(),
            sweep: SweepConfig {
                interval_seconds: 60,
                ..Default::default()
            },
            logging: LoggingConfig::for_environment(Environment::Production),
        }
    }

    /// Preset for the given environment
    pub fn for_environment(env: Environment) -> Self {
        match env {
            Environment::Development => Self::development(),
            Environment::Production => Self::production(),
            Environment::Staging => {
                let mut config = Self::production();
                config.environment = Environment::Staging;
                config.logging = LoggingConfig::for_environment(Environment::Staging);
                config
            }
        }
    }

    /// Load the preset for the environment named in the process environment
    /// (after reading a `.env` file if present)
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::for_environment(Environment::from_env())
    }

    /// Load configuration in layers: environment preset, then the optional
    /// TOML file at `path` (or the environment's default file name), then
    /// `CREDLIFE__`-prefixed environment variables.
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        let env = Environment::from_env();
        Self::load_for(env, path)
    }

    /// Same as [`AppConfig::load`] with an explicit environment
    pub fn load_for(env: Environment, path: Option<&str>) -> Result<Self, ConfigError> {
        let preset = Self::for_environment(env);
        let path = path.unwrap_or_else(|| env.config_file());

        let config: Self = ::config::Config::builder()
            .add_source(::config::Config::try_from(&preset)?)
            .add_source(::config::File::with_name(path).required(false))
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }
}
