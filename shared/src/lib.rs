//! Shared configuration and logging setup for the Credlife workspace
//!
//! This crate provides functionality used by both the core and infra crates:
//! - Configuration types, presets and loaders
//! - Environment detection
//! - Tracing subscriber initialization

pub mod config;
pub mod logging;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, ConfigError, CredentialConfig, Environment, LogFormat, LoggingConfig,
    RateLimitConfig, SweepConfig,
};
pub use logging::init_tracing;
