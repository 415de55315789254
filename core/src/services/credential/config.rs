//! Configuration for the credential lifecycle manager

use chrono::Duration;

use cl_shared::CredentialConfig;

/// Token lifetimes and collaborator bounds used by the lifecycle manager
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LifecycleConfig {
    pub session_ttl: Duration,
    pub refresh_ttl: Duration,
    pub password_reset_ttl: Duration,
    pub email_verification_ttl: Duration,
    /// Value returned as `expires_in` on every token pair
    pub advertised_expires_in: i64,
    /// Upper bound for a single account directory call
    pub directory_timeout: std::time::Duration,
    /// Revoke all sessions and refresh tokens after a completed reset
    pub revoke_sessions_on_password_reset: bool,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self::from(&CredentialConfig::default())
    }
}

impl From<&CredentialConfig> for LifecycleConfig {
    fn from(config: &CredentialConfig) -> Self {
        Self {
            session_ttl: seconds(config.session_ttl_seconds),
            refresh_ttl: seconds(config.refresh_ttl_seconds),
            password_reset_ttl: seconds(config.password_reset_ttl_seconds),
            email_verification_ttl: seconds(config.email_verification_ttl_seconds),
            advertised_expires_in: config.advertised_expires_in,
            directory_timeout: std::time::Duration::from_millis(config.directory_timeout_ms),
            revoke_sessions_on_password_reset: config.revoke_sessions_on_password_reset,
        }
    }
}

/// Whole seconds to a chrono duration, clamped to what chrono can represent
fn seconds(value: u64) -> Duration {
    Duration::seconds(value.min(i64::MAX as u64 / 1000) as i64)
}
