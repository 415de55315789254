//! The four credential stores, built and owned together

use std::sync::Arc;

use crate::clock::{Clock, SystemClock};
use crate::services::token::{
    EmailVerificationTokenStore, PasswordResetTokenStore, RefreshTokenStore, SessionStore, Sweep,
};

/// Handles to every credential store, sharing one clock
///
/// Cloning is cheap and yields handles to the same stores.
#[derive(Clone)]
pub struct CredentialStores {
    pub sessions: Arc<SessionStore>,
    pub refresh_tokens: Arc<RefreshTokenStore>,
    pub password_resets: Arc<PasswordResetTokenStore>,
    pub email_verifications: Arc<EmailVerificationTokenStore>,
    clock: Arc<dyn Clock>,
}

impl CredentialStores {
    /// Empty stores reading the system clock
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Empty stores reading `clock`
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            sessions: Arc::new(SessionStore::with_clock("sessions", clock.clone())),
            refresh_tokens: Arc::new(RefreshTokenStore::with_clock("refresh_tokens", clock.clone())),
            password_resets: Arc::new(PasswordResetTokenStore::with_clock(
                "password_resets",
                clock.clone(),
            )),
            email_verifications: Arc::new(EmailVerificationTokenStore::with_clock(
                "email_verifications",
                clock.clone(),
            )),
            clock,
        }
    }

    pub fn clock(&self) -> Arc<dyn Clock> {
        self.clock.clone()
    }

    /// Every store as a sweep target
    pub fn sweep_targets(&self) -> Vec<Arc<dyn Sweep>> {
        vec![
            self.sessions.clone() as Arc<dyn Sweep>,
            self.refresh_tokens.clone(),
            self.password_resets.clone(),
            self.email_verifications.clone(),
        ]
    }
}

impl Default for CredentialStores {
    fn default() -> Self {
        Self::new()
    }
}
