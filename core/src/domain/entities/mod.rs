//! Domain entities representing credential records and their outcomes.

mod audit;
mod credential;
mod token;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use audit::{AuditEvent, AuditEventType};
pub use credential::{
    ClientInfo, EmailVerification, PasswordReset, RefreshGrant, Session, TokenPayload,
};
pub use token::{PasswordResetOutcome, TokenPair, PASSWORD_RESET_PUBLIC_MESSAGE, TOKEN_TYPE};
