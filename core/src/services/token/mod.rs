//! Token module: opaque token generation and the in-memory stores behind them
//!
//! This module handles:
//! - Cryptographically random opaque tokens and account ids
//! - The generic expiring token store and its four instantiations
//! - Background sweeping of expired records

mod cleanup;
mod generator;
mod store;


pub use cleanup::{Sweep, SweepResult, TokenSweeper};
pub use generator::{
    redact, SecureTokenGenerator, TokenGenerator, ACCOUNT_ID_BYTES, OPAQUE_TOKEN_BYTES,
};
pub use store::{
    EmailVerificationTokenStore, ExpiringTokenStore, PasswordResetTokenStore,
    RefreshTokenStore, SessionStore,
};
