//! Error types for credential and token operations
//!
//! Messages are deliberately generic: a missing token and an expired token
//! render identically so that callers cannot leak which one occurred.

use thiserror::Error;

/// Failures of the credential lifecycle protocols
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CredentialError {
    /// Token absent, already consumed, revoked or past its expiry
    #[error("Invalid or expired token")]
    NotFoundOrExpired,

    /// Sliding window admission denied the request
    #[error("Rate limit exceeded, retry after {retry_after_seconds} seconds")]
    RateLimited { retry_after_seconds: u64 },

    /// The account directory failed or did not answer in time. Any
    /// single-use token consumed by the operation stays consumed.
    #[error("Account directory failure: {message}")]
    UpstreamDirectoryFailure { message: String },
}

/// Token generation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// The operating system random source could not be read. Treated as a
    /// fatal environment error for the operation that needed the token.
    #[error("Secure random source unavailable: {message}")]
    EntropyUnavailable { message: String },
}
