//! Business services containing the credential lifecycle logic.

pub mod credential;
pub mod rate_limit;
pub mod token;

// Re-export commonly used types
pub use credential::{CredentialLifecycleManager, CredentialStores, LifecycleConfig};
pub use rate_limit::{RateLimitStatus, SlidingWindowLimiter};
pub use token::{
    EmailVerificationTokenStore, ExpiringTokenStore, PasswordResetTokenStore,
    RefreshTokenStore, SecureTokenGenerator, SessionStore, Sweep, SweepResult,
    TokenGenerator, TokenSweeper,
};
