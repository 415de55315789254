//! # Credlife Core
//!
//! Credential lifecycle and rate limiting for an identity service. All state
//! is held in memory: concurrent, time-bounded token stores, a sliding window
//! admission controller and the protocols built on top of them (login,
//! refresh rotation, logout, password reset and email verification).
//!
//! Collaborators outside this crate (account directory, audit trail) are
//! reached through the traits in [`repositories`].

pub mod clock;
pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use clock::{Clock, ManualClock, SystemClock};
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
