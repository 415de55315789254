//! Collaborator interfaces the credential lifecycle calls into.

pub mod account;
pub mod audit;

pub use account::AccountDirectory;
pub use audit::{AuditTrail, NoOpAuditTrail};

#[cfg(test)]
pub use account::MockAccountDirectory;
