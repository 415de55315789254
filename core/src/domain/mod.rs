//! Domain layer containing credential records, token pairs and audit events.

pub mod entities;

// Re-export commonly used domain types
pub use entities::*;
