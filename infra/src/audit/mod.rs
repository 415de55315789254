//! Audit trail implementations

mod memory;


pub use memory::{InMemoryAuditLog, DEFAULT_AUDIT_CAPACITY};
