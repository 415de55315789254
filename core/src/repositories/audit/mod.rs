//! Audit trail module.

mod r#trait;
pub use r#trait::AuditTrail;

mod noop;
pub use noop::NoOpAuditTrail;
