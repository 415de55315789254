//! Audit trail trait defining where lifecycle events are recorded.

use async_trait::async_trait;

use crate::domain::entities::AuditEvent;
use crate::errors::DomainError;

/// Sink for credential lifecycle audit events
///
/// Persistence is up to the implementation. Failures are reported back but
/// the lifecycle manager only logs them; auditing never blocks a protocol.
#[async_trait]
pub trait AuditTrail: Send + Sync {
    /// Record one event
    async fn record(&self, event: &AuditEvent) -> Result<(), DomainError>;

    /// Most recent events for a subject, newest first, at most `limit`
    async fn find_by_subject(
        &self,
        subject_id: &str,
        limit: usize,
    ) -> Result<Vec<AuditEvent>, DomainError>;
}
