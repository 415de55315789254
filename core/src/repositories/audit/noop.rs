//! No-op implementation of AuditTrail for when auditing is not needed

use async_trait::async_trait;

use crate::domain::entities::AuditEvent;
use crate::errors::DomainError;

use super::AuditTrail;

/// Audit trail that discards every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpAuditTrail;

impl NoOpAuditTrail {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl AuditTrail for NoOpAuditTrail {
    async fn record(&self, _event: &AuditEvent) -> Result<(), DomainError> {
        Ok(())
    }

    async fn find_by_subject(
        &self,
        _subject_id: &str,
        _limit: usize,
    ) -> Result<Vec<AuditEvent>, DomainError> {
        Ok(Vec::new())
    }
}
