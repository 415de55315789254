//! Bounded in-memory audit log

use async_trait::async_trait;
use std::collections::VecDeque;
use tokio::sync::RwLock;

use cl_core::domain::AuditEvent;
use cl_core::errors::DomainError;
use cl_core::repositories::AuditTrail;

/// Number of events kept when no capacity is given
pub const DEFAULT_AUDIT_CAPACITY: usize = 1000;

/// Audit trail keeping the most recent events in memory
///
/// Once full, every new event evicts the oldest one.
pub struct InMemoryAuditLog {
    events: RwLock<VecDeque<AuditEvent>>,
    capacity: usize,
}

impl InMemoryAuditLog {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_AUDIT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            events: RwLock::new(VecDeque::with_capacity(capacity.min(DEFAULT_AUDIT_CAPACITY))),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub async fn len(&self) -> usize {
        self.events.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.events.read().await.is_empty()
    }

    /// Most recent events of any subject, newest first
    pub async fn recent(&self, limit: usize) -> Vec<AuditEvent> {
        self.events
            .read()
            .await
            .iter()
            .rev()
            .take(limit)
            .cloned()
            .collect()
    }
}

impl Default for InMemoryAuditLog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuditTrail for InMemoryAuditLog {
    async fn record(&self, event: &AuditEvent) -> Result<(), DomainError> {
        if self.capacity == 0 {
            return Ok(());
        }

        let mut events = self.events.write().await;
        while events.len() >= self.capacity {
            events.pop_front();
        }
        events.push_back(event.clone());
        Ok(())
    }

    async fn find_by_subject(
        &self,
        subject_id: &str,
        limit: usize,
    ) -> Result<Vec<AuditEvent>, DomainError> {
        Ok(self
            .events
            .read()
            .await
            .iter()
            .rev()
            .filter(|event| event.subject_id.as_deref() == Some(subject_id))
            .take(limit)
            .cloned()
            .collect())
    }
}
