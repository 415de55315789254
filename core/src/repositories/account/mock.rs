//! Mock implementation of AccountDirectory for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::errors::DomainError;

use super::r#trait::AccountDirectory;

/// Mock account directory recording every mutation it receives
#[derive(Default)]
pub struct MockAccountDirectory {
    /// email -> subject id
    pub accounts: Arc<Mutex<HashMap<String, String>>>,
    /// (subject id, hash) in call order
    pub password_updates: Arc<Mutex<Vec<(String, String)>>>,
    /// subject ids in call order
    pub verified: Arc<Mutex<Vec<String>>>,
    /// When set, every mutation fails with this message
    pub fail_mutations: Option<String>,
    /// When set, every email lookup fails with this message
    pub fail_lookups: Option<String>,
    /// When set, every call sleeps this long before answering
    pub delay: Option<Duration>,
}

impl MockAccountDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_account(self, email: &str, subject_id: &str) -> Self {
        self.accounts
            .lock()
            .unwrap()
            .insert(email.to_string(), subject_id.to_string());
        self
    }

    pub fn failing(mut self, message: &str) -> Self {
        self.fail_mutations = Some(message.to_string());
        self
    }

    pub fn failing_lookups(mut self, message: &str) -> Self {
        self.fail_lookups = Some(message.to_string());
        self
    }

    pub fn slow(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn password_updates(&self) -> Vec<(String, String)> {
        self.password_updates.lock().unwrap().clone()
    }

    pub fn verified(&self) -> Vec<String> {
        self.verified.lock().unwrap().clone()
    }

    async fn pause(&self) {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }

    fn check_failure(&self) -> Result<(), DomainError> {
        Self::fail_with(&self.fail_mutations)
    }

    fn fail_with(message: &Option<String>) -> Result<(), DomainError> {
        match message {
            Some(message) => Err(DomainError::Internal {
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl AccountDirectory for MockAccountDirectory {
    async fn find_by_email(&self, email: &str) -> Result<Option<String>, DomainError> {
        self.pause().await;
        Self::fail_with(&self.fail_lookups)?;
        Ok(self.accounts.lock().unwrap().get(email).cloned())
    }

    async fn update_password_hash(
        &self,
        subject_id: &str,
        password_hash: &str,
    ) -> Result<(), DomainError> {
        self.pause().await;
        self.check_failure()?;
        self.password_updates
            .lock()
            .unwrap()
            .push((subject_id.to_string(), password_hash.to_string()));
        Ok(())
    }

    async fn mark_email_verified(&self, subject_id: &str) -> Result<(), DomainError> {
        self.pause().await;
        self.check_failure()?;
        self.verified.lock().unwrap().push(subject_id.to_string());
        Ok(())
    }
}
