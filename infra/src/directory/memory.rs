//! In-memory implementation of the AccountDirectory trait.
//!
//! Accounts are keyed by email address. Suitable for development, tests and
//! single-process deployments where accounts do not need to survive a
//! restart.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

use cl_core::errors::{DomainError, DomainResult};
use cl_core::repositories::AccountDirectory;
use cl_core::services::{SecureTokenGenerator, TokenGenerator};

/// Stored account
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountRecord {
    pub subject_id: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub name: String,
    pub email_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Account directory held in a process-local map
pub struct InMemoryAccountDirectory {
    /// email -> account
    accounts: RwLock<HashMap<String, AccountRecord>>,
    generator: Arc<dyn TokenGenerator>,
}

impl InMemoryAccountDirectory {
    pub fn new() -> Self {
        Self::with_generator(Arc::new(SecureTokenGenerator))
    }

    /// Use `generator` for new account ids
    pub fn with_generator(generator: Arc<dyn TokenGenerator>) -> Self {
        Self {
            accounts: RwLock::new(HashMap::new()),
            generator,
        }
    }

    /// Create an account
    ///
    /// # Returns
    /// * `Ok(AccountRecord)` - The stored account with its new id
    /// * `Err(DomainError::Validation)` - The email is already registered
    /// * `Err(DomainError::Token)` - No account id could be generated
    pub async fn register(
        &self,
        email: &str,
        password_hash: &str,
        name: &str,
    ) -> DomainResult<AccountRecord> {
        let mut accounts = self.accounts.write().await;
        if accounts.contains_key(email) {
            return Err(DomainError::Validation {
                message: "User already exists".to_string(),
            });
        }

        let now = Utc::now();
        let record = AccountRecord {
            subject_id: self.generator.new_account_id()?,
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            name: name.to_string(),
            email_verified: false,
            created_at: now,
            updated_at: now,
        };
        accounts.insert(email.to_string(), record.clone());

        info!(subject_id = %record.subject_id, "Account registered");
        Ok(record)
    }

    /// Look up an account by email
    pub async fn find_account(&self, email: &str) -> Option<AccountRecord> {
        self.accounts.read().await.get(email).cloned()
    }

    /// Look up an account by id
    pub async fn find_by_id(&self, subject_id: &str) -> Option<AccountRecord> {
        self.accounts
            .read()
            .await
            .values()
            .find(|record| record.subject_id == subject_id)
            .cloned()
    }

    pub async fn count(&self) -> usize {
        self.accounts.read().await.len()
    }

    /// Apply `update` to the account with `subject_id`
    async fn modify<F>(&self, subject_id: &str, update: F) -> DomainResult<()>
    where
        F: FnOnce(&mut AccountRecord),
    {
        let mut accounts = self.accounts.write().await;
        let record = accounts
            .values_mut()
            .find(|record| record.subject_id == subject_id)
            .ok_or_else(|| DomainError::NotFound {
                resource: format!("account {subject_id}"),
            })?;

        update(record);
        record.updated_at = Utc::now();
        Ok(())
    }
}

impl Default for InMemoryAccountDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AccountDirectory for InMemoryAccountDirectory {
    async fn find_by_email(&self, email: &str) -> Result<Option<String>, DomainError> {
        Ok(self
            .accounts
            .read()
            .await
            .get(email)
            .map(|record| record.subject_id.clone()))
    }

    async fn update_password_hash(
        &self,
        subject_id: &str,
        password_hash: &str,
    ) -> Result<(), DomainError> {
        self.modify(subject_id, |record| {
            record.password_hash = password_hash.to_string();
        })
        .await?;

        debug!(subject_id = %subject_id, "Password hash updated");
        Ok(())
    }

    async fn mark_email_verified(&self, subject_id: &str) -> Result<(), DomainError> {
        self.modify(subject_id, |record| record.email_verified = true)
            .await?;

        debug!(subject_id = %subject_id, "Email marked verified");
        Ok(())
    }
}
