//! Account directory trait: the boundary to wherever accounts live.
//!
//! The credential core never owns account data. It looks accounts up by
//! email and asks the directory to apply the effects of completed password
//! resets and email verifications.

use async_trait::async_trait;

use crate::errors::DomainError;

/// Lookup and mutation interface of the account store
///
/// Calls are expected to be fast; the lifecycle manager still bounds every
/// call with a timeout and reports a slow or failing directory as
/// `CredentialError::UpstreamDirectoryFailure`.
///
/// # Example Implementation
/// ```no_run
/// use async_trait::async_trait;
/// use cl_core::errors::DomainError;
/// use cl_core::repositories::AccountDirectory;
///
/// struct LdapDirectory;
///
/// #[async_trait]
/// impl AccountDirectory for LdapDirectory {
///     async fn find_by_email(&self, _email: &str) -> Result<Option<String>, DomainError> {
///         Ok(None)
///     }
///
///     async fn update_password_hash(
///         &self,
///         _subject_id: &str,
///         _password_hash: &str,
///     ) -> Result<(), DomainError> {
///         Ok(())
///     }
///
///     async fn mark_email_verified(&self, _subject_id: &str) -> Result<(), DomainError> {
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait AccountDirectory: Send + Sync {
    /// Find the account id registered under an email address
    ///
    /// # Returns
    /// * `Ok(Some(subject_id))` - Account found
    /// * `Ok(None)` - No account uses this email
    /// * `Err(DomainError)` - Directory failure
    async fn find_by_email(&self, email: &str) -> Result<Option<String>, DomainError>;

    /// Replace the stored password hash of an account
    ///
    /// The hash is produced by the caller's password hashing collaborator;
    /// the directory stores it verbatim.
    async fn update_password_hash(
        &self,
        subject_id: &str,
        password_hash: &str,
    ) -> Result<(), DomainError>;

    /// Mark the account's email address as verified
    async fn mark_email_verified(&self, subject_id: &str) -> Result<(), DomainError>;
}
