//! Credential lifecycle manager implementation

use serde_json::json;
use std::future::Future;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::clock::Clock;
use crate::domain::entities::{
    AuditEvent, AuditEventType, ClientInfo, EmailVerification, PasswordReset,
    PasswordResetOutcome, RefreshGrant, Session, TokenPair,
};
use crate::errors::{CredentialError, DomainError, DomainResult};
use crate::repositories::{AccountDirectory, AuditTrail, NoOpAuditTrail};
use crate::services::token::{redact, SecureTokenGenerator, TokenGenerator};

use super::config::LifecycleConfig;
use super::stores::CredentialStores;

/// Coordinates the token stores, the account directory and the audit trail
/// for every credential protocol
///
/// The manager holds no state of its own beyond handles; every protocol step
/// is a sequence of single-store operations, and atomicity is provided by
/// the stores.
pub struct CredentialLifecycleManager<D, A = NoOpAuditTrail>
where
    D: AccountDirectory,
    A: AuditTrail,
{
    stores: CredentialStores,
    directory: Arc<D>,
    audit: Arc<A>,
    generator: Arc<dyn TokenGenerator>,
    clock: Arc<dyn Clock>,
    config: LifecycleConfig,
}

impl<D: AccountDirectory> CredentialLifecycleManager<D, NoOpAuditTrail> {
    /// Create a manager without auditing, using the secure token generator
    /// and the clock the stores were built with
    pub fn new(stores: CredentialStores, directory: Arc<D>, config: LifecycleConfig) -> Self {
        let clock = stores.clock();
        Self {
            stores,
            directory,
            audit: Arc::new(NoOpAuditTrail),
            generator: Arc::new(SecureTokenGenerator),
            clock,
            config,
        }
    }
}

impl<D, A> CredentialLifecycleManager<D, A>
where
    D: AccountDirectory,
    A: AuditTrail,
{
    /// Record lifecycle events to `audit`
    pub fn with_audit<B: AuditTrail>(self, audit: Arc<B>) -> CredentialLifecycleManager<D, B> {
        CredentialLifecycleManager {
            stores: self.stores,
            directory: self.directory,
            audit,
            generator: self.generator,
            clock: self.clock,
            config: self.config,
        }
    }

    /// Replace the token generator
    pub fn with_generator(mut self, generator: Arc<dyn TokenGenerator>) -> Self {
        self.generator = generator;
        self
    }

    pub fn stores(&self) -> &CredentialStores {
        &self.stores
    }

    pub fn config(&self) -> &LifecycleConfig {
        &self.config
    }

    /// Issue a session and a refresh token for an authenticated subject
    ///
    /// Credential verification happens before this call; the manager only
    /// mints tokens.
    pub async fn login(&self, subject_id: &str, client: &ClientInfo) -> DomainResult<TokenPair> {
        let pair = self.issue_pair(subject_id, client).await?;

        info!(
            subject_id = %subject_id,
            session = %redact(&pair.access_token),
            "Session issued"
        );
        self.record(
            AuditEvent::new(AuditEventType::Login, true, self.clock.now())
                .with_subject(subject_id)
                .with_ip(&client.ip_address),
        )
        .await;

        Ok(pair)
    }

    /// Exchange a refresh token for a new session and refresh token
    ///
    /// The presented token is consumed before anything is minted, so a
    /// replayed or concurrently presented token fails. If minting fails after
    /// the consume, the old token stays spent and the client must log in again.
    pub async fn refresh_rotate(
        &self,
        refresh_token: &str,
        client: &ClientInfo,
    ) -> DomainResult<TokenPair> {
        let Some(grant) = self.stores.refresh_tokens.consume(refresh_token).await else {
            warn!(token = %redact(refresh_token), "Refresh rejected: invalid or expired token");
            self.record(
                AuditEvent::new(AuditEventType::TokenRefreshRejected, false, self.clock.now())
                    .with_ip(&client.ip_address),
            )
            .await;
            return Err(CredentialError::NotFoundOrExpired.into());
        };

        let pair = self.issue_pair(&grant.subject_id, client).await?;

        info!(
            subject_id = %grant.subject_id,
            old = %redact(refresh_token),
            new = %redact(&pair.refresh_token),
            "Refresh token rotated"
        );
        self.record(
            AuditEvent::new(AuditEventType::TokenRefreshed, true, self.clock.now())
                .with_subject(&grant.subject_id)
                .with_ip(&client.ip_address),
        )
        .await;

        Ok(pair)
    }

    /// Revoke a session and optionally its refresh token. Calling it for
    /// tokens that are already gone is not an error.
    pub async fn logout(&self, session_token: &str, refresh_token: Option<&str>) -> DomainResult<()> {
        let session = self.stores.sessions.consume(session_token).await;
        let refresh_revoked = match refresh_token {
            Some(token) => self.stores.refresh_tokens.revoke(token).await,
            None => false,
        };

        if let Some(session) = session {
            info!(subject_id = %session.subject_id, "Session logged out");
            self.record(
                AuditEvent::new(AuditEventType::Logout, true, self.clock.now())
                    .with_subject(&session.subject_id)
                    .with_ip(&session.ip_address)
                    .with_details(json!({ "refresh_token_revoked": refresh_revoked })),
            )
            .await;
        }

        Ok(())
    }

    /// Start a password reset for `email`
    ///
    /// A token is stored only when the email belongs to an account. Both
    /// outcomes carry the same public message; callers facing the public
    /// should not reveal which one occurred.
    pub async fn request_password_reset(&self, email: &str) -> DomainResult<PasswordResetOutcome> {
        let subject_id = self
            .call_directory("find_by_email", self.directory.find_by_email(email))
            .await?;

        let Some(subject_id) = subject_id else {
            info!("Password reset requested for unknown email");
            self.record(
                AuditEvent::new(AuditEventType::PasswordResetRequested, false, self.clock.now())
                    .with_details(json!({ "account_found": false })),
            )
            .await;
            return Ok(PasswordResetOutcome::UnknownEmail);
        };

        let token = self.generator.new_opaque_token()?;
        self.stores
            .password_resets
            .put(
                token.clone(),
                PasswordReset::new(&subject_id, email),
                self.config.password_reset_ttl,
            )
            .await;

        info!(subject_id = %subject_id, token = %redact(&token), "Password reset token issued");
        self.record(
            AuditEvent::new(AuditEventType::PasswordResetRequested, true, self.clock.now())
                .with_subject(&subject_id)
                .with_details(json!({ "account_found": true })),
        )
        .await;

        Ok(PasswordResetOutcome::Issued { token, subject_id })
    }

    /// Complete a password reset. Returns the subject whose password changed.
    ///
    /// The token is spent even when the directory update fails.
    pub async fn confirm_password_reset(
        &self,
        token: &str,
        new_password_hash: &str,
    ) -> DomainResult<String> {
        let Some(reset) = self.stores.password_resets.consume(token).await else {
            warn!(token = %redact(token), "Password reset rejected: invalid or expired token");
            self.record(AuditEvent::new(
                AuditEventType::PasswordResetRejected,
                false,
                self.clock.now(),
            ))
            .await;
            return Err(CredentialError::NotFoundOrExpired.into());
        };

        let updated = self
            .call_directory(
                "update_password_hash",
                self.directory
                    .update_password_hash(&reset.subject_id, new_password_hash),
            )
            .await;
        if let Err(e) = updated {
            self.record(
                AuditEvent::new(AuditEventType::PasswordResetCompleted, false, self.clock.now())
                    .with_subject(&reset.subject_id)
                    .with_details(json!({ "error": e.to_string() })),
            )
            .await;
            return Err(e);
        }

        if self.config.revoke_sessions_on_password_reset {
            self.revoke_all_sessions(&reset.subject_id).await;
        }

        info!(subject_id = %reset.subject_id, "Password reset completed");
        self.record(
            AuditEvent::new(AuditEventType::PasswordResetCompleted, true, self.clock.now())
                .with_subject(&reset.subject_id),
        )
        .await;

        Ok(reset.subject_id)
    }

    /// Issue an email verification token for a freshly registered account
    pub async fn issue_email_verification(&self, subject_id: &str, email: &str) -> DomainResult<String> {
        let token = self.generator.new_opaque_token()?;
        self.stores
            .email_verifications
            .put(
                token.clone(),
                EmailVerification::new(subject_id, email),
                self.config.email_verification_ttl,
            )
            .await;

        info!(subject_id = %subject_id, token = %redact(&token), "Email verification token issued");
        self.record(
            AuditEvent::new(AuditEventType::EmailVerificationIssued, true, self.clock.now())
                .with_subject(subject_id),
        )
        .await;

        Ok(token)
    }

    /// Confirm an email address. Returns the verified grant.
    ///
    /// The token is spent even when the directory update fails.
    pub async fn confirm_email_verification(&self, token: &str) -> DomainResult<EmailVerification> {
        let Some(verification) = self.stores.email_verifications.consume(token).await else {
            warn!(token = %redact(token), "Email verification rejected: invalid or expired token");
            self.record(AuditEvent::new(
                AuditEventType::EmailVerificationRejected,
                false,
                self.clock.now(),
            ))
            .await;
            return Err(CredentialError::NotFoundOrExpired.into());
        };

        self.call_directory(
            "mark_email_verified",
            self.directory.mark_email_verified(&verification.subject_id),
        )
        .await?;

        info!(subject_id = %verification.subject_id, "Email verified");
        self.record(
            AuditEvent::new(AuditEventType::EmailVerified, true, self.clock.now())
                .with_subject(&verification.subject_id),
        )
        .await;

        Ok(verification)
    }

    /// Non-consuming session check, as done on every authenticated request
    pub async fn validate_session(&self, session_token: &str) -> DomainResult<Session> {
        self.stores
            .sessions
            .get(session_token)
            .await
            .ok_or_else(|| CredentialError::NotFoundOrExpired.into())
    }

    /// Live sessions of a subject
    pub async fn list_sessions(&self, subject_id: &str) -> Vec<Session> {
        self.stores.sessions.list_by_subject(subject_id).await
    }

    /// Revoke every session and refresh token of a subject. Returns the
    /// number of live records revoked.
    pub async fn revoke_all_sessions(&self, subject_id: &str) -> usize {
        let sessions = self.stores.sessions.revoke_by_subject(subject_id).await;
        let refresh = self.stores.refresh_tokens.revoke_by_subject(subject_id).await;

        info!(subject_id = %subject_id, sessions, refresh, "All sessions revoked");
        self.record(
            AuditEvent::new(AuditEventType::SessionsRevoked, true, self.clock.now())
                .with_subject(subject_id)
                .with_details(json!({ "sessions": sessions, "refresh_tokens": refresh })),
        )
        .await;

        sessions + refresh
    }

    /// Mint a session token and a refresh token for `subject_id`
    ///
    /// Both tokens are generated before either is stored, so an entropy
    /// failure leaves no half-issued pair behind.
    async fn issue_pair(&self, subject_id: &str, client: &ClientInfo) -> DomainResult<TokenPair> {
        let access_token = self.generator.new_opaque_token()?;
        let refresh_token = self.generator.new_opaque_token()?;

        // One reading so created_at and both expiries share a base.
        let now = self.clock.now();
        self.stores
            .sessions
            .put_at(
                access_token.clone(),
                Session::new(subject_id, client, now),
                now,
                self.config.session_ttl,
            )
            .await;
        self.stores
            .refresh_tokens
            .put_at(
                refresh_token.clone(),
                RefreshGrant::new(subject_id),
                now,
                self.config.refresh_ttl,
            )
            .await;

        Ok(TokenPair::new(
            access_token,
            refresh_token,
            self.config.advertised_expires_in,
        ))
    }

    /// Run a directory call under the configured timeout, mapping every
    /// failure to `UpstreamDirectoryFailure`
    async fn call_directory<T, F>(&self, operation: &'static str, call: F) -> DomainResult<T>
    where
        F: Future<Output = Result<T, DomainError>>,
    {
        match tokio::time::timeout(self.config.directory_timeout, call).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => {
                error!(operation, error = %e, "Account directory call failed");
                Err(CredentialError::UpstreamDirectoryFailure {
                    message: format!("{operation}: {e}"),
                }
                .into())
            }
            Err(_) => {
                error!(
                    operation,
                    timeout_ms = self.config.directory_timeout.as_millis() as u64,
                    "Account directory call timed out"
                );
                Err(CredentialError::UpstreamDirectoryFailure {
                    message: format!(
                        "{operation} timed out after {}ms",
                        self.config.directory_timeout.as_millis()
                    ),
                }
                .into())
            }
        }
    }

    async fn record(&self, event: AuditEvent) {
        if let Err(e) = self.audit.record(&event).await {
            warn!(event = %event.event_type, error = %e, "Failed to record audit event");
        }
    }
}
