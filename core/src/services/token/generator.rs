//! Opaque token and account id generation

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use rand::rngs::OsRng;
use rand::RngCore;

use crate::errors::TokenError;

/// Random bytes behind every opaque token (256 bits)
pub const OPAQUE_TOKEN_BYTES: usize = 32;

/// Random bytes behind every account id (96 bits); ids only need to be
/// unique, not unguessable
pub const ACCOUNT_ID_BYTES: usize = 12;

/// Number of leading characters of a token that may appear in logs
const REDACTED_PREFIX_LEN: usize = 8;

/// Source of opaque identifiers
pub trait TokenGenerator: Send + Sync {
    /// URL-safe token for session, refresh, reset and verification records
    fn new_opaque_token(&self) -> Result<String, TokenError>;

    /// URL-safe account identifier
    fn new_account_id(&self) -> Result<String, TokenError>;
}

/// Generator backed by the operating system CSPRNG
///
/// Output is unpadded URL-safe base64: 43 characters for tokens and 16 for
/// account ids. No uniqueness check is made; at these sizes collisions are
/// negligible. A failing random source is reported as
/// [`TokenError::EntropyUnavailable`] instead of producing a weak value.
#[derive(Debug, Default, Clone, Copy)]
pub struct SecureTokenGenerator;

impl SecureTokenGenerator {
    pub fn new() -> Self {
        Self
    }

    fn random_url_safe(len: usize) -> Result<String, TokenError> {
        let mut bytes = vec![0u8; len];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|e| TokenError::EntropyUnavailable {
                message: e.to_string(),
            })?;
        Ok(URL_SAFE_NO_PAD.encode(bytes))
    }
}

impl TokenGenerator for SecureTokenGenerator {
    fn new_opaque_token(&self) -> Result<String, TokenError> {
        Self::random_url_safe(OPAQUE_TOKEN_BYTES)
    }

    fn new_account_id(&self) -> Result<String, TokenError> {
        Self::random_url_safe(ACCOUNT_ID_BYTES)
    }
}

/// Shorten a token for logging so that log readers never see a usable value
pub fn redact(token: &str) -> String {
    let prefix: String = token.chars().take(REDACTED_PREFIX_LEN).collect();
    format!("{}…", prefix)
}
