//! Values returned to callers of the credential lifecycle.

use serde::{Deserialize, Serialize};

/// Token type advertised with every issued pair
pub const TOKEN_TYPE: &str = "Bearer";

/// Response text shown for every password reset request, whether or not the
/// email belongs to an account
pub const PASSWORD_RESET_PUBLIC_MESSAGE: &str =
    "If the email exists, a password reset link has been sent";

/// Token pair returned to the client on login and refresh
///
/// `expires_in` is the externally advertised access token lifetime. It is a
/// client contract and does not reflect how long the session record is kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// Opaque session token
    pub access_token: String,

    /// Opaque single-use refresh token
    pub refresh_token: String,

    /// Always [`TOKEN_TYPE`]
    pub token_type: String,

    /// Advertised access token lifetime in seconds
    pub expires_in: i64,
}

impl TokenPair {
    pub fn new(access_token: String, refresh_token: String, expires_in: i64) -> Self {
        Self {
            access_token,
            refresh_token,
            token_type: TOKEN_TYPE.to_string(),
            expires_in,
        }
    }
}

/// Internal result of a password reset request
///
/// Callers that face the public must respond with [`Self::public_message`]
/// for both variants so that account existence is not revealed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PasswordResetOutcome {
    /// A reset token was issued and should be delivered out of band
    Issued { token: String, subject_id: String },

    /// No account uses the email; nothing was stored
    UnknownEmail,
}

impl PasswordResetOutcome {
    /// The uniform externally visible response
    pub fn public_message(&self) -> &'static str {
        PASSWORD_RESET_PUBLIC_MESSAGE
    }

    /// The issued token, if any
    pub fn token(&self) -> Option<&str> {
        match self {
            Self::Issued { token, .. } => Some(token),
            Self::UnknownEmail => None,
        }
    }
}
