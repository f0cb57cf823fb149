//! Authenticated session.

use std::fmt;

use crate::error::ClientError;

/// Bearer token of a signed-in user.
///
/// Returned by [`ApiClient::sign_up`](crate::ApiClient::sign_up) and
/// [`ApiClient::sign_in`](crate::ApiClient::sign_in), or built from a token
/// the user already holds. Passed explicitly to every protected call.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    token: String,
}

impl Session {
    /// Build a session from a raw token or an `Authorization` header value.
    ///
    /// A leading `Bearer ` prefix and surrounding whitespace are stripped.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] if nothing is left after stripping.
    pub fn new(token: impl AsRef<str>) -> Result<Self, ClientError> {
        let token = token.as_ref().trim_start();
        let token = token.strip_prefix("Bearer ").unwrap_or(token).trim();
        if token.is_empty() {
            return Err(ClientError::Validation("access token is empty".into()));
        }
        Ok(Self {
            token: token.to_string(),
        })
    }

    /// The raw token.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Value for the `Authorization` header.
    #[must_use]
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

// Tokens stay out of logs.
impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session").finish_non_exhaustive()
    }
}
