//! Shared state for command handlers.

use std::path::Path;

use paw_client::{ApiClient, ClientConfig, Session, Settings, TOKEN_ENV};
use tracing::debug;

use crate::error::CliError;

/// Client, credentials and settings available to every command.
#[derive(Debug, Clone)]
pub struct Context {
    client: ApiClient,
    token: Option<String>,
    settings: Option<Settings>,
}

impl Context {
    /// Creates a context from its parts.
    #[must_use]
    pub fn new(client: ApiClient, token: Option<String>, settings: Option<Settings>) -> Self {
        Self {
            client,
            token,
            settings,
        }
    }

    /// Resolves the backend host and loads the settings file from `dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the host cannot be resolved.
    pub fn resolve(
        host: Option<&str>,
        token: Option<String>,
        dir: impl AsRef<Path>,
    ) -> Result<Self, CliError> {
        let config = ClientConfig::resolve(host, dir)?;
        debug!(host = %config.host, source = ?config.source, "Using backend");
        let client = ApiClient::from_config(&config)?;
        Ok(Self::new(client, token, config.settings))
    }

    /// The API client.
    #[must_use]
    pub const fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Settings file contents, if one was found.
    #[must_use]
    pub const fn settings(&self) -> Option<&Settings> {
        self.settings.as_ref()
    }

    /// Session for protected calls.
    ///
    /// # Errors
    ///
    /// Returns an error if no token was supplied.
    pub fn session(&self) -> Result<Session, CliError> {
        let token = self
            .token
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| {
                CliError::invalid(format!(
                    "no access token: run `paw auth signin` and set {TOKEN_ENV}, or pass --token"
                ))
            })?;
        Ok(Session::new(token)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> ApiClient {
        ApiClient::new("http://127.0.0.1:1").unwrap()
    }

    #[test]
    fn session_requires_token() {
        let ctx = Context::new(client(), None, None);
        let err = ctx.session().unwrap_err();
        assert!(matches!(err, CliError::InvalidArgument(_)));
        assert!(err.to_string().contains("FC_ACCESS_TOKEN"));
    }

    #[test]
    fn blank_token_counts_as_missing() {
        let ctx = Context::new(client(), Some("  ".into()), None);
        assert!(matches!(ctx.session(), Err(CliError::InvalidArgument(_))));
    }

    #[test]
    fn session_from_token() {
        let ctx = Context::new(client(), Some("Bearer tok".into()), None);
        assert_eq!(ctx.session().unwrap().token(), "tok");
    }

    #[test]
    fn resolve_fails_without_host() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = Context::resolve(None, None, dir.path()).unwrap_err();
        assert!(matches!(err, CliError::Client(_)));
    }
}
