//! Backend host resolution.
//!
//! The host comes from exactly one of two places: the `FC_HOST` environment
//! variable or the `server` field of `fcsettings.yaml`. Setting both is
//! ambiguous and rejected, as is setting neither.

use std::path::Path;

use tracing::debug;
use url::Url;

use crate::error::ClientError;
use crate::settings::Settings;

/// Environment variable overriding the backend URL.
pub const HOST_ENV: &str = "FC_HOST";

/// Environment variable carrying the bearer token.
pub const TOKEN_ENV: &str = "FC_ACCESS_TOKEN";

/// Where the resolved host came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostSource {
    /// `FC_HOST` (or the `--host` flag bound to it).
    Environment,
    /// `server` in the settings file.
    SettingsFile,
}

/// Resolved client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend base URL.
    pub host: String,
    /// Where `host` came from.
    pub source: HostSource,
    /// Settings file contents, when one was found.
    pub settings: Option<Settings>,
}

impl ClientConfig {
    /// Resolve the configuration from an environment value and the settings
    /// file in `dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings file is unreadable or the host is
    /// ambiguous, missing, or not a valid URL.
    pub fn resolve(env_host: Option<&str>, dir: impl AsRef<Path>) -> Result<Self, ClientError> {
        let settings = Settings::load(dir)?;
        let (host, source) = resolve_host(env_host, settings.as_ref())?;
        Ok(Self {
            host,
            source,
            settings,
        })
    }
}

/// Pick the backend host from the two possible sources.
///
/// Empty or whitespace-only values count as unset.
///
/// # Errors
///
/// Returns [`ClientError::Config`] if both or neither source is set, or the
/// chosen value is not an absolute `http`/`https` URL.
pub fn resolve_host(
    env_host: Option<&str>,
    settings: Option<&Settings>,
) -> Result<(String, HostSource), ClientError> {
    let env_host = env_host.map(str::trim).filter(|h| !h.is_empty());
    let file_host = settings.and_then(Settings::server);

    let (host, source) = match (env_host, file_host) {
        (Some(_), Some(_)) => {
            return Err(ClientError::Config(
                "host is specified in both environment variable and settings file - \
                 please use only one source"
                    .into(),
            ));
        }
        (Some(host), None) => (host, HostSource::Environment),
        (None, Some(host)) => (host, HostSource::SettingsFile),
        (None, None) => {
            return Err(ClientError::Config(format!(
                "host is not specified in either environment variable ({HOST_ENV}) or settings file"
            )));
        }
    };

    validate_host(host)?;
    debug!(host = %host, source = ?source, "Resolved backend host");
    Ok((host.to_string(), source))
}

fn validate_host(host: &str) -> Result<(), ClientError> {
    let url = Url::parse(host)
        .map_err(|e| ClientError::Config(format!("invalid host URL '{host}': {e}")))?;

    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(ClientError::Config(format!(
            "invalid host URL '{host}': unsupported scheme '{other}'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::SETTINGS_FILE;
    use tempfile::TempDir;

    fn settings_with(server: &str) -> Settings {
        Settings {
            server: server.into(),
            ..Settings::default()
        }
    }

    #[test]
    fn env_only_wins() {
        let (host, source) = resolve_host(Some("http://localhost:8080/"), None).unwrap();
        assert_eq!(host, "http://localhost:8080/");
        assert_eq!(source, HostSource::Environment);
    }

    #[test]
    fn settings_only_wins() {
        let settings = settings_with("https://api.example.dev/");
        let (host, source) = resolve_host(None, Some(&settings)).unwrap();
        assert_eq!(host, "https://api.example.dev/");
        assert_eq!(source, HostSource::SettingsFile);
    }

    #[test]
    fn both_sources_conflict() {
        let settings = settings_with("https://api.example.dev/");
        let err = resolve_host(Some("http://localhost:8080/"), Some(&settings)).unwrap_err();
        assert!(matches!(err, ClientError::Config(_)));
        assert!(err.to_string().contains("both environment variable and settings file"));
    }

    #[test]
    fn neither_source_is_missing() {
        let err = resolve_host(None, None).unwrap_err();
        assert!(err.to_string().contains("FC_HOST"));
    }

    #[test]
    fn blank_values_count_as_unset() {
        let settings = settings_with("");
        assert!(resolve_host(Some("   "), Some(&settings)).is_err());

        let settings = settings_with("https://api.example.dev/");
        let (host, _) = resolve_host(Some(""), Some(&settings)).unwrap();
        assert_eq!(host, "https://api.example.dev/");
    }

    #[test]
    fn rejects_non_http_scheme() {
        let err = resolve_host(Some("ws://localhost:8080"), None).unwrap_err();
        assert!(err.to_string().contains("unsupported scheme"));
    }

    #[test]
    fn rejects_relative_url() {
        assert!(resolve_host(Some("localhost"), None).is_err());
    }

    #[test]
    fn resolve_reads_settings_file_from_dir() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(SETTINGS_FILE),
            "syntaxVersion: 1\nserver: http://127.0.0.1:9999/\ncodeGeneration:\n  language: go\n",
        )
        .unwrap();

        let config = ClientConfig::resolve(None, dir.path()).unwrap();
        assert_eq!(config.host, "http://127.0.0.1:9999/");
        assert_eq!(config.source, HostSource::SettingsFile);
        assert!(config.settings.is_some());
    }

    #[test]
    fn resolve_without_settings_file_uses_env() {
        let dir = TempDir::new().unwrap();
        let config = ClientConfig::resolve(Some("http://127.0.0.1:1/"), dir.path()).unwrap();
        assert_eq!(config.source, HostSource::Environment);
        assert!(config.settings.is_none());
    }
}
