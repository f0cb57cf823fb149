//! The `fcsettings.yaml` settings file.
//!
//! A project directory may carry a settings file naming the backend server
//! and the default code generation language:
//!
//! ```yaml
//! syntaxVersion: 1
//! server: https://api.fusioncat.dev
//! codeGeneration:
//!   language: typescript
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ClientError;
use crate::types::Language;

/// Settings file name, looked up in the working directory.
pub const SETTINGS_FILE: &str = "fcsettings.yaml";

/// Backend used when a settings file is created without `--server`.
pub const DEFAULT_SERVER: &str = "https://api.fusioncat.dev";

/// Current settings file syntax version.
pub const SYNTAX_VERSION: u32 = 1;

/// Code generation section of the settings file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeGeneration {
    /// Default target language.
    #[serde(default)]
    pub language: String,
}

/// Parsed `fcsettings.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Settings syntax version.
    #[serde(default)]
    pub syntax_version: u32,
    /// Backend base URL.
    #[serde(default)]
    pub server: String,
    /// Code generation defaults.
    #[serde(default = "default_code_generation")]
    pub code_generation: CodeGeneration,
    /// Project the directory is bound to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub working_with_project: Option<String>,
}

fn default_code_generation() -> CodeGeneration {
    CodeGeneration {
        language: String::new(),
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            syntax_version: SYNTAX_VERSION,
            server: DEFAULT_SERVER.to_string(),
            code_generation: CodeGeneration {
                language: Language::default().to_string(),
            },
            working_with_project: None,
        }
    }
}

impl Settings {
    /// Path of the settings file inside `dir`.
    #[must_use]
    pub fn path_in(dir: impl AsRef<Path>) -> PathBuf {
        dir.as_ref().join(SETTINGS_FILE)
    }

    /// Load the settings file from `dir`, if there is one.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(dir: impl AsRef<Path>) -> Result<Option<Self>, ClientError> {
        let path = Self::path_in(dir);
        if !path.exists() {
            debug!(path = %path.display(), "No settings file");
            return Ok(None);
        }

        let content = std::fs::read_to_string(&path).map_err(|e| {
            ClientError::Config(format!(
                "failed to read settings file '{}': {e}",
                path.display()
            ))
        })?;

        Self::from_yaml(&content).map(Some)
    }

    /// Parse settings from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is invalid.
    pub fn from_yaml(content: &str) -> Result<Self, ClientError> {
        serde_yaml::from_str(content)
            .map_err(|e| ClientError::Config(format!("invalid settings file format: {e}")))
    }

    /// Serialize to YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_yaml(&self) -> Result<String, ClientError> {
        serde_yaml::to_string(self)
            .map_err(|e| ClientError::Config(format!("failed to serialize settings: {e}")))
    }

    /// Write a new settings file into `dir`.
    ///
    /// Never overwrites: an existing file is an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the file already exists or cannot be written.
    pub fn create(&self, dir: impl AsRef<Path>) -> Result<PathBuf, ClientError> {
        let path = Self::path_in(dir);
        if path.exists() {
            return Err(ClientError::Config(format!(
                "File '{SETTINGS_FILE}' already exists in current directory"
            )));
        }

        std::fs::write(&path, self.to_yaml()?)?;
        debug!(path = %path.display(), "Settings file written");
        Ok(path)
    }

    /// The configured code generation language.
    ///
    /// # Errors
    ///
    /// Returns an error if no language is set or the name is unknown.
    pub fn language(&self) -> Result<Language, ClientError> {
        let name = self.code_generation.language.trim();
        if name.is_empty() {
            return Err(ClientError::Validation(format!(
                "no code generation language set in {SETTINGS_FILE}"
            )));
        }
        name.parse()
    }

    /// The configured server, if non-empty.
    #[must_use]
    pub fn server(&self) -> Option<&str> {
        let server = self.server.trim();
        (!server.is_empty()).then_some(server)
    }
}
