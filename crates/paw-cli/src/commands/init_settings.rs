//! `init-settings` command implementation.
//!
//! Writes a fresh `fcsettings.yaml` into the working directory. Runs without
//! a backend, so it does not resolve the host.

use std::io::Write;
use std::path::Path;

use paw_client::settings::CodeGeneration;
use paw_client::{Language, Settings};
use tracing::info;

use crate::cli::InitSettingsArgs;
use crate::error::CliError;
use crate::output::{OutputFormat, SettingsCreated};

/// Handler for `init-settings`.
pub struct InitSettingsCommand<'a> {
    dir: &'a Path,
}

impl<'a> InitSettingsCommand<'a> {
    /// Creates a handler writing into `dir`.
    #[must_use]
    pub const fn new(dir: &'a Path) -> Self {
        Self { dir }
    }

    /// Executes the command.
    ///
    /// # Errors
    ///
    /// Returns error if the file already exists or cannot be written.
    pub fn execute<W: Write>(
        &self,
        out: &mut W,
        format: &OutputFormat,
        args: &InitSettingsArgs,
    ) -> Result<(), CliError> {
        let server = args.server.trim();
        if server.is_empty() {
            return Err(CliError::invalid("Server URL is required"));
        }
        let language = Language::from(args.language);

        let settings = Settings {
            server: server.to_string(),
            code_generation: CodeGeneration {
                language: language.to_string(),
            },
            ..Settings::default()
        };
        let path = settings.create(self.dir)?;
        info!(path = %path.display(), "Created settings file");

        format.write(
            out,
            &SettingsCreated {
                path,
                server: settings.server,
                language: language.to_string(),
            },
        )
    }
}
