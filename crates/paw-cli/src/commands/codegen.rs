//! Code generation command implementation.
//!
//! Fetches the generated source of an app and writes it to
//! `<output-dir>/<app-id>.<ext>`.

use std::io::Write;
use std::path::{Path, PathBuf};

use paw_client::{Language, SETTINGS_FILE};
use tracing::{debug, info};

use crate::cli::CodegenArgs;
use crate::context::Context;
use crate::error::CliError;
use crate::output::{CodeGenerated, OutputFormat};

/// Handler for `codegen`.
pub struct CodegenCommand<'a> {
    ctx: &'a Context,
}

impl<'a> CodegenCommand<'a> {
    /// Creates a new codegen command handler.
    #[must_use]
    pub const fn new(ctx: &'a Context) -> Self {
        Self { ctx }
    }

    /// Executes the command.
    ///
    /// # Errors
    ///
    /// Returns error if no language can be determined, the request fails, or
    /// the file cannot be written.
    pub async fn execute<W: Write>(
        &self,
        out: &mut W,
        format: &OutputFormat,
        args: &CodegenArgs,
    ) -> Result<(), CliError> {
        super::require_id(&args.app_id, "App ID is required")?;
        let language = self.language(args)?;
        let session = self.ctx.session()?;

        debug!(app = %args.app_id, %language, "Generating code");
        let code = self
            .ctx
            .client()
            .generate_app_code(&session, &args.app_id, language)
            .await?;

        let path = write_source(&args.output_dir, &args.app_id, language, &code)?;
        info!(path = %path.display(), bytes = code.len(), "Generated code written");

        format.write(
            out,
            &CodeGenerated {
                app_id: args.app_id.clone(),
                language: language.to_string(),
                path,
            },
        )
    }

    /// `--language` if given, else the settings file language.
    fn language(&self, args: &CodegenArgs) -> Result<Language, CliError> {
        if let Some(language) = args.language {
            return Ok(language.into());
        }
        let settings = self.ctx.settings().ok_or_else(|| {
            CliError::invalid(format!(
                "no language given: pass --language or run `paw init-settings` to create {SETTINGS_FILE}"
            ))
        })?;
        Ok(settings.language()?)
    }
}

/// Write generated source to `<dir>/<app_id>.<ext>`, creating `dir` if needed.
fn write_source(
    dir: &Path,
    app_id: &str,
    language: Language,
    code: &str,
) -> Result<PathBuf, CliError> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(format!("{app_id}.{}", language.extension()));
    std::fs::write(&path, code)?;
    Ok(path)
}
