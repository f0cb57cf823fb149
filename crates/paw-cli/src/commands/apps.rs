//! App command implementation.

use std::io::Write;

use crate::cli::AppCommands;
use crate::context::Context;
use crate::error::CliError;
use crate::output::OutputFormat;

/// Handler for app subcommands.
pub struct AppsCommand<'a> {
    ctx: &'a Context,
}

impl<'a> AppsCommand<'a> {
    /// Creates a new app command handler.
    #[must_use]
    pub const fn new(ctx: &'a Context) -> Self {
        Self { ctx }
    }

    /// Executes the app subcommand.
    ///
    /// # Errors
    ///
    /// Returns error if validation or the request fails.
    pub async fn execute<W: Write>(
        &self,
        out: &mut W,
        format: &OutputFormat,
        command: &AppCommands,
    ) -> Result<(), CliError> {
        match command {
            AppCommands::List { project_id } => {
                super::require_id(project_id, "Project ID is required")?;
                let session = self.ctx.session()?;
                let apps = self.ctx.client().list_apps(&session, project_id).await?;
                format.write(out, apps.as_slice())
            }
            AppCommands::Create {
                project_id,
                name,
                description,
            } => {
                super::require_id(project_id, "Project ID is required")?;
                super::require(name, "App name is required")?;
                let session = self.ctx.session()?;
                let app = self
                    .ctx
                    .client()
                    .create_app(&session, project_id, name, description)
                    .await?;
                format.write(out, &app)
            }
        }
    }
}
