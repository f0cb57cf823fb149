//! Project command implementation.

use std::io::Write;
use std::path::Path;

use paw_client::{NewProject, Ownership};
use tracing::debug;

use crate::cli::{BelongsToArg, ProjectCommands};
use crate::context::Context;
use crate::error::CliError;
use crate::output::OutputFormat;

/// Handler for project subcommands.
pub struct ProjectsCommand<'a> {
    ctx: &'a Context,
}

impl<'a> ProjectsCommand<'a> {
    /// Creates a new project command handler.
    #[must_use]
    pub const fn new(ctx: &'a Context) -> Self {
        Self { ctx }
    }

    /// Executes the project subcommand.
    ///
    /// # Errors
    ///
    /// Returns error if validation or the request fails.
    pub async fn execute<W: Write>(
        &self,
        out: &mut W,
        format: &OutputFormat,
        command: &ProjectCommands,
    ) -> Result<(), CliError> {
        match command {
            ProjectCommands::List => {
                let session = self.ctx.session()?;
                let projects = self.ctx.client().list_projects(&session).await?;
                format.write(out, projects.as_slice())
            }
            ProjectCommands::Create {
                name,
                belongs_to,
                workspace_id,
                description,
                private,
            } => {
                self.create(
                    out,
                    format,
                    name,
                    *belongs_to,
                    workspace_id.as_deref(),
                    description,
                    *private,
                )
                .await
            }
            ProjectCommands::Import { project_id, file } => {
                self.import(out, format, project_id, file).await
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    async fn create<W: Write>(
        &self,
        out: &mut W,
        format: &OutputFormat,
        name: &str,
        belongs_to: BelongsToArg,
        workspace_id: Option<&str>,
        description: &str,
        private: bool,
    ) -> Result<(), CliError> {
        super::require(name, "Project name is required")?;
        let workspace_id = match belongs_to {
            BelongsToArg::Workspace => {
                let id = workspace_id.unwrap_or_default();
                super::require(id, "Workspace ID is required when project belongs to workspace")?;
                Some(id)
            }
            BelongsToArg::User => None,
        };

        let session = self.ctx.session()?;
        let owner = match workspace_id {
            Some(id) => id.to_string(),
            None => {
                let me = self.ctx.client().me(&session).await?;
                debug!(user = %me.id, "Project owner resolved");
                me.id
            }
        };

        let project = NewProject {
            name: name.to_string(),
            description: description.to_string(),
            created_by_type: Ownership::from(belongs_to),
            created_by_id: owner,
            is_private: private,
        };
        let created = self.ctx.client().create_project(&session, &project).await?;
        format.write(out, &created)
    }

    async fn import<W: Write>(
        &self,
        out: &mut W,
        format: &OutputFormat,
        project_id: &str,
        file: &Path,
    ) -> Result<(), CliError> {
        super::require_id(project_id, "Project ID is required")?;
        let yaml = super::read_file(file)?;
        let session = self.ctx.session()?;

        debug!(project = %project_id, bytes = yaml.len(), "Importing project definition");
        let project = self
            .ctx
            .client()
            .import_project(&session, project_id, &yaml)
            .await?;
        format.write(out, &project)
    }
}
