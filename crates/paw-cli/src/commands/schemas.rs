//! Schema command implementation.
//!
//! Schema documents are read from disk and checked to be JSON by the client
//! before anything is sent.

use std::io::Write;

use paw_client::NewSchema;

use crate::cli::SchemaCommands;
use crate::context::Context;
use crate::error::CliError;
use crate::output::OutputFormat;

/// Handler for schema subcommands.
pub struct SchemasCommand<'a> {
    ctx: &'a Context,
}

impl<'a> SchemasCommand<'a> {
    /// Creates a new schema command handler.
    #[must_use]
    pub const fn new(ctx: &'a Context) -> Self {
        Self { ctx }
    }

    /// Executes the schema subcommand.
    ///
    /// # Errors
    ///
    /// Returns error if validation or the request fails.
    pub async fn execute<W: Write>(
        &self,
        out: &mut W,
        format: &OutputFormat,
        command: &SchemaCommands,
    ) -> Result<(), CliError> {
        let client = self.ctx.client();

        match command {
            SchemaCommands::List { project_id } => {
                super::require_id(project_id, "Project ID is required")?;
                let session = self.ctx.session()?;
                let schemas = client.list_schemas(&session, project_id).await?;
                format.write(out, schemas.as_slice())
            }
            SchemaCommands::Create {
                project_id,
                name,
                schema_type,
                schema_file,
                description,
            } => {
                super::require_id(project_id, "Project ID is required")?;
                super::require(name, "Schema name is required")?;
                super::require(schema_type, "Schema type is required")?;
                super::require(&schema_file.to_string_lossy(), "Schema file is required")?;
                let content = super::read_file(schema_file)?;
                let session = self.ctx.session()?;

                let schema = NewSchema {
                    name: name.clone(),
                    description: description.clone(),
                    schema_type: schema_type.clone(),
                    content,
                };
                let created = client.create_schema(&session, project_id, &schema).await?;
                format.write(out, &created)
            }
            SchemaCommands::Update {
                schema_id,
                schema_file,
            } => {
                super::require_id(schema_id, "Schema ID is required")?;
                super::require(&schema_file.to_string_lossy(), "Schema file is required")?;
                let content = super::read_file(schema_file)?;
                let session = self.ctx.session()?;

                let updated = client.update_schema(&session, schema_id, &content).await?;
                format.write(out, &updated)
            }
            SchemaCommands::Versions { schema_id } => {
                super::require_id(schema_id, "Schema ID is required")?;
                let session = self.ctx.session()?;
                let versions = client.list_schema_versions(&session, schema_id).await?;
                format.write(out, versions.as_slice())
            }
            SchemaCommands::Version {
                schema_id,
                version_id,
            } => {
                super::require_id(schema_id, "Schema ID is required")?;
                super::require_id(version_id, "Version ID is required")?;
                let session = self.ctx.session()?;
                let version = client
                    .get_schema_version(&session, schema_id, version_id)
                    .await?;
                format.write(out, &version)
            }
        }
    }
}
