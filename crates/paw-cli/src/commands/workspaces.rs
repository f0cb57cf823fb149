//! Workspace command implementation.

use std::io::Write;

use crate::cli::WorkspaceCommands;
use crate::context::Context;
use crate::error::CliError;
use crate::output::OutputFormat;

/// Handler for workspace subcommands.
pub struct WorkspacesCommand<'a> {
    ctx: &'a Context,
}

impl<'a> WorkspacesCommand<'a> {
    /// Creates a new workspace command handler.
    #[must_use]
    pub const fn new(ctx: &'a Context) -> Self {
        Self { ctx }
    }

    /// Executes the workspace subcommand.
    ///
    /// # Errors
    ///
    /// Returns error if validation or the request fails.
    pub async fn execute<W: Write>(
        &self,
        out: &mut W,
        format: &OutputFormat,
        command: &WorkspaceCommands,
    ) -> Result<(), CliError> {
        match command {
            WorkspaceCommands::List => {
                let session = self.ctx.session()?;
                let workspaces = self.ctx.client().list_workspaces(&session).await?;
                format.write(out, workspaces.as_slice())
            }
            WorkspaceCommands::Create { name, description } => {
                super::require(name, "Workspace name is required")?;
                let session = self.ctx.session()?;
                let workspace = self
                    .ctx
                    .client()
                    .create_workspace(&session, name, description)
                    .await?;
                format.write(out, &workspace)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{context, json, parse, table};
    use serde_json::json as body;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn create_prints_workspace() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/protected/workspaces"))
            .respond_with(ResponseTemplate::new(201).set_body_json(body!({
                "id": "w1", "name": "team", "projects": 0, "users": 1
            })))
            .expect(1)
            .mount(&server)
            .await;

        let ctx = context(&server);
        let mut out = Vec::new();
        WorkspacesCommand::new(&ctx)
            .execute(
                &mut out,
                &json(),
                &WorkspaceCommands::Create {
                    name: "team".into(),
                    description: String::new(),
                },
            )
            .await
            .unwrap();
        assert_eq!(parse(&out)["name"], "team");
    }

    #[tokio::test]
    async fn blank_name_is_rejected() {
        let server = MockServer::start().await;
        let ctx = context(&server);
        let err = WorkspacesCommand::new(&ctx)
            .execute(
                &mut Vec::new(),
                &json(),
                &WorkspaceCommands::Create {
                    name: "  ".into(),
                    description: String::new(),
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "invalid argument: Workspace name is required");
    }

    #[tokio::test]
    async fn empty_list_as_table() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/protected/workspaces"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body!([])))
            .mount(&server)
            .await;

        let ctx = context(&server);
        let mut out = Vec::new();
        WorkspacesCommand::new(&ctx)
            .execute(&mut out, &table(), &WorkspaceCommands::List)
            .await
            .unwrap();
        assert_eq!(String::from_utf8(out).unwrap().trim(), "No workspaces found");
    }
}
