//! Server command implementation.
//!
//! Server types are validated by the backend; an unknown type comes back as
//! an API error.

use std::io::Write;

use paw_client::NewServer;

use crate::cli::ServerCommands;
use crate::context::Context;
use crate::error::CliError;
use crate::output::OutputFormat;

/// Handler for server subcommands.
pub struct ServersCommand<'a> {
    ctx: &'a Context,
}

impl<'a> ServersCommand<'a> {
    /// Creates a new server command handler.
    #[must_use]
    pub const fn new(ctx: &'a Context) -> Self {
        Self { ctx }
    }

    /// Executes the server subcommand.
    ///
    /// # Errors
    ///
    /// Returns error if validation or the request fails.
    pub async fn execute<W: Write>(
        &self,
        out: &mut W,
        format: &OutputFormat,
        command: &ServerCommands,
    ) -> Result<(), CliError> {
        match command {
            ServerCommands::List { project_id } => {
                super::require_id(project_id, "Project ID is required")?;
                let session = self.ctx.session()?;
                let servers = self.ctx.client().list_servers(&session, project_id).await?;
                format.write(out, &servers)
            }
            ServerCommands::Create {
                project_id,
                name,
                server_type,
                description,
            } => {
                super::require_id(project_id, "Project ID is required")?;
                super::require(name, "Server name is required")?;
                super::require(server_type, "Server type is required")?;
                super::require(description, "Server description is required")?;
                let session = self.ctx.session()?;

                let server = NewServer {
                    name: name.clone(),
                    server_type: server_type.clone(),
                    description: description.clone(),
                };
                let created = self
                    .ctx
                    .client()
                    .create_server(&session, project_id, &server)
                    .await?;
                format.write(out, &created)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{context, json, parse, table};
    use serde_json::json as body;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn create(server_type: &str, description: &str) -> ServerCommands {
        ServerCommands::Create {
            project_id: "p1".into(),
            name: "events".into(),
            server_type: server_type.into(),
            description: description.into(),
        }
    }

    #[tokio::test]
    async fn create_kafka_server() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/protected/projects/p1/servers"))
            .and(body_json(body!({
                "name": "events", "type": "async+kafka", "description": "main cluster"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(body!({
                "id": "srv1", "name": "events", "protocol": "async+kafka", "description": "main cluster"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let ctx = context(&server);
        let mut out = Vec::new();
        ServersCommand::new(&ctx)
            .execute(&mut out, &json(), &create("async+kafka", "main cluster"))
            .await
            .unwrap();
        assert_eq!(parse(&out)["protocol"], "async+kafka");
    }

    #[tokio::test]
    async fn unknown_type_surfaces_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/protected/projects/p1/servers"))
            .respond_with(ResponseTemplate::new(422).set_body_string("unsupported server type"))
            .mount(&server)
            .await;

        let ctx = context(&server);
        let err = ServersCommand::new(&ctx)
            .execute(&mut Vec::new(), &json(), &create("async+smoke-signals", "nope"))
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "API error (status 422): unsupported server type"
        );
    }

    #[tokio::test]
    async fn blank_description_is_rejected() {
        let server = MockServer::start().await;
        let ctx = context(&server);
        let err = ServersCommand::new(&ctx)
            .execute(&mut Vec::new(), &json(), &create("async+kafka", ""))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "invalid argument: Server description is required");
    }

    #[tokio::test]
    async fn list_as_json_has_total() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/protected/projects/p1/servers"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body!([
                {"id": "srv1", "name": "events", "protocol": "async+kafka"}
            ])))
            .mount(&server)
            .await;

        let ctx = context(&server);
        let mut out = Vec::new();
        ServersCommand::new(&ctx)
            .execute(
                &mut out,
                &json(),
                &ServerCommands::List {
                    project_id: "p1".into(),
                },
            )
            .await
            .unwrap();
        let value = parse(&out);
        assert_eq!(value["total"], 1);
        assert_eq!(value["servers"][0]["id"], "srv1");
    }

    #[tokio::test]
    async fn empty_list_as_table() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/protected/projects/p1/servers"))
            .respond_with(ResponseTemplate::new(200).set_body_raw("null", "application/json"))
            .mount(&server)
            .await;

        let ctx = context(&server);
        let mut out = Vec::new();
        ServersCommand::new(&ctx)
            .execute(
                &mut out,
                &table(),
                &ServerCommands::List {
                    project_id: "p1".into(),
                },
            )
            .await
            .unwrap();
        assert_eq!(String::from_utf8(out).unwrap().trim(), "No servers found");
    }
}
