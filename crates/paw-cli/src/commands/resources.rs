//! Resource command implementation.

use std::io::Write;

use paw_client::{NewResource, ResourceMode, ResourceType};

use crate::cli::ResourceCommands;
use crate::context::Context;
use crate::error::CliError;
use crate::output::OutputFormat;

/// Handler for resource subcommands.
pub struct ResourcesCommand<'a> {
    ctx: &'a Context,
}

impl<'a> ResourcesCommand<'a> {
    /// Creates a new resource command handler.
    #[must_use]
    pub const fn new(ctx: &'a Context) -> Self {
        Self { ctx }
    }

    /// Executes the resource subcommand.
    ///
    /// # Errors
    ///
    /// Returns error if validation or the request fails.
    pub async fn execute<W: Write>(
        &self,
        out: &mut W,
        format: &OutputFormat,
        command: &ResourceCommands,
    ) -> Result<(), CliError> {
        match command {
            ResourceCommands::List { server_id } => {
                super::require_id(server_id, "Server ID is required")?;
                let session = self.ctx.session()?;
                let resources = self.ctx.client().list_resources(&session, server_id).await?;
                format.write(out, resources.as_slice())
            }
            ResourceCommands::Create {
                server_id,
                name,
                resource_type,
                mode,
                description,
            } => {
                super::require_id(server_id, "Server ID is required")?;
                super::require(name, "Resource name is required")?;
                let session = self.ctx.session()?;

                let resource = NewResource {
                    name: name.clone(),
                    description: description.clone(),
                    resource_type: ResourceType::from(*resource_type),
                    mode: ResourceMode::from(*mode),
                };
                let created = self
                    .ctx
                    .client()
                    .create_resource(&session, server_id, &resource)
                    .await?;
                format.write(out, &created)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{ResourceModeArg, ResourceTypeArg};
    use crate::commands::testing::{context, json, parse, table};
    use serde_json::json as body;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn create_exchange_resource() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/protected/servers/srv1/resources"))
            .and(body_json(body!({
                "name": "orders",
                "description": "",
                "resource_type": "exchange",
                "mode": "write",
                "server_id": "srv1"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(body!({
                "id": "r1", "name": "orders", "resource_type": "exchange", "mode": "write"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let ctx = context(&server);
        let mut out = Vec::new();
        ResourcesCommand::new(&ctx)
            .execute(
                &mut out,
                &json(),
                &ResourceCommands::Create {
                    server_id: "srv1".into(),
                    name: "orders".into(),
                    resource_type: ResourceTypeArg::Exchange,
                    mode: ResourceModeArg::Write,
                    description: String::new(),
                },
            )
            .await
            .unwrap();
        assert_eq!(parse(&out)["id"], "r1");
    }

    #[tokio::test]
    async fn blank_server_id_is_rejected() {
        let server = MockServer::start().await;
        let ctx = context(&server);
        let err = ResourcesCommand::new(&ctx)
            .execute(
                &mut Vec::new(),
                &json(),
                &ResourceCommands::List {
                    server_id: String::new(),
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "invalid argument: Server ID is required");
    }

    #[tokio::test]
    async fn list_table_shows_mode() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/protected/servers/srv1/resources"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body!([
                {"id": "r1", "name": "orders", "resource_type": "topic", "mode": "readwrite", "status": "active"}
            ])))
            .mount(&server)
            .await;

        let ctx = context(&server);
        let mut out = Vec::new();
        ResourcesCommand::new(&ctx)
            .execute(
                &mut out,
                &table(),
                &ResourceCommands::List {
                    server_id: "srv1".into(),
                },
            )
            .await
            .unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("readwrite"));
        assert!(out.contains("topic"));
    }
}
