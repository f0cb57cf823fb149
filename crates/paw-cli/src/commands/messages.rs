//! Message command implementation.

use std::io::Write;

use paw_client::NewMessage;

use crate::cli::MessageCommands;
use crate::context::Context;
use crate::error::CliError;
use crate::output::OutputFormat;

/// Handler for message subcommands.
pub struct MessagesCommand<'a> {
    ctx: &'a Context,
}

impl<'a> MessagesCommand<'a> {
    /// Creates a new message command handler.
    #[must_use]
    pub const fn new(ctx: &'a Context) -> Self {
        Self { ctx }
    }

    /// Executes the message subcommand.
    ///
    /// # Errors
    ///
    /// Returns error if validation or the request fails.
    pub async fn execute<W: Write>(
        &self,
        out: &mut W,
        format: &OutputFormat,
        command: &MessageCommands,
    ) -> Result<(), CliError> {
        match command {
            MessageCommands::List { project_id } => {
                super::require_id(project_id, "Project ID is required")?;
                let session = self.ctx.session()?;
                let messages = self.ctx.client().list_messages(&session, project_id).await?;
                format.write(out, messages.as_slice())
            }
            MessageCommands::Create {
                project_id,
                name,
                schema_id,
                schema_version,
                description,
            } => {
                super::require_id(project_id, "Project ID is required")?;
                super::require(name, "Message name is required")?;
                super::require(schema_id, "Schema ID is required")?;
                if *schema_version < 1 {
                    return Err(CliError::invalid("Schema version is required and must be at least 1"));
                }
                let session = self.ctx.session()?;

                let message = NewMessage {
                    name: name.clone(),
                    description: description.clone(),
                    schema_id: schema_id.clone(),
                    schema_version: *schema_version,
                };
                let created = self
                    .ctx
                    .client()
                    .create_message(&session, project_id, &message)
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
    use test_case::test_case;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn create(name: &str, schema_id: &str, schema_version: i64) -> MessageCommands {
        MessageCommands::Create {
            project_id: "p1".into(),
            name: name.into(),
            schema_id: schema_id.into(),
            schema_version,
            description: String::new(),
        }
    }

    #[tokio::test]
    async fn create_posts_schema_reference() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/protected/projects/p1/messages"))
            .and(body_json(body!({
                "name": "PersonCreated", "schema_id": "s1", "schema_version": 2
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(body!({
                "id": "m1", "name": "PersonCreated", "schema_id": "s1", "schema_version": 2
            })))
            .expect(1)
            .mount(&server)
            .await;

        let ctx = context(&server);
        let mut out = Vec::new();
        MessagesCommand::new(&ctx)
            .execute(&mut out, &json(), &create("PersonCreated", "s1", 2))
            .await
            .unwrap();
        assert_eq!(parse(&out)["schema_version"], 2);
    }

    #[test_case("", "s1", 1, "Message name is required" ; "blank name")]
    #[test_case("PersonCreated", "", 1, "Schema ID is required" ; "blank schema id")]
    #[test_case("PersonCreated", "s1", 0, "Schema version is required" ; "zero version")]
    #[test_case("PersonCreated", "s1", -3, "Schema version is required" ; "negative version")]
    #[tokio::test]
    async fn create_rejects_invalid_input(name: &str, schema_id: &str, version: i64, expected: &str) {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(201))
            .expect(0)
            .mount(&server)
            .await;

        let ctx = context(&server);
        let err = MessagesCommand::new(&ctx)
            .execute(&mut Vec::new(), &json(), &create(name, schema_id, version))
            .await
            .unwrap_err();
        assert!(err.to_string().contains(expected), "{err}");
    }

    #[tokio::test]
    async fn list_table_shows_version() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/protected/projects/p1/messages"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body!([
                {"id": "m1", "name": "PersonCreated", "schema_id": "s1", "schema_version": 3}
            ])))
            .mount(&server)
            .await;

        let ctx = context(&server);
        let mut out = Vec::new();
        MessagesCommand::new(&ctx)
            .execute(
                &mut out,
                &table(),
                &MessageCommands::List {
                    project_id: "p1".into(),
                },
            )
            .await
            .unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("PersonCreated"));
        assert!(out.contains('3'));
    }
}
