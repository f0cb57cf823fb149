//! Authentication command implementation.
//!
//! Handles sign-up, sign-in and the current-user lookup.

use std::io::Write;

use paw_client::{Session, TOKEN_ENV};
use tracing::debug;

use crate::cli::AuthCommands;
use crate::context::Context;
use crate::error::CliError;
use crate::output::{OutputFormat, TokenOutput};

/// Handler for auth subcommands.
pub struct AuthCommand<'a> {
    ctx: &'a Context,
}

impl<'a> AuthCommand<'a> {
    /// Creates a new auth command handler.
    #[must_use]
    pub const fn new(ctx: &'a Context) -> Self {
        Self { ctx }
    }

    /// Executes the auth subcommand.
    ///
    /// # Errors
    ///
    /// Returns error if the command fails.
    pub async fn execute<W: Write>(
        &self,
        out: &mut W,
        format: &OutputFormat,
        command: &AuthCommands,
    ) -> Result<(), CliError> {
        match command {
            AuthCommands::Signup { email, password } => {
                validate_credentials(email, password)?;
                let session = self.ctx.client().sign_up(email, password).await?;
                write_token(out, format, &session)
            }
            AuthCommands::Signin { email, password } => {
                validate_credentials(email, password)?;
                let session = self.ctx.client().sign_in(email, password).await?;
                write_token(out, format, &session)
            }
            AuthCommands::Me => {
                let session = self.ctx.session()?;
                let user = self.ctx.client().me(&session).await?;
                format.write(out, &user)
            }
        }
    }
}

fn validate_credentials(email: &str, password: &str) -> Result<(), CliError> {
    super::require(email, "Email is required")?;
    super::require(password, "Password is required")
}

fn write_token<W: Write>(
    out: &mut W,
    format: &OutputFormat,
    session: &Session,
) -> Result<(), CliError> {
    debug!("Authenticated");
    eprintln!("Export the token as {TOKEN_ENV} to use it in later commands");
    format.write(
        out,
        &TokenOutput {
            token: session.token().to_string(),
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{TOKEN, anonymous, context, json, parse, table};
    use serde_json::json as body;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn signup_prints_token_as_json() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/public/users"))
            .respond_with(ResponseTemplate::new(201).insert_header("Authorization", "Bearer new-tok"))
            .expect(1)
            .mount(&server)
            .await;

        let ctx = anonymous(&server);
        let mut out = Vec::new();
        AuthCommand::new(&ctx)
            .execute(
                &mut out,
                &json(),
                &AuthCommands::Signup {
                    email: "a@b.dev".into(),
                    password: "pw".into(),
                },
            )
            .await
            .unwrap();

        assert_eq!(parse(&out)["token"], "new-tok");
    }

    #[tokio::test]
    async fn signin_prints_raw_token_as_table() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/public/authentication"))
            .respond_with(ResponseTemplate::new(200).insert_header("Authorization", "Bearer tok-2"))
            .mount(&server)
            .await;

        let ctx = anonymous(&server);
        let mut out = Vec::new();
        AuthCommand::new(&ctx)
            .execute(
                &mut out,
                &table(),
                &AuthCommands::Signin {
                    email: "a@b.dev".into(),
                    password: "pw".into(),
                },
            )
            .await
            .unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "tok-2\n");
    }

    #[tokio::test]
    async fn blank_email_sends_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let ctx = anonymous(&server);
        let err = AuthCommand::new(&ctx)
            .execute(
                &mut Vec::new(),
                &json(),
                &AuthCommands::Signin {
                    email: String::new(),
                    password: "pw".into(),
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "invalid argument: Email is required");
    }

    #[tokio::test]
    async fn me_uses_session_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/protected/me"))
            .and(header("Authorization", format!("Bearer {TOKEN}").as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(body!({"id": "u1", "handle": "cat"})))
            .expect(1)
            .mount(&server)
            .await;

        let ctx = context(&server);
        let mut out = Vec::new();
        AuthCommand::new(&ctx)
            .execute(&mut out, &json(), &AuthCommands::Me)
            .await
            .unwrap();
        assert_eq!(parse(&out)["id"], "u1");
    }

    #[tokio::test]
    async fn me_without_token_fails_locally() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let ctx = anonymous(&server);
        let err = AuthCommand::new(&ctx)
            .execute(&mut Vec::new(), &json(), &AuthCommands::Me)
            .await
            .unwrap_err();
        assert!(matches!(err, CliError::InvalidArgument(_)));
    }
}
