//! HTTP client for the fusioncat REST API.
//!
//! One async method per backend capability. Each call is a single request:
//! no retries, no backoff, no timeout. Protected endpoints take an explicit
//! [`Session`]; the client itself holds no credentials.
//!
//! # Example
//!
//! ```rust,no_run
//! use paw_client::ApiClient;
//!
//! # async fn example() -> Result<(), paw_client::ClientError> {
//! let client = ApiClient::new("https://api.fusioncat.dev")?;
//! let session = client.sign_in("me@example.com", "hunter2").await?;
//! for project in client.list_projects(&session).await? {
//!     println!("{} {}", project.id, project.name);
//! }
//! # Ok(())
//! # }
//! ```

use reqwest::header::AUTHORIZATION;
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, trace};
use url::Url;

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::session::Session;
use crate::types::{
    App, Language, Message, NewMessage, NewProject, NewResource, NewSchema, NewServer, Project,
    Resource, Schema, SchemaVersion, Server, ServerList, User, Workspace, WorkspaceMembership,
};

/// API version prefix of every endpoint.
const API_VERSION: &str = "v1";

/// Fusioncat API client.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base: Url,
    http: reqwest::Client,
}

#[derive(Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct NamedBody<'a> {
    name: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    description: &'a str,
}

#[derive(Serialize)]
struct ImportBody<'a> {
    yaml: &'a str,
}

#[derive(Serialize)]
struct SchemaBody<'a> {
    name: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    description: &'a str,
    #[serde(rename = "type")]
    schema_type: &'a str,
    schema: String,
}

#[derive(Serialize)]
struct SchemaUpdateBody {
    schema: String,
}

#[derive(Serialize)]
struct ResourceBody<'a> {
    #[serde(flatten)]
    resource: &'a NewResource,
    server_id: &'a str,
}

impl ApiClient {
    /// Create a client for the backend at `host`.
    ///
    /// # Errors
    ///
    /// Returns an error if `host` is not an absolute URL or the HTTP
    /// transport cannot be initialised.
    pub fn new(host: &str) -> Result<Self, ClientError> {
        let base = Url::parse(host)
            .map_err(|e| ClientError::Config(format!("invalid host URL '{host}': {e}")))?;
        if base.cannot_be_a_base() {
            return Err(ClientError::Config(format!(
                "invalid host URL '{host}': cannot be used as a base"
            )));
        }

        let http = reqwest::Client::builder()
            .user_agent(concat!("paw/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ClientError::Transport(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { base, http })
    }

    /// Create a client from a resolved configuration.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::new`].
    pub fn from_config(config: &ClientConfig) -> Result<Self, ClientError> {
        Self::new(&config.host)
    }

    // ========================================================================
    // Request plumbing
    // ========================================================================

    /// Join the base URL with `v1/<segments>`, percent-encoding each segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| ClientError::Config(format!("invalid host URL '{}'", self.base)))?
            .pop_if_empty()
            .push(API_VERSION)
            .extend(segments);
        Ok(url)
    }

    fn request(
        &self,
        method: Method,
        segments: &[&str],
        session: Option<&Session>,
    ) -> Result<RequestBuilder, ClientError> {
        let url = self.endpoint(segments)?;
        debug!(method = %method, url = %url, "Sending request");

        let builder = self.http.request(method, url);
        Ok(match session {
            Some(session) => builder.header(AUTHORIZATION, session.bearer()),
            None => builder,
        })
    }

    /// Send a request and turn non-2xx responses into [`ClientError::Api`].
    async fn send(&self, builder: RequestBuilder) -> Result<Response, ClientError> {
        let response = builder
            .send()
            .await
            .map_err(|e| ClientError::Transport(format!("failed to send request: {e}")))?;

        let status = response.status();
        debug!(status = status.as_u16(), "Received response");

        if status.is_success() {
            Ok(response)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(ClientError::Api {
                status: status.as_u16(),
                body,
            })
        }
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> Result<T, ClientError> {
        let response = self.send(builder).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ClientError::Transport(format!("failed to read response body: {e}")))?;
        trace!(len = bytes.len(), "Decoding response body");

        serde_json::from_slice(&bytes)
            .map_err(|e| ClientError::Decode(format!("failed to parse response: {e}")))
    }

    /// Like [`send_json`](Self::send_json), reading `null` as an empty list.
    async fn send_list<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> Result<Vec<T>, ClientError> {
        let items: Option<Vec<T>> = self.send_json(builder).await?;
        Ok(items.unwrap_or_default())
    }

    async fn authenticate(
        &self,
        segments: &[&str],
        email: &str,
        password: &str,
    ) -> Result<Session, ClientError> {
        let builder = self
            .request(Method::POST, segments, None)?
            .json(&Credentials { email, password });
        let response = self.send(builder).await?;

        let header = response
            .headers()
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default();

        Session::new(header)
            .map_err(|_| ClientError::Decode("no authorization header in response".into()))
    }

    // ========================================================================
    // Authentication
    // ========================================================================

    /// Create a new account and return its session.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response carries no token.
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<Session, ClientError> {
        self.authenticate(&["public", "users"], email, password).await
    }

    /// Sign in to an existing account.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response carries no token.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session, ClientError> {
        self.authenticate(&["public", "authentication"], email, password)
            .await
    }

    /// Owner of the session's token.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn me(&self, session: &Session) -> Result<User, ClientError> {
        let builder = self.request(Method::GET, &["protected", "me"], Some(session))?;
        self.send_json(builder).await
    }

    // ========================================================================
    // Projects
    // ========================================================================

    /// Projects visible to the session.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn list_projects(&self, session: &Session) -> Result<Vec<Project>, ClientError> {
        let builder = self.request(Method::GET, &["protected", "projects"], Some(session))?;
        self.send_list(builder).await
    }

    /// Create a project.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn create_project(
        &self,
        session: &Session,
        project: &NewProject,
    ) -> Result<Project, ClientError> {
        require(&project.name, "project name")?;
        require(&project.created_by_id, "owner ID")?;

        let builder = self
            .request(Method::POST, &["protected", "projects"], Some(session))?
            .json(project);
        self.send_json(builder).await
    }

    /// Import a YAML project definition into an existing project.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn import_project(
        &self,
        session: &Session,
        project_id: &str,
        yaml: &str,
    ) -> Result<Project, ClientError> {
        require_id(project_id, "project ID")?;

        let builder = self
            .request(
                Method::POST,
                &["protected", "projects", project_id, "imports"],
                Some(session),
            )?
            .json(&ImportBody { yaml });
        self.send_json(builder).await
    }

    // ========================================================================
    // Workspaces
    // ========================================================================

    /// Workspaces the session's user belongs to.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn list_workspaces(
        &self,
        session: &Session,
    ) -> Result<Vec<WorkspaceMembership>, ClientError> {
        let builder = self.request(Method::GET, &["protected", "workspaces"], Some(session))?;
        self.send_list(builder).await
    }

    /// Create a workspace.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn create_workspace(
        &self,
        session: &Session,
        name: &str,
        description: &str,
    ) -> Result<Workspace, ClientError> {
        require(name, "workspace name")?;

        let builder = self
            .request(Method::POST, &["protected", "workspaces"], Some(session))?
            .json(&NamedBody { name, description });
        self.send_json(builder).await
    }

    // ========================================================================
    // Apps
    // ========================================================================

    /// Apps of a project.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn list_apps(
        &self,
        session: &Session,
        project_id: &str,
    ) -> Result<Vec<App>, ClientError> {
        require_id(project_id, "project ID")?;

        let builder = self.request(
            Method::GET,
            &["protected", "projects", project_id, "apps"],
            Some(session),
        )?;
        self.send_list(builder).await
    }

    /// Create an app in a project.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn create_app(
        &self,
        session: &Session,
        project_id: &str,
        name: &str,
        description: &str,
    ) -> Result<App, ClientError> {
        require_id(project_id, "project ID")?;
        require(name, "app name")?;

        let builder = self
            .request(
                Method::POST,
                &["protected", "projects", project_id, "apps"],
                Some(session),
            )?
            .json(&NamedBody { name, description });
        self.send_json(builder).await
    }

    // ========================================================================
    // Schemas
    // ========================================================================

    /// Schemas of a project.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn list_schemas(
        &self,
        session: &Session,
        project_id: &str,
    ) -> Result<Vec<Schema>, ClientError> {
        require_id(project_id, "project ID")?;

        let builder = self.request(
            Method::GET,
            &["protected", "projects", project_id, "schemas"],
            Some(session),
        )?;
        self.send_list(builder).await
    }

    /// Create a schema in a project.
    ///
    /// The content is checked to be valid JSON before anything is sent.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] for invalid content, or an error if
    /// the request fails.
    pub async fn create_schema(
        &self,
        session: &Session,
        project_id: &str,
        schema: &NewSchema,
    ) -> Result<Schema, ClientError> {
        require_id(project_id, "project ID")?;
        require(&schema.name, "schema name")?;
        require(&schema.schema_type, "schema type")?;
        let content = compact_json(&schema.content)?;

        let builder = self
            .request(
                Method::POST,
                &["protected", "projects", project_id, "schemas"],
                Some(session),
            )?
            .json(&SchemaBody {
                name: &schema.name,
                description: &schema.description,
                schema_type: &schema.schema_type,
                schema: content,
            });
        self.send_json(builder).await
    }

    /// Replace a schema's content, recording a new version.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] for invalid content, or an error if
    /// the request fails.
    pub async fn update_schema(
        &self,
        session: &Session,
        schema_id: &str,
        content: &str,
    ) -> Result<Schema, ClientError> {
        require_id(schema_id, "schema ID")?;
        let schema = compact_json(content)?;

        let builder = self
            .request(Method::PUT, &["protected", "schemas", schema_id], Some(session))?
            .json(&SchemaUpdateBody { schema });
        self.send_json(builder).await
    }

    /// Historical versions of a schema.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn list_schema_versions(
        &self,
        session: &Session,
        schema_id: &str,
    ) -> Result<Vec<SchemaVersion>, ClientError> {
        require_id(schema_id, "schema ID")?;

        let builder = self.request(
            Method::GET,
            &["protected", "schemas", schema_id, "versions"],
            Some(session),
        )?;
        self.send_list(builder).await
    }

    /// One version of a schema.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn get_schema_version(
        &self,
        session: &Session,
        schema_id: &str,
        version: &str,
    ) -> Result<SchemaVersion, ClientError> {
        require_id(schema_id, "schema ID")?;
        require_id(version, "version ID")?;

        let builder = self.request(
            Method::GET,
            &["protected", "schemas", schema_id, "versions", version],
            Some(session),
        )?;
        self.send_json(builder).await
    }

    // ========================================================================
    // Messages
    // ========================================================================

    /// Messages of a project.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn list_messages(
        &self,
        session: &Session,
        project_id: &str,
    ) -> Result<Vec<Message>, ClientError> {
        require_id(project_id, "project ID")?;

        let builder = self.request(
            Method::GET,
            &["protected", "projects", project_id, "messages"],
            Some(session),
        )?;
        self.send_list(builder).await
    }

    /// Create a message in a project.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn create_message(
        &self,
        session: &Session,
        project_id: &str,
        message: &NewMessage,
    ) -> Result<Message, ClientError> {
        require_id(project_id, "project ID")?;
        require(&message.name, "message name")?;
        require(&message.schema_id, "schema ID")?;

        let builder = self
            .request(
                Method::POST,
                &["protected", "projects", project_id, "messages"],
                Some(session),
            )?
            .json(message);
        self.send_json(builder).await
    }

    // ========================================================================
    // Servers & Resources
    // ========================================================================

    /// Servers of a project.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn list_servers(
        &self,
        session: &Session,
        project_id: &str,
    ) -> Result<ServerList, ClientError> {
        require_id(project_id, "project ID")?;

        let builder = self.request(
            Method::GET,
            &["protected", "projects", project_id, "servers"],
            Some(session),
        )?;
        let servers: Vec<Server> = self.send_list(builder).await?;
        Ok(ServerList::from(servers))
    }

    /// Create a server in a project.
    ///
    /// The server type is validated by the backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn create_server(
        &self,
        session: &Session,
        project_id: &str,
        server: &NewServer,
    ) -> Result<Server, ClientError> {
        require_id(project_id, "project ID")?;
        require(&server.name, "server name")?;
        require(&server.server_type, "server type")?;

        let builder = self
            .request(
                Method::POST,
                &["protected", "projects", project_id, "servers"],
                Some(session),
            )?
            .json(server);
        self.send_json(builder).await
    }

    /// Resources of a server.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn list_resources(
        &self,
        session: &Session,
        server_id: &str,
    ) -> Result<Vec<Resource>, ClientError> {
        require_id(server_id, "server ID")?;

        let builder = self.request(
            Method::GET,
            &["protected", "servers", server_id, "resources"],
            Some(session),
        )?;
        self.send_list(builder).await
    }

    /// Create a resource on a server.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn create_resource(
        &self,
        session: &Session,
        server_id: &str,
        resource: &NewResource,
    ) -> Result<Resource, ClientError> {
        require_id(server_id, "server ID")?;
        require(&resource.name, "resource name")?;

        let builder = self
            .request(
                Method::POST,
                &["protected", "servers", server_id, "resources"],
                Some(session),
            )?
            .json(&ResourceBody {
                resource,
                server_id,
            });
        self.send_json(builder).await
    }

    // ========================================================================
    // Code generation
    // ========================================================================

    /// Generated source code of an app, as raw text.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn generate_app_code(
        &self,
        session: &Session,
        app_id: &str,
        language: Language,
    ) -> Result<String, ClientError> {
        require_id(app_id, "app ID")?;

        let builder = self.request(
            Method::GET,
            &["protected", "apps", app_id, "code", language.as_str()],
            Some(session),
        )?;
        let response = self.send(builder).await?;
        response
            .text()
            .await
            .map_err(|e| ClientError::Transport(format!("failed to read response body: {e}")))
    }
}

/// Reject blank identifiers and names before they reach a URL or body.
fn require(value: &str, what: &str) -> Result<(), ClientError> {
    if value.trim().is_empty() {
        return Err(ClientError::Validation(format!("{what} is required")));
    }
    Ok(())
}

/// Like [`require`], also rejecting ids that would escape their path segment.
fn require_id(value: &str, what: &str) -> Result<(), ClientError> {
    require(value, what)?;
    if value == "." || value == ".." || value.contains('/') {
        return Err(ClientError::Validation(format!("invalid {what} '{value}'")));
    }
    Ok(())
}

/// Validate a JSON document and re-encode it compactly.
fn compact_json(content: &str) -> Result<String, ClientError> {
    let value: serde_json::Value = serde_json::from_str(content)
        .map_err(|e| ClientError::Validation(format!("invalid schema content: {e}")))?;
    Ok(value.to_string())
}
