//! Wire types for the fusioncat API.
//!
//! Response types mirror the backend's JSON payloads field for field. Unknown
//! fields are ignored and absent optional fields fall back to their defaults,
//! so older or newer servers still decode.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ClientError;

// ============================================================================
// Enumerations
// ============================================================================

/// Target language for code generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// TypeScript.
    #[default]
    Typescript,
    /// Python.
    Python,
    /// Java.
    Java,
    /// Go.
    Go,
}

impl Language {
    /// All supported languages.
    pub const ALL: [Self; 4] = [Self::Typescript, Self::Python, Self::Java, Self::Go];

    /// Name used in URLs and the settings file.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Typescript => "typescript",
            Self::Python => "python",
            Self::Java => "java",
            Self::Go => "go",
        }
    }

    /// File extension of generated sources.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Typescript => "ts",
            Self::Python => "py",
            Self::Java => "java",
            Self::Go => "go",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|lang| lang.as_str() == s)
            .ok_or_else(|| {
                ClientError::Validation(format!(
                    "invalid language: {s}. Must be one of: typescript, python, java, go"
                ))
            })
    }
}

/// Who owns a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ownership {
    /// Owned by the signed-in user.
    User,
    /// Owned by a workspace.
    Workspace,
}

/// Kind of addressable unit inside a server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    /// Kafka topic.
    Topic,
    /// AMQP exchange.
    Exchange,
    /// Queue.
    Queue,
    /// Database table.
    Table,
    /// HTTP endpoint.
    Endpoint,
}

/// Access mode of a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceMode {
    /// Consume only.
    Read,
    /// Produce only.
    Write,
    /// Binding between resources.
    Bind,
    /// Consume and produce.
    #[serde(rename = "readwrite")]
    ReadWrite,
}

// ============================================================================
// Users & Workspaces
// ============================================================================

/// Owner of the current access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// User ID.
    pub id: String,
    /// Public handle.
    #[serde(default)]
    pub handle: String,
    /// Account status.
    #[serde(default)]
    pub status: String,
}

/// A group of users sharing projects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workspace {
    /// Workspace ID.
    pub id: String,
    /// Workspace name.
    pub name: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Workspace status.
    #[serde(default)]
    pub status: String,
    /// Number of projects in the workspace.
    #[serde(default)]
    pub projects: u32,
    /// Number of members.
    #[serde(default)]
    pub users: u32,
}

/// A workspace together with the caller's role in it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceMembership {
    /// Caller's role.
    #[serde(default)]
    pub role: String,
    /// The workspace.
    pub workspace: Workspace,
}

// ============================================================================
// Projects & Apps
// ============================================================================

/// A fusioncat project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Project ID.
    pub id: String,
    /// Project name.
    pub name: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Owner kind.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by_type: Option<Ownership>,
    /// Owner ID (user or workspace).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by_id: Option<String>,
    /// Whether the project is private.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_private: Option<bool>,
}

/// Request body for creating a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewProject {
    /// Project name.
    pub name: String,
    /// Optional description.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Owner kind.
    pub created_by_type: Ownership,
    /// Owner ID.
    pub created_by_id: String,
    /// Whether the project is private.
    pub is_private: bool,
}

/// An application inside a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct App {
    /// App ID.
    pub id: String,
    /// App name.
    pub name: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// App status.
    #[serde(default)]
    pub status: String,
    /// Owning project.
    #[serde(default)]
    pub project_id: String,
    /// Creation time.
    #[serde(
        default,
        deserialize_with = "timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update time.
    #[serde(
        default,
        deserialize_with = "timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<DateTime<Utc>>,
}

// ============================================================================
// Schemas & Messages
// ============================================================================

/// A versioned structural definition referenced by messages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    /// Schema ID.
    pub id: String,
    /// Schema name.
    pub name: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Schema language, e.g. `jsonschema`.
    #[serde(rename = "type", default)]
    pub schema_type: String,
    /// Current content. Opaque to the client.
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub schema: serde_json::Value,
    /// Owning project.
    #[serde(default)]
    pub project_id: String,
    /// Creation time.
    #[serde(
        default,
        deserialize_with = "timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update time.
    #[serde(
        default,
        deserialize_with = "timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Request body for creating a schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSchema {
    /// Schema name.
    pub name: String,
    /// Optional description.
    pub description: String,
    /// Schema language, e.g. `jsonschema`.
    pub schema_type: String,
    /// Raw schema document; must be valid JSON.
    pub content: String,
}

/// One historical revision of a schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaVersion {
    /// Schema this version belongs to.
    pub schema_id: String,
    /// Version number, starting at 1.
    pub version: i64,
    /// Content at this version.
    #[serde(default)]
    pub schema: serde_json::Value,
    /// When the version was recorded.
    #[serde(
        default,
        deserialize_with = "timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
    /// Author display name.
    #[serde(default)]
    pub created_by_name: String,
    /// Author ID.
    #[serde(default)]
    pub user_id: String,
}

/// A message bound to a schema version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Message ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Message name.
    pub name: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Referenced schema.
    pub schema_id: String,
    /// Referenced schema version.
    pub schema_version: i64,
}

/// Request body for creating a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewMessage {
    /// Message name.
    pub name: String,
    /// Optional description.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Referenced schema.
    pub schema_id: String,
    /// Referenced schema version.
    pub schema_version: i64,
}

// ============================================================================
// Servers & Resources
// ============================================================================

/// A named resource declared on a server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerResource {
    /// Resource name.
    pub name: String,
    /// Access mode.
    pub mode: String,
    /// Resource kind.
    #[serde(rename = "type")]
    pub resource_type: String,
    /// Free-form description.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Name on the broker, if different.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub resource_name: String,
}

/// A routing rule between two resources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerBind {
    /// Source resource.
    pub source: String,
    /// Destination resource.
    pub destination: String,
    /// Optional routing key.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub routing_key: String,
}

/// A message-broker or endpoint connection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Server {
    /// Server ID.
    #[serde(default)]
    pub id: String,
    /// Server name.
    pub name: String,
    /// Protocol, e.g. `async+kafka`.
    #[serde(default)]
    pub protocol: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Server status.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub status: String,
    /// Owning project.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub project_id: String,
    /// Creator ID.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub user_id: String,
    /// Creator display name.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub created_by_user_name: String,
    /// Declared resources.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resources: Vec<ServerResource>,
    /// Bind rules.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub binds: Vec<ServerBind>,
}

/// Request body for creating a server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewServer {
    /// Server name.
    pub name: String,
    /// Protocol, e.g. `async+kafka`. Validated by the backend.
    #[serde(rename = "type")]
    pub server_type: String,
    /// Description.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
}

/// Servers of a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerList {
    /// The servers.
    pub servers: Vec<Server>,
    /// Number of servers.
    pub total: usize,
}

impl From<Vec<Server>> for ServerList {
    fn from(servers: Vec<Server>) -> Self {
        let total = servers.len();
        Self { servers, total }
    }
}

/// A resource registered on a server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    /// Resource ID.
    pub id: String,
    /// Resource name.
    pub name: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Resource kind.
    pub resource_type: String,
    /// Access mode.
    pub mode: String,
    /// Owning server.
    #[serde(default)]
    pub server_id: String,
    /// Owning project.
    #[serde(default)]
    pub project_id: String,
    /// Creator ID.
    #[serde(default)]
    pub created_by_user_id: String,
    /// Creator display name.
    #[serde(default)]
    pub created_by_user_name: String,
    /// Resource status.
    #[serde(default)]
    pub status: String,
    /// Creation time.
    #[serde(
        default,
        deserialize_with = "timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update time.
    #[serde(
        default,
        deserialize_with = "timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Request body for creating a resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewResource {
    /// Resource name.
    pub name: String,
    /// Description.
    pub description: String,
    /// Resource kind.
    pub resource_type: ResourceType,
    /// Access mode.
    pub mode: ResourceMode,
}

/// RFC 3339 timestamp where `null` and `""` both mean unset.
fn timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) if !raw.trim().is_empty() => DateTime::parse_from_rfc3339(&raw)
            .map(|t| Some(t.with_timezone(&Utc)))
            .map_err(serde::de::Error::custom),
        _ => Ok(None),
    }
}
