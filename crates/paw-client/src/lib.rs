//! Client library for the fusioncat platform.
//!
//! Fusioncat manages event-driven architectures: projects group apps,
//! versioned schemas, messages bound to schema versions, and servers
//! (Kafka, AMQP, MQTT, ...) with their resources. This crate provides:
//!
//! - [`ApiClient`]: typed async calls to the fusioncat REST API
//! - [`Session`]: the bearer token passed to every protected call
//! - [`Settings`]: the per-directory `fcsettings.yaml` file
//! - [`ClientConfig`]: backend host resolution from environment or settings
//!
//! # Example
//!
//! ```rust,no_run
//! use paw_client::{ApiClient, ClientConfig, Session};
//!
//! # async fn example() -> Result<(), paw_client::ClientError> {
//! let config = ClientConfig::resolve(std::env::var("FC_HOST").ok().as_deref(), ".")?;
//! let client = ApiClient::from_config(&config)?;
//! let session = Session::new(std::env::var("FC_ACCESS_TOKEN").unwrap_or_default())?;
//!
//! let me = client.me(&session).await?;
//! println!("signed in as {}", me.handle);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod client;
pub mod config;
pub mod error;
pub mod session;
pub mod settings;
pub mod types;

pub use client::ApiClient;
pub use config::{ClientConfig, HOST_ENV, HostSource, TOKEN_ENV, resolve_host};
pub use error::ClientError;
pub use session::Session;
pub use settings::{DEFAULT_SERVER, SETTINGS_FILE, Settings};
pub use types::{
    App, Language, Message, NewMessage, NewProject, NewResource, NewSchema, NewServer, Ownership,
    Project, Resource, ResourceMode, ResourceType, Schema, SchemaVersion, Server, ServerBind,
    ServerList, ServerResource, User, Workspace, WorkspaceMembership,
};
