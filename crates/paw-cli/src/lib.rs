//! # paw-cli
//!
//! Command-line client for the fusioncat platform.
//!
//! Provides commands for:
//! - Settings file initialisation
//! - Sign-up, sign-in and token inspection
//! - Projects, workspaces, apps, schemas, messages, servers and resources
//! - Code generation
//!
//! # Architecture
//!
//! Every command resolves the backend host (from `FC_HOST`/`--host` or
//! `fcsettings.yaml`), builds a [`context::Context`] around a
//! [`paw_client::ApiClient`], and writes its result through
//! [`output::OutputFormat`].
//!
//! ```text
//! ┌───────────┐      REST / JSON      ┌──────────────────┐
//! │    paw    │◄─────────────────────►│ fusioncat server │
//! └───────────┘    (Bearer token)     └──────────────────┘
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cli;
pub mod commands;
pub mod context;
pub mod error;
pub mod output;

pub use cli::{Cli, Commands, Format};
pub use context::Context;
pub use error::CliError;
pub use output::OutputFormat;
