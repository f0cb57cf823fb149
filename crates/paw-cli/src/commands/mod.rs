//! CLI command implementations.
//!
//! Each submodule implements a specific CLI command:
//! - [`init_settings`] - Settings file creation
//! - [`auth`] - Sign-up, sign-in, current user
//! - [`projects`] - Project management and YAML import
//! - [`workspaces`] - Workspace management
//! - [`apps`] - App management
//! - [`schemas`] - Schemas and their versions
//! - [`messages`] - Message management
//! - [`servers`] - Server management
//! - [`resources`] - Server resources
//! - [`codegen`] - Code generation

use std::path::Path;

use crate::error::CliError;

pub mod apps;
pub mod auth;
pub mod codegen;
pub mod init_settings;
pub mod messages;
pub mod projects;
pub mod resources;
pub mod schemas;
pub mod servers;
pub mod workspaces;

pub use apps::AppsCommand;
pub use auth::AuthCommand;
pub use codegen::CodegenCommand;
pub use init_settings::InitSettingsCommand;
pub use messages::MessagesCommand;
pub use projects::ProjectsCommand;
pub use resources::ResourcesCommand;
pub use schemas::SchemasCommand;
pub use servers::ServersCommand;
pub use workspaces::WorkspacesCommand;

/// Reject a blank flag value.
fn require(value: &str, message: &str) -> Result<(), CliError> {
    if value.trim().is_empty() {
        return Err(CliError::invalid(message));
    }
    Ok(())
}

/// Reject a blank id, or one that is not a single path segment.
fn require_id(value: &str, message: &str) -> Result<(), CliError> {
    require(value, message)?;
    if value == "." || value == ".." || value.contains('/') {
        return Err(CliError::invalid(format!("Invalid identifier '{value}'")));
    }
    Ok(())
}

/// Read a user-supplied file, reporting a missing one by path.
fn read_file(path: &Path) -> Result<String, CliError> {
    if !path.is_file() {
        return Err(CliError::invalid(format!(
            "File not found: {}",
            path.display()
        )));
    }
    Ok(std::fs::read_to_string(path)?)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_rejects_blank_values() {
        let err = require(" ", "Project ID is required").unwrap_err();
        assert_eq!(err.to_string(), "invalid argument: Project ID is required");
        assert!(require("p1", "Project ID is required").is_ok());
    }

    #[test]
    fn require_id_rejects_path_segments() {
        for id in [".", "..", "../etc", "a/b"] {
            let err = require_id(id, "App ID is required").unwrap_err();
            assert_eq!(
                err.to_string(),
                format!("invalid argument: Invalid identifier '{id}'")
            );
        }
        let err = require_id("", "App ID is required").unwrap_err();
        assert_eq!(err.to_string(), "invalid argument: App ID is required");
        assert!(require_id("a1", "App ID is required").is_ok());
    }

    #[test]
    fn read_file_reports_missing_path() {
        let err = read_file(Path::new("/nonexistent/schema.json")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid argument: File not found: /nonexistent/schema.json"
        );
    }
}
