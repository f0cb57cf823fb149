//! Output formatting for CLI commands.
//!
//! Supports JSON (default, for scripting) and table (human-readable) output.

use std::io::Write;
use std::path::PathBuf;

use paw_client::{
    App, Message, Project, Resource, Schema, SchemaVersion, Server, ServerList, User, Workspace,
    WorkspaceMembership,
};
use serde::Serialize;

use crate::cli::Format;
use crate::error::CliError;

/// Output formatter that handles both table and JSON output.
#[derive(Debug, Clone)]
pub struct OutputFormat {
    format: Format,
}

impl OutputFormat {
    /// Create a new output formatter.
    #[must_use]
    pub const fn new(format: Format) -> Self {
        Self { format }
    }

    /// Get the current format.
    #[must_use]
    pub const fn format(&self) -> Format {
        self.format
    }

    /// Check if JSON format is selected.
    #[must_use]
    pub const fn is_json(&self) -> bool {
        matches!(self.format, Format::Json)
    }

    /// Write a serializable value to the output.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn write<W, T>(&self, writer: &mut W, value: &T) -> Result<(), CliError>
    where
        W: Write,
        T: Serialize + TableDisplay + ?Sized,
    {
        match self.format {
            Format::Json => {
                serde_json::to_writer_pretty(&mut *writer, value)
                    .map_err(|e| CliError::Format(format!("JSON serialization failed: {e}")))?;
                writeln!(writer)?;
            }
            Format::Table => {
                value.write_table(writer)?;
            }
        }
        Ok(())
    }

    /// Write a serializable value to a string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_string<T>(&self, value: &T) -> Result<String, CliError>
    where
        T: Serialize + TableDisplay + ?Sized,
    {
        let mut buf = Vec::new();
        self.write(&mut buf, value)?;
        String::from_utf8(buf).map_err(|e| CliError::Format(format!("UTF-8 error: {e}")))
    }
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self::new(Format::Json)
    }
}

/// Trait for types that can be displayed as a table.
pub trait TableDisplay {
    /// Write the value as a human-readable table.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError>;
}

// ============================================================================
// CLI-local results
// ============================================================================

/// Access token issued by sign-up or sign-in.
#[derive(Debug, Clone, Serialize)]
pub struct TokenOutput {
    /// The bearer token.
    pub token: String,
}

impl TableDisplay for TokenOutput {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        writeln!(writer, "{}", self.token)?;
        Ok(())
    }
}

/// Result of `init-settings`.
#[derive(Debug, Clone, Serialize)]
pub struct SettingsCreated {
    /// Written file.
    pub path: PathBuf,
    /// Backend URL.
    pub server: String,
    /// Code generation language.
    pub language: String,
}

impl TableDisplay for SettingsCreated {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        writeln!(writer, "Settings saved to {}", self.path.display())?;
        writeln!(writer, "  Server:         {}", self.server)?;
        writeln!(writer, "  Language:       {}", self.language)?;
        Ok(())
    }
}

/// Result of `codegen`.
#[derive(Debug, Clone, Serialize)]
pub struct CodeGenerated {
    /// App the code was generated for.
    pub app_id: String,
    /// Target language.
    pub language: String,
    /// Written file.
    pub path: PathBuf,
}

impl TableDisplay for CodeGenerated {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        writeln!(
            writer,
            "Code generated successfully and saved to {}",
            self.path.display()
        )?;
        Ok(())
    }
}

// ============================================================================
// Users & Workspaces
// ============================================================================

impl TableDisplay for User {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        writeln!(writer, "User: {}", self.id)?;
        writeln!(writer, "══════════════════════════════════")?;
        writeln!(writer, "  Handle:         {}", self.handle)?;
        writeln!(writer, "  Status:         {}", self.status)?;
        Ok(())
    }
}

impl TableDisplay for Workspace {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        writeln!(writer, "Workspace: {}", self.id)?;
        writeln!(writer, "══════════════════════════════════")?;
        writeln!(writer, "  Name:           {}", self.name)?;
        writeln!(writer, "  Description:    {}", self.description)?;
        writeln!(writer, "  Projects:       {}", self.projects)?;
        writeln!(writer, "  Users:          {}", self.users)?;
        Ok(())
    }
}

impl TableDisplay for [WorkspaceMembership] {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        if self.is_empty() {
            writeln!(writer, "No workspaces found")?;
            return Ok(());
        }

        writeln!(
            writer,
            "{:<36}  {:<24}  {:<10}  {:>8}  {:>5}",
            "ID", "NAME", "ROLE", "PROJECTS", "USERS"
        )?;
        writeln!(writer, "{}", "─".repeat(91))?;
        for m in self {
            writeln!(
                writer,
                "{:<36}  {:<24}  {:<10}  {:>8}  {:>5}",
                truncate(&m.workspace.id, 36),
                truncate(&m.workspace.name, 24),
                truncate(&m.role, 10),
                m.workspace.projects,
                m.workspace.users,
            )?;
        }
        Ok(())
    }
}

// ============================================================================
// Projects & Apps
// ============================================================================

impl TableDisplay for Project {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        writeln!(writer, "Project: {}", self.id)?;
        writeln!(writer, "══════════════════════════════════")?;
        writeln!(writer, "  Name:           {}", self.name)?;
        writeln!(writer, "  Description:    {}", self.description)?;
        if let Some(owner) = &self.created_by_id {
            writeln!(writer, "  Owner:          {owner}")?;
        }
        if let Some(private) = self.is_private {
            writeln!(writer, "  Private:        {private}")?;
        }
        Ok(())
    }
}

impl TableDisplay for [Project] {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        if self.is_empty() {
            writeln!(writer, "No projects found")?;
            return Ok(());
        }

        writeln!(writer, "{:<36}  {:<24}  {:<40}", "ID", "NAME", "DESCRIPTION")?;
        writeln!(writer, "{}", "─".repeat(104))?;
        for p in self {
            writeln!(
                writer,
                "{:<36}  {:<24}  {:<40}",
                truncate(&p.id, 36),
                truncate(&p.name, 24),
                truncate(&p.description, 40),
            )?;
        }
        Ok(())
    }
}

impl TableDisplay for App {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        writeln!(writer, "App: {}", self.id)?;
        writeln!(writer, "══════════════════════════════════")?;
        writeln!(writer, "  Name:           {}", self.name)?;
        writeln!(writer, "  Description:    {}", self.description)?;
        writeln!(writer, "  Project:        {}", self.project_id)?;
        Ok(())
    }
}

impl TableDisplay for [App] {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        if self.is_empty() {
            writeln!(writer, "No apps found")?;
            return Ok(());
        }

        writeln!(writer, "{:<36}  {:<24}  {:<10}  {:<30}", "ID", "NAME", "STATUS", "DESCRIPTION")?;
        writeln!(writer, "{}", "─".repeat(106))?;
        for app in self {
            writeln!(
                writer,
                "{:<36}  {:<24}  {:<10}  {:<30}",
                truncate(&app.id, 36),
                truncate(&app.name, 24),
                truncate(&app.status, 10),
                truncate(&app.description, 30),
            )?;
        }
        Ok(())
    }
}

// ============================================================================
// Schemas & Messages
// ============================================================================

impl TableDisplay for Schema {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        writeln!(writer, "Schema: {}", self.id)?;
        writeln!(writer, "══════════════════════════════════")?;
        writeln!(writer, "  Name:           {}", self.name)?;
        writeln!(writer, "  Type:           {}", self.schema_type)?;
        writeln!(writer, "  Description:    {}", self.description)?;
        if !self.schema.is_null() {
            writeln!(writer)?;
            writeln!(writer, "{}", self.schema)?;
        }
        Ok(())
    }
}

impl TableDisplay for [Schema] {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        if self.is_empty() {
            writeln!(writer, "No schemas found")?;
            return Ok(());
        }

        writeln!(writer, "{:<36}  {:<24}  {:<12}  {:<30}", "ID", "NAME", "TYPE", "DESCRIPTION")?;
        writeln!(writer, "{}", "─".repeat(108))?;
        for s in self {
            writeln!(
                writer,
                "{:<36}  {:<24}  {:<12}  {:<30}",
                truncate(&s.id, 36),
                truncate(&s.name, 24),
                truncate(&s.schema_type, 12),
                truncate(&s.description, 30),
            )?;
        }
        Ok(())
    }
}

impl TableDisplay for SchemaVersion {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        writeln!(writer, "Schema {} version {}", self.schema_id, self.version)?;
        writeln!(writer, "══════════════════════════════════")?;
        if let Some(created_at) = self.created_at {
            writeln!(writer, "  Created:        {}", created_at.to_rfc3339())?;
        }
        if !self.created_by_name.is_empty() {
            writeln!(writer, "  Author:         {}", self.created_by_name)?;
        }
        writeln!(writer)?;
        writeln!(writer, "{}", self.schema)?;
        Ok(())
    }
}

impl TableDisplay for [SchemaVersion] {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        if self.is_empty() {
            writeln!(writer, "No schema versions found")?;
            return Ok(());
        }

        writeln!(writer, "{:>7}  {:<25}  {:<24}", "VERSION", "CREATED", "AUTHOR")?;
        writeln!(writer, "{}", "─".repeat(60))?;
        for v in self {
            let created = v
                .created_at
                .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
                .unwrap_or_default();
            writeln!(
                writer,
                "{:>7}  {:<25}  {:<24}",
                v.version,
                created,
                truncate(&v.created_by_name, 24),
            )?;
        }
        Ok(())
    }
}

impl TableDisplay for Message {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        writeln!(writer, "Message: {}", self.id.as_deref().unwrap_or("-"))?;
        writeln!(writer, "══════════════════════════════════")?;
        writeln!(writer, "  Name:           {}", self.name)?;
        writeln!(writer, "  Schema:         {} v{}", self.schema_id, self.schema_version)?;
        writeln!(writer, "  Description:    {}", self.description)?;
        Ok(())
    }
}

impl TableDisplay for [Message] {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        if self.is_empty() {
            writeln!(writer, "No messages found")?;
            return Ok(());
        }

        writeln!(writer, "{:<36}  {:<24}  {:<36}  {:>7}", "ID", "NAME", "SCHEMA", "VERSION")?;
        writeln!(writer, "{}", "─".repeat(109))?;
        for m in self {
            writeln!(
                writer,
                "{:<36}  {:<24}  {:<36}  {:>7}",
                truncate(m.id.as_deref().unwrap_or("-"), 36),
                truncate(&m.name, 24),
                truncate(&m.schema_id, 36),
                m.schema_version,
            )?;
        }
        Ok(())
    }
}

// ============================================================================
// Servers & Resources
// ============================================================================

impl TableDisplay for Server {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        writeln!(writer, "Server: {}", self.id)?;
        writeln!(writer, "══════════════════════════════════")?;
        writeln!(writer, "  Name:           {}", self.name)?;
        writeln!(writer, "  Protocol:       {}", self.protocol)?;
        writeln!(writer, "  Description:    {}", self.description)?;

        if !self.resources.is_empty() {
            writeln!(writer)?;
            writeln!(writer, "Resources")?;
            for r in &self.resources {
                writeln!(writer, "  {:<24}  {:<10}  {}", r.name, r.resource_type, r.mode)?;
            }
        }

        if !self.binds.is_empty() {
            writeln!(writer)?;
            writeln!(writer, "Binds")?;
            for b in &self.binds {
                if b.routing_key.is_empty() {
                    writeln!(writer, "  {} -> {}", b.source, b.destination)?;
                } else {
                    writeln!(writer, "  {} -> {} ({})", b.source, b.destination, b.routing_key)?;
                }
            }
        }
        Ok(())
    }
}

impl TableDisplay for ServerList {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        if self.servers.is_empty() {
            writeln!(writer, "No servers found")?;
            return Ok(());
        }

        writeln!(writer, "{:<36}  {:<24}  {:<14}  {:<30}", "ID", "NAME", "PROTOCOL", "DESCRIPTION")?;
        writeln!(writer, "{}", "─".repeat(110))?;
        for s in &self.servers {
            writeln!(
                writer,
                "{:<36}  {:<24}  {:<14}  {:<30}",
                truncate(&s.id, 36),
                truncate(&s.name, 24),
                truncate(&s.protocol, 14),
                truncate(&s.description, 30),
            )?;
        }
        writeln!(writer)?;
        writeln!(writer, "Total: {}", self.total)?;
        Ok(())
    }
}

impl TableDisplay for Resource {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        writeln!(writer, "Resource: {}", self.id)?;
        writeln!(writer, "══════════════════════════════════")?;
        writeln!(writer, "  Name:           {}", self.name)?;
        writeln!(writer, "  Type:           {}", self.resource_type)?;
        writeln!(writer, "  Mode:           {}", self.mode)?;
        writeln!(writer, "  Server:         {}", self.server_id)?;
        writeln!(writer, "  Description:    {}", self.description)?;
        Ok(())
    }
}

impl TableDisplay for [Resource] {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        if self.is_empty() {
            writeln!(writer, "No resources found")?;
            return Ok(());
        }

        writeln!(writer, "{:<36}  {:<24}  {:<10}  {:<10}  {:<10}", "ID", "NAME", "TYPE", "MODE", "STATUS")?;
        writeln!(writer, "{}", "─".repeat(98))?;
        for r in self {
            writeln!(
                writer,
                "{:<36}  {:<24}  {:<10}  {:<10}  {:<10}",
                truncate(&r.id, 36),
                truncate(&r.name, 24),
                truncate(&r.resource_type, 10),
                truncate(&r.mode, 10),
                truncate(&r.status, 10),
            )?;
        }
        Ok(())
    }
}

/// Truncate a string to `max_len` characters, marking the cut with `...`.
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len > 3 {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{head}...")
    } else {
        s.chars().take(max_len).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(id: &str, name: &str) -> Project {
        Project {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            created_by_type: None,
            created_by_id: None,
            is_private: None,
        }
    }

    #[test]
    fn output_format_default_is_json() {
        let fmt = OutputFormat::default();
        assert!(fmt.is_json());
        assert_eq!(fmt.format(), Format::Json);
    }

    #[test]
    fn empty_list_as_json_is_empty_array() {
        let fmt = OutputFormat::new(Format::Json);
        let projects: Vec<Project> = Vec::new();
        let out = fmt.to_string(projects.as_slice()).unwrap();
        assert_eq!(out.trim(), "[]");
    }

    #[test]
    fn empty_list_as_table_says_none_found() {
        let fmt = OutputFormat::new(Format::Table);
        let projects: Vec<Project> = Vec::new();
        let out = fmt.to_string(projects.as_slice()).unwrap();
        assert_eq!(out.trim(), "No projects found");

        let servers = ServerList::from(Vec::new());
        assert_eq!(fmt.to_string(&servers).unwrap().trim(), "No servers found");
    }

    #[test]
    fn project_table_lists_rows() {
        let fmt = OutputFormat::new(Format::Table);
        let projects = vec![project("p1", "alpha"), project("p2", "beta")];
        let out = fmt.to_string(projects.as_slice()).unwrap();
        assert!(out.contains("ID"));
        assert!(out.contains("alpha"));
        assert!(out.contains("p2"));
    }

    #[test]
    fn json_output_is_pretty() {
        let fmt = OutputFormat::new(Format::Json);
        let out = fmt.to_string(&project("p1", "alpha")).unwrap();
        assert!(out.contains("\n  \"id\": \"p1\""));

        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed["name"], "alpha");
    }

    #[test]
    fn token_table_is_raw_token() {
        let fmt = OutputFormat::new(Format::Table);
        let out = fmt
            .to_string(&TokenOutput {
                token: "tok-1".into(),
            })
            .unwrap();
        assert_eq!(out, "tok-1\n");
    }

    #[test]
    fn code_generated_table_message() {
        let fmt = OutputFormat::new(Format::Table);
        let out = fmt
            .to_string(&CodeGenerated {
                app_id: "a1".into(),
                language: "go".into(),
                path: PathBuf::from("fusioncat/a1.go"),
            })
            .unwrap();
        assert_eq!(
            out.trim(),
            "Code generated successfully and saved to fusioncat/a1.go"
        );
    }

    #[test]
    fn truncate_short_string() {
        assert_eq!(truncate("hello", 10), "hello");
    }

    #[test]
    fn truncate_exact_length() {
        assert_eq!(truncate("hello", 5), "hello");
    }

    #[test]
    fn truncate_long_string() {
        assert_eq!(truncate("hello world", 8), "hello...");
    }

    #[test]
    fn truncate_very_short_max() {
        assert_eq!(truncate("hello", 3), "hel");
    }

    #[test]
    fn truncate_multibyte() {
        assert_eq!(truncate("ñandú-pipeline", 8), "ñandú...");
    }
}
