//! Command-line argument parsing with clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use paw_client::{DEFAULT_SERVER, Language, Ownership, ResourceMode, ResourceType};

/// paw - command-line client for the fusioncat platform.
#[derive(Parser, Debug, Clone)]
#[command(name = "paw")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Fusioncat backend URL. Conflicts with `server` in fcsettings.yaml.
    #[arg(long, env = "FC_HOST", global = true)]
    pub host: Option<String>,

    /// Access token from `auth signin` or `auth signup`.
    #[arg(long, env = "FC_ACCESS_TOKEN", global = true, hide_env_values = true)]
    pub token: Option<String>,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = Format::Json, global = true)]
    pub format: Format,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum Format {
    /// JSON output for scripting.
    #[default]
    Json,
    /// Human-readable table format.
    Table,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Create fcsettings.yaml in the current directory.
    InitSettings(InitSettingsArgs),

    /// Sign up, sign in, and inspect the current user.
    Auth {
        /// Auth subcommand to execute.
        #[command(subcommand)]
        command: AuthCommands,
    },

    /// Project management.
    Projects {
        /// Project subcommand to execute.
        #[command(subcommand)]
        command: ProjectCommands,
    },

    /// Workspace management.
    Workspaces {
        /// Workspace subcommand to execute.
        #[command(subcommand)]
        command: WorkspaceCommands,
    },

    /// App management.
    Apps {
        /// App subcommand to execute.
        #[command(subcommand)]
        command: AppCommands,
    },

    /// Schema management.
    Schemas {
        /// Schema subcommand to execute.
        #[command(subcommand)]
        command: SchemaCommands,
    },

    /// Message management.
    Messages {
        /// Message subcommand to execute.
        #[command(subcommand)]
        command: MessageCommands,
    },

    /// Server management.
    Servers {
        /// Server subcommand to execute.
        #[command(subcommand)]
        command: ServerCommands,
    },

    /// Resource management.
    Resources {
        /// Resource subcommand to execute.
        #[command(subcommand)]
        command: ResourceCommands,
    },

    /// Generate source code for an app.
    Codegen(CodegenArgs),
}

/// Arguments for `init-settings`.
#[derive(Args, Debug, Clone)]
pub struct InitSettingsArgs {
    /// Backend URL written to the settings file.
    #[arg(long, default_value = DEFAULT_SERVER)]
    pub server: String,

    /// Default code generation language.
    #[arg(short, long, value_enum, default_value_t = LanguageArg::Typescript)]
    pub language: LanguageArg,
}

/// Auth subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum AuthCommands {
    /// Create a new account and print its access token.
    Signup {
        /// Account email.
        #[arg(long)]
        email: String,
        /// Account password.
        #[arg(long)]
        password: String,
    },

    /// Sign in and print an access token.
    Signin {
        /// Account email.
        #[arg(long)]
        email: String,
        /// Account password.
        #[arg(long)]
        password: String,
    },

    /// Show the owner of the current token.
    Me,
}

/// Project subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum ProjectCommands {
    /// List projects.
    List,

    /// Create a project.
    Create {
        /// Project name.
        #[arg(long)]
        name: String,

        /// Project owner.
        #[arg(long, value_enum)]
        belongs_to: BelongsToArg,

        /// Owning workspace, required with `--belongs-to workspace`.
        #[arg(long)]
        workspace_id: Option<String>,

        /// Project description.
        #[arg(long, default_value = "")]
        description: String,

        /// Make the project private.
        #[arg(long)]
        private: bool,
    },

    /// Import a YAML project definition.
    Import {
        /// Target project.
        #[arg(long)]
        project_id: String,

        /// YAML file to import.
        #[arg(long)]
        file: PathBuf,
    },
}

/// Workspace subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum WorkspaceCommands {
    /// List workspaces you belong to.
    List,

    /// Create a workspace.
    Create {
        /// Workspace name.
        #[arg(long)]
        name: String,

        /// Workspace description.
        #[arg(long, default_value = "")]
        description: String,
    },
}

/// App subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum AppCommands {
    /// List apps of a project.
    List {
        /// Project ID.
        #[arg(long)]
        project_id: String,
    },

    /// Create an app.
    Create {
        /// Project ID.
        #[arg(long)]
        project_id: String,

        /// App name.
        #[arg(long)]
        name: String,

        /// App description.
        #[arg(long, default_value = "")]
        description: String,
    },
}

/// Schema subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum SchemaCommands {
    /// List schemas of a project.
    List {
        /// Project ID.
        #[arg(long)]
        project_id: String,
    },

    /// Create a schema from a JSON file.
    Create {
        /// Project ID.
        #[arg(long)]
        project_id: String,

        /// Schema name.
        #[arg(long)]
        name: String,

        /// Schema type, e.g. `jsonschema`.
        #[arg(long = "type")]
        schema_type: String,

        /// File holding the schema document.
        #[arg(long)]
        schema_file: PathBuf,

        /// Schema description.
        #[arg(long, default_value = "")]
        description: String,
    },

    /// Replace a schema's content, creating a new version.
    Update {
        /// Schema ID.
        #[arg(long)]
        schema_id: String,

        /// File holding the new schema document.
        #[arg(long)]
        schema_file: PathBuf,
    },

    /// List all versions of a schema.
    Versions {
        /// Schema ID.
        #[arg(long)]
        schema_id: String,
    },

    /// Show one version of a schema.
    Version {
        /// Schema ID.
        #[arg(long)]
        schema_id: String,

        /// Version number.
        #[arg(long)]
        version_id: String,
    },
}

/// Message subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum MessageCommands {
    /// List messages of a project.
    List {
        /// Project ID.
        #[arg(long)]
        project_id: String,
    },

    /// Create a message bound to a schema version.
    Create {
        /// Project ID.
        #[arg(long)]
        project_id: String,

        /// Message name.
        #[arg(long)]
        name: String,

        /// Schema the message carries.
        #[arg(long)]
        schema_id: String,

        /// Schema version, starting at 1.
        #[arg(long, allow_negative_numbers = true)]
        schema_version: i64,

        /// Message description.
        #[arg(long, default_value = "")]
        description: String,
    },
}

/// Server subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum ServerCommands {
    /// List servers of a project.
    List {
        /// Project ID.
        #[arg(long)]
        project_id: String,
    },

    /// Create a server.
    Create {
        /// Project ID.
        #[arg(long)]
        project_id: String,

        /// Server name.
        #[arg(long)]
        name: String,

        /// Server type: async+kafka, async+amqp, async+mqtt, async+db or async+webhook.
        #[arg(long = "type")]
        server_type: String,

        /// Server description.
        #[arg(long)]
        description: String,
    },
}

/// Resource subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum ResourceCommands {
    /// List resources of a server.
    List {
        /// Server ID.
        #[arg(long)]
        server_id: String,
    },

    /// Create a resource on a server.
    Create {
        /// Server ID.
        #[arg(long)]
        server_id: String,

        /// Resource name.
        #[arg(long)]
        name: String,

        /// Resource type.
        #[arg(long = "type", value_enum)]
        resource_type: ResourceTypeArg,

        /// Access mode.
        #[arg(long, value_enum)]
        mode: ResourceModeArg,

        /// Resource description.
        #[arg(long, default_value = "")]
        description: String,
    },
}

/// Arguments for `codegen`.
#[derive(Args, Debug, Clone)]
pub struct CodegenArgs {
    /// App to generate code for.
    #[arg(long)]
    pub app_id: String,

    /// Target language. Defaults to the settings file language.
    #[arg(short, long, value_enum)]
    pub language: Option<LanguageArg>,

    /// Directory the generated file is written to.
    #[arg(short, long, default_value = "fusioncat")]
    pub output_dir: PathBuf,
}

/// Code generation language argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum LanguageArg {
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

impl From<LanguageArg> for Language {
    fn from(arg: LanguageArg) -> Self {
        match arg {
            LanguageArg::Typescript => Self::Typescript,
            LanguageArg::Python => Self::Python,
            LanguageArg::Java => Self::Java,
            LanguageArg::Go => Self::Go,
        }
    }
}

/// Project owner argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BelongsToArg {
    /// The signed-in user.
    User,
    /// A workspace given by `--workspace-id`.
    Workspace,
}

impl From<BelongsToArg> for Ownership {
    fn from(arg: BelongsToArg) -> Self {
        match arg {
            BelongsToArg::User => Self::User,
            BelongsToArg::Workspace => Self::Workspace,
        }
    }
}

/// Resource type argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ResourceTypeArg {
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

impl From<ResourceTypeArg> for ResourceType {
    fn from(arg: ResourceTypeArg) -> Self {
        match arg {
            ResourceTypeArg::Topic => Self::Topic,
            ResourceTypeArg::Exchange => Self::Exchange,
            ResourceTypeArg::Queue => Self::Queue,
            ResourceTypeArg::Table => Self::Table,
            ResourceTypeArg::Endpoint => Self::Endpoint,
        }
    }
}

/// Resource mode argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ResourceModeArg {
    /// Consume only.
    Read,
    /// Produce only.
    Write,
    /// Binding between resources.
    Bind,
    /// Consume and produce.
    #[value(name = "readwrite")]
    ReadWrite,
}

impl From<ResourceModeArg> for ResourceMode {
    fn from(arg: ResourceModeArg) -> Self {
        match arg {
            ResourceModeArg::Read => Self::Read,
            ResourceModeArg::Write => Self::Write,
            ResourceModeArg::Bind => Self::Bind,
            ResourceModeArg::ReadWrite => Self::ReadWrite,
        }
    }
}
