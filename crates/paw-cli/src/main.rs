//! paw CLI binary entrypoint.

use std::io;
use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use paw_cli::cli::{Cli, Commands};
use paw_cli::commands::{
    AppsCommand, AuthCommand, CodegenCommand, InitSettingsCommand, MessagesCommand,
    ProjectsCommand, ResourcesCommand, SchemasCommand, ServersCommand, WorkspacesCommand,
};
use paw_cli::context::Context;
use paw_cli::output::OutputFormat;

fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Requests are awaited one after another
    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Failed to create async runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(cli, Path::new("."))) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli, dir: &Path) -> Result<(), paw_cli::CliError> {
    let format = OutputFormat::new(cli.format);
    let mut stdout = io::stdout().lock();

    if let Commands::InitSettings(args) = &cli.command {
        return InitSettingsCommand::new(dir).execute(&mut stdout, &format, args);
    }

    let ctx = Context::resolve(cli.host.as_deref(), cli.token.clone(), dir)?;

    match cli.command {
        Commands::InitSettings(_) => {}
        Commands::Auth { command } => {
            let cmd = AuthCommand::new(&ctx);
            cmd.execute(&mut stdout, &format, &command).await?;
        }
        Commands::Projects { command } => {
            let cmd = ProjectsCommand::new(&ctx);
            cmd.execute(&mut stdout, &format, &command).await?;
        }
        Commands::Workspaces { command } => {
            let cmd = WorkspacesCommand::new(&ctx);
            cmd.execute(&mut stdout, &format, &command).await?;
        }
        Commands::Apps { command } => {
            let cmd = AppsCommand::new(&ctx);
            cmd.execute(&mut stdout, &format, &command).await?;
        }
        Commands::Schemas { command } => {
            let cmd = SchemasCommand::new(&ctx);
            cmd.execute(&mut stdout, &format, &command).await?;
        }
        Commands::Messages { command } => {
            let cmd = MessagesCommand::new(&ctx);
            cmd.execute(&mut stdout, &format, &command).await?;
        }
        Commands::Servers { command } => {
            let cmd = ServersCommand::new(&ctx);
            cmd.execute(&mut stdout, &format, &command).await?;
        }
        Commands::Resources { command } => {
            let cmd = ResourcesCommand::new(&ctx);
            cmd.execute(&mut stdout, &format, &command).await?;
        }
        Commands::Codegen(args) => {
            let cmd = CodegenCommand::new(&ctx);
            cmd.execute(&mut stdout, &format, &args).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use paw_client::SETTINGS_FILE;
    use tempfile::TempDir;

    #[tokio::test]
    async fn run_without_host_fails() {
        let dir = TempDir::new().unwrap();
        let cli = Cli::parse_from(["paw", "projects", "list", "--host", "", "--token", "t"]);
        let result = run(cli, dir.path()).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn run_with_conflicting_hosts_fails() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(SETTINGS_FILE),
            "syntaxVersion: 1\nserver: http://127.0.0.1:1/\ncodeGeneration:\n  language: go\n",
        )
        .unwrap();

        let cli = Cli::parse_from(["paw", "projects", "list", "--host", "http://127.0.0.1:2/"]);
        let err = run(cli, dir.path()).await.unwrap_err();
        assert!(err.to_string().contains("both environment variable and settings file"));
    }

    #[tokio::test]
    async fn run_init_settings_needs_no_host() {
        let dir = TempDir::new().unwrap();
        let cli = Cli::parse_from(["paw", "init-settings", "--host", ""]);
        run(cli, dir.path()).await.unwrap();
        assert!(dir.path().join(SETTINGS_FILE).is_file());
    }

    #[tokio::test]
    async fn run_with_unreachable_host_fails() {
        let dir = TempDir::new().unwrap();
        let cli = Cli::parse_from([
            "paw", "workspaces", "list", "--host", "http://127.0.0.1:1", "--token", "t",
        ]);
        assert!(run(cli, dir.path()).await.is_err());
    }
}
