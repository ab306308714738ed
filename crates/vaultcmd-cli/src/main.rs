use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod console;

#[derive(Parser)]
#[command(name = "vaultcmd")]
#[command(about = "Run named shell command chains inside a note vault", long_about = None)]
struct Cli {
    /// Settings file (defaults to ~/.config/vaultcmd/settings.toml)
    #[arg(long, global = true, env = "VAULTCMD_CONFIG")]
    config: Option<PathBuf>,

    /// Vault root every command runs in
    #[arg(long, global = true, env = "VAULTCMD_VAULT")]
    vault: Option<PathBuf>,

    /// Log at info level (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List configured command entries
    List {
        /// Print registered commands as JSON
        #[arg(long)]
        json: bool,
    },
    /// Run a registered command by id
    Run {
        id: String,
        #[command(flatten)]
        output: commands::run::OutputArgs,
    },
    /// Run a command body without registering it
    Exec {
        body: String,
        #[command(flatten)]
        output: commands::run::OutputArgs,
    },
    /// Append a command entry
    Add {
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long, default_value = "")]
        command: String,
    },
    /// Rename the entry at INDEX
    Rename { index: usize, name: String },
    /// Replace the body of the entry at INDEX
    Set { index: usize, command: String },
    /// Remove the entry at INDEX
    Remove { index: usize },
    /// Set or clear the vault root stored in settings
    Vault {
        path: Option<PathBuf>,
        #[arg(long, conflicts_with = "path")]
        clear: bool,
    },
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let ctx = commands::Context::new(cli.config, cli.vault)?;

    match cli.command {
        Commands::List { json } => commands::settings::list(&ctx, json).await?,
        Commands::Run { id, output } => commands::run::run(&ctx, &id, output).await?,
        Commands::Exec { body, output } => commands::run::exec(&ctx, &body, output).await?,
        Commands::Add { name, command } => commands::settings::add(&ctx, name, command).await?,
        Commands::Rename { index, name } => commands::settings::rename(&ctx, index, name).await?,
        Commands::Set { index, command } => {
            commands::settings::set_command(&ctx, index, command).await?
        }
        Commands::Remove { index } => commands::settings::remove(&ctx, index).await?,
        Commands::Vault { path, clear } => commands::settings::vault(&ctx, path, clear).await?,
    }

    Ok(())
}
