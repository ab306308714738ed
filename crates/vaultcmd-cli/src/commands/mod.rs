pub mod run;
pub mod settings;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context as _, Result};

use vaultcmd_application::{CommandPalette, CommandSettingsService};
use vaultcmd_core::command::CommandSettings;
use vaultcmd_infrastructure::{FsVaultRootResolver, ShellProcessLauncher, TomlSettingsRepository};

use crate::console::ConsoleNotifier;

/// Shared wiring for every subcommand.
pub struct Context {
    pub settings: CommandSettingsService,
    settings_path: PathBuf,
    vault_override: Option<PathBuf>,
}

impl Context {
    pub fn new(config: Option<PathBuf>, vault: Option<PathBuf>) -> Result<Self> {
        let repository = match config {
            Some(path) => TomlSettingsRepository::with_path(path),
            None => TomlSettingsRepository::new().context("Failed to locate settings file")?,
        };
        let settings_path = repository.path();

        Ok(Self {
            settings: CommandSettingsService::new(Arc::new(repository)),
            settings_path,
            vault_override: vault,
        })
    }

    pub fn settings_path(&self) -> &PathBuf {
        &self.settings_path
    }

    /// Builds a palette over the current settings.
    ///
    /// Vault root precedence: `--vault`, settings `vault_root`, current directory.
    pub fn palette(&self, settings: &CommandSettings) -> CommandPalette {
        let vault_root = self
            .vault_override
            .clone()
            .or_else(|| settings.vault_root.clone())
            .or_else(|| std::env::current_dir().ok());

        let mut palette = CommandPalette::new(
            Arc::new(ShellProcessLauncher::new()),
            Arc::new(ConsoleNotifier),
            Arc::new(FsVaultRootResolver::new(vault_root)),
        );
        palette.register(settings);
        palette
    }
}
