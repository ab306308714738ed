//! Command settings editing service.
//!
//! Every edit applies one change by index to the stored settings and persists
//! the result immediately, under the repository's write lock.

use std::path::PathBuf;
use std::sync::Arc;

use vaultcmd_core::command::{CommandEntry, CommandSettings, CommandSettingsRepository};
use vaultcmd_core::error::{Result, VaultCmdError};

pub struct CommandSettingsService {
    repository: Arc<dyn CommandSettingsRepository>,
}

impl CommandSettingsService {
    pub fn new(repository: Arc<dyn CommandSettingsRepository>) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> Result<CommandSettings> {
        self.repository.load().await
    }

    /// Appends an entry and returns its index.
    pub async fn add_entry(&self, entry: CommandEntry) -> Result<usize> {
        let (_, index) = self.edit(move |settings| Ok(settings.push(entry))).await?;
        tracing::info!(index, "Added command entry");
        Ok(index)
    }

    pub async fn rename(&self, index: usize, name: String) -> Result<CommandSettings> {
        let (settings, ()) = self.edit(move |s| s.rename(index, name)).await?;
        Ok(settings)
    }

    pub async fn set_command(&self, index: usize, command: String) -> Result<CommandSettings> {
        let (settings, ()) = self.edit(move |s| s.set_command(index, command)).await?;
        Ok(settings)
    }

    pub async fn remove(&self, index: usize) -> Result<CommandEntry> {
        let (_, removed) = self.edit(move |s| s.remove(index)).await?;
        tracing::info!(index, "Removed command entry");
        Ok(removed)
    }

    pub async fn set_vault_root(&self, vault_root: Option<PathBuf>) -> Result<CommandSettings> {
        let (settings, ()) = self
            .edit(move |s| {
                s.vault_root = vault_root;
                Ok(())
            })
            .await?;
        Ok(settings)
    }

    /// Applies `f` through [`CommandSettingsRepository::update`] and hands back
    /// the value it produced. Nothing is saved when `f` fails.
    async fn edit<R, F>(&self, f: F) -> Result<(CommandSettings, R)>
    where
        R: Send + 'static,
        F: FnOnce(&mut CommandSettings) -> Result<R> + Send + 'static,
    {
        let (tx, rx) = std::sync::mpsc::sync_channel(1);
        let settings = self
            .repository
            .update(Box::new(move |settings| {
                let value = f(settings)?;
                let _ = tx.send(value);
                Ok(())
            }))
            .await?;
        let value = rx
            .try_recv()
            .map_err(|_| VaultCmdError::internal("settings edit returned no value"))?;
        Ok((settings, value))
    }
}
