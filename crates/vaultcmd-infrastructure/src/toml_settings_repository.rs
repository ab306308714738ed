//! TOML-backed command settings repository.
//!
//! File location: `~/.config/vaultcmd/settings.toml` unless overridden.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;

use vaultcmd_core::command::{CommandSettings, CommandSettingsRepository, SettingsEdit};
use vaultcmd_core::error::{Result, VaultCmdError};

use crate::dto::SettingsDto;
use crate::paths::VaultCmdPaths;
use crate::storage::AtomicTomlFile;

pub struct TomlSettingsRepository {
    file: Arc<AtomicTomlFile<SettingsDto>>,
}

impl TomlSettingsRepository {
    /// Creates a repository at the default location.
    pub fn new() -> Result<Self> {
        let path = VaultCmdPaths::settings_file()
            .map_err(|e| VaultCmdError::config(e.to_string()))?;
        Ok(Self::with_path(path))
    }

    /// Creates a repository backed by an explicit file (for `--config` and tests).
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            file: Arc::new(AtomicTomlFile::new(path)),
        }
    }

    pub fn path(&self) -> PathBuf {
        self.file.path().to_path_buf()
    }
}

#[async_trait]
impl CommandSettingsRepository for TomlSettingsRepository {
    async fn load(&self) -> Result<CommandSettings> {
        let file = self.file.clone();
        let loaded = tokio::task::spawn_blocking(move || file.load())
            .await
            .map_err(|e| VaultCmdError::internal(format!("settings load task failed: {e}")))??;

        match loaded {
            Some(dto) => Ok(dto.into()),
            None => {
                tracing::debug!(path = %self.file.path().display(), "No settings file, using defaults");
                Ok(CommandSettings::default())
            }
        }
    }

    async fn save(&self, settings: &CommandSettings) -> Result<()> {
        let file = self.file.clone();
        let dto = SettingsDto::from(settings);
        tokio::task::spawn_blocking(move || file.save(&dto))
            .await
            .map_err(|e| VaultCmdError::internal(format!("settings save task failed: {e}")))??;

        tracing::debug!(path = %self.file.path().display(), entries = settings.commands.len(), "Saved settings");
        Ok(())
    }

    async fn update(&self, edit: SettingsEdit) -> Result<CommandSettings> {
        let file = self.file.clone();
        let default_value = SettingsDto::from(&CommandSettings::default());
        let dto = tokio::task::spawn_blocking(move || {
            file.update(default_value, |dto: &mut SettingsDto| {
                let mut settings = CommandSettings::from(dto.clone());
                edit(&mut settings)?;
                *dto = SettingsDto::from(&settings);
                Ok::<_, VaultCmdError>(())
            })
        })
        .await
        .map_err(|e| VaultCmdError::internal(format!("settings update task failed: {e}")))??;

        let settings = CommandSettings::from(dto);
        tracing::debug!(path = %self.file.path().display(), entries = settings.commands.len(), "Updated settings");
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use vaultcmd_core::command::CommandEntry;

    #[tokio::test]
    async fn test_load_defaults_when_missing() {
        let temp_dir = TempDir::new().unwrap();
        let repo = TomlSettingsRepository::with_path(temp_dir.path().join("settings.toml"));

        let settings = repo.load().await.unwrap();
        assert_eq!(settings, CommandSettings::default());
    }

    #[tokio::test]
    async fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let repo = TomlSettingsRepository::with_path(temp_dir.path().join("settings.toml"));

        let settings = CommandSettings {
            commands: vec![
                CommandEntry::new("git sync", "git add -A\ngit commit -m backup\ngit push"),
                CommandEntry::default(),
            ],
            vault_root: Some(temp_dir.path().to_path_buf()),
        };
        repo.save(&settings).await.unwrap();

        let loaded = repo.load().await.unwrap();
        assert_eq!(loaded, settings);
    }

    #[tokio::test]
    async fn test_update_starts_from_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let repo = TomlSettingsRepository::with_path(temp_dir.path().join("settings.toml"));

        let updated = repo
            .update(Box::new(|settings| {
                settings.push(CommandEntry::new("status", "git status"));
                Ok(())
            }))
            .await
            .unwrap();

        assert_eq!(updated.commands.len(), 2);
        assert_eq!(repo.load().await.unwrap(), updated);
    }

    #[tokio::test]
    async fn test_failed_update_saves_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.toml");
        let repo = TomlSettingsRepository::with_path(path.clone());

        let err = repo
            .update(Box::new(|settings| settings.remove(3).map(|_| ())))
            .await
            .unwrap_err();

        assert!(err.is_not_found());
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_corrupt_file_is_serialization_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.toml");
        std::fs::write(&path, "[[commands]\nname = ").unwrap();
        let repo = TomlSettingsRepository::with_path(path);

        let err = repo.load().await.unwrap_err();
        assert!(matches!(err, VaultCmdError::Serialization { .. }));
    }
}
