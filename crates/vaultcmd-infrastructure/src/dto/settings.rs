//! Settings file DTOs.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use vaultcmd_core::command::{CommandEntry, CommandSettings};

pub const SETTINGS_VERSION: &str = "1.0.0";

fn default_version() -> String {
    SETTINGS_VERSION.to_string()
}

/// On-disk form of a command entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommandEntryDto {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub command: String,
}

/// On-disk form of [`CommandSettings`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingsDto {
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vault_root: Option<PathBuf>,
    #[serde(default)]
    pub commands: Vec<CommandEntryDto>,
}

impl From<SettingsDto> for CommandSettings {
    fn from(dto: SettingsDto) -> Self {
        Self {
            commands: dto
                .commands
                .into_iter()
                .map(|c| CommandEntry::new(c.name, c.command))
                .collect(),
            vault_root: dto.vault_root,
        }
    }
}

impl From<&CommandSettings> for SettingsDto {
    fn from(settings: &CommandSettings) -> Self {
        Self {
            version: default_version(),
            vault_root: settings.vault_root.clone(),
            commands: settings
                .commands
                .iter()
                .map(|c| CommandEntryDto {
                    name: c.name.clone(),
                    command: c.command.clone(),
                })
                .collect(),
        }
    }
}
