//! Path management for vaultcmd configuration files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/vaultcmd/          # Config directory (dirs::config_dir)
//! └── settings.toml            # Command list and vault root
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur during path resolution.
#[derive(Debug, Error)]
pub enum PathError {
    /// The platform config directory could not be determined.
    #[error("Cannot find config directory")]
    ConfigDirNotFound,
}

pub struct VaultCmdPaths;

impl VaultCmdPaths {
    const APP_DIR: &'static str = "vaultcmd";
    const SETTINGS_FILE: &'static str = "settings.toml";

    /// Returns the vaultcmd configuration directory, e.g. `~/.config/vaultcmd/`.
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join(Self::APP_DIR))
            .ok_or(PathError::ConfigDirNotFound)
    }

    /// Returns the default settings file path.
    pub fn settings_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join(Self::SETTINGS_FILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_file_is_under_config_dir() {
        // Skipped on hosts without a resolvable config directory.
        if let (Ok(config_dir), Ok(settings)) =
            (VaultCmdPaths::config_dir(), VaultCmdPaths::settings_file())
        {
            assert!(config_dir.ends_with("vaultcmd"));
            assert!(settings.ends_with("settings.toml"));
            assert!(settings.starts_with(&config_dir));
        }
    }
}
