//! Filesystem vault root resolver.

use std::path::PathBuf;

use vaultcmd_core::error::{Result, VaultCmdError};
use vaultcmd_core::vault::VaultRootResolver;

/// Resolves a configured directory to its canonical path.
#[derive(Debug, Clone, Default)]
pub struct FsVaultRootResolver {
    configured: Option<PathBuf>,
}

impl FsVaultRootResolver {
    pub fn new(configured: Option<PathBuf>) -> Self {
        Self { configured }
    }
}

impl VaultRootResolver for FsVaultRootResolver {
    fn vault_root(&self) -> Result<PathBuf> {
        let path = self
            .configured
            .as_ref()
            .ok_or_else(|| VaultCmdError::config("No vault root configured"))?;

        let canonical = path.canonicalize().map_err(|e| {
            VaultCmdError::io(format!(
                "Cannot resolve vault root '{}': {}",
                path.display(),
                e
            ))
        })?;

        if !canonical.is_dir() {
            return Err(VaultCmdError::config(format!(
                "Vault root '{}' is not a directory",
                canonical.display()
            )));
        }

        Ok(canonical)
    }
}
