//! Vault root resolution.

use std::path::PathBuf;

use crate::error::Result;

/// Resolves the directory every chain step runs in.
pub trait VaultRootResolver: Send + Sync {
    /// Returns the vault root, or an error when it cannot be determined.
    fn vault_root(&self) -> Result<PathBuf>;
}

/// Resolver that always returns the same directory.
#[derive(Debug, Clone)]
pub struct FixedVaultRoot(pub PathBuf);

impl VaultRootResolver for FixedVaultRoot {
    fn vault_root(&self) -> Result<PathBuf> {
        Ok(self.0.clone())
    }
}
