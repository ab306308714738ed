//! Process launcher abstraction.

use std::path::Path;

use async_trait::async_trait;

use crate::error::Result;

/// Captured output of a process that exited successfully.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Launches one shell command and waits for it to finish.
///
/// Implementations return `Err(VaultCmdError::Execution(_))` for spawn failures
/// and non-zero exits. The error's `Display` text is the description shown to
/// the user.
#[async_trait]
pub trait ProcessLauncher: Send + Sync {
    async fn launch(&self, command: &str, working_dir: Option<&Path>) -> Result<ProcessOutput>;
}
