//! Shell-backed process launcher.

use std::path::Path;
use std::process::Output;

use async_trait::async_trait;
use tokio::process::Command;

use vaultcmd_core::error::{Result, VaultCmdError};
use vaultcmd_core::process::{ProcessLauncher, ProcessOutput};

/// Runs each command through the platform shell (`sh -c` or `cmd /C`).
#[derive(Debug, Default, Clone)]
pub struct ShellProcessLauncher;

impl ShellProcessLauncher {
    pub fn new() -> Self {
        Self
    }

    fn shell_command(command: &str) -> Command {
        if cfg!(target_os = "windows") {
            let mut c = Command::new("cmd");
            c.args(["/C", command]);
            c
        } else {
            let mut c = Command::new("sh");
            c.args(["-c", command]);
            c
        }
    }
}

#[async_trait]
impl ProcessLauncher for ShellProcessLauncher {
    async fn launch(&self, command: &str, working_dir: Option<&Path>) -> Result<ProcessOutput> {
        let mut cmd = Self::shell_command(command);
        if let Some(dir) = working_dir {
            cmd.current_dir(dir);
        }

        tracing::debug!(command, working_dir = ?working_dir, "Launching shell command");

        let output = cmd.output().await.map_err(|e| {
            VaultCmdError::execution(format!("Failed to execute command '{}': {}", command, e))
        })?;

        into_process_output(command, output)
    }
}

fn into_process_output(command: &str, output: Output) -> Result<ProcessOutput> {
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();

    if output.status.success() {
        return Ok(ProcessOutput { stdout, stderr });
    }

    let detail = stderr.trim();
    let message = if detail.is_empty() {
        match output.status.code() {
            Some(code) => format!("Command failed: {}\nexit code: {}", command, code),
            None => format!("Command failed: {}\nterminated by signal", command),
        }
    } else {
        format!("Command failed: {}\n{}", command, detail)
    };

    Err(VaultCmdError::execution(message))
}
