//! Command palette: registration and invocation of user commands.

use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;

use vaultcmd_core::chain::{ChainReport, ChainRunner, CommandChain};
use vaultcmd_core::command::{CommandSettings, RegisteredCommand};
use vaultcmd_core::error::{Result, VaultCmdError};
use vaultcmd_core::notify::{Notice, NotificationSink};
use vaultcmd_core::process::ProcessLauncher;
use vaultcmd_core::vault::VaultRootResolver;

use crate::notice::NotifyingObserver;

/// Per-invocation switches.
#[derive(Debug, Clone, Copy, Default)]
pub struct InvocationOptions {
    /// Surface the stdout of successful steps as info notices.
    pub show_output: bool,
}

/// What happened when a command was invoked.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum InvocationOutcome {
    /// The body had nothing to run; no process was spawned.
    Undefined,
    /// The chain ran to a terminal state.
    Completed(ChainReport),
}

impl InvocationOutcome {
    pub fn report(&self) -> Option<&ChainReport> {
        match self {
            Self::Completed(report) => Some(report),
            Self::Undefined => None,
        }
    }
}

/// Holds the registered commands and runs them on request.
pub struct CommandPalette {
    runner: ChainRunner,
    sink: Arc<dyn NotificationSink>,
    vault: Arc<dyn VaultRootResolver>,
    commands: Vec<RegisteredCommand>,
}

impl CommandPalette {
    pub fn new(
        launcher: Arc<dyn ProcessLauncher>,
        sink: Arc<dyn NotificationSink>,
        vault: Arc<dyn VaultRootResolver>,
    ) -> Self {
        Self {
            runner: ChainRunner::new(launcher),
            sink,
            vault,
            commands: Vec::new(),
        }
    }

    /// Replaces the registry with the registrable entries of `settings`.
    pub fn register(&mut self, settings: &CommandSettings) -> &[RegisteredCommand] {
        self.commands = settings.registered();
        for cmd in &self.commands {
            tracing::debug!(id = %cmd.id, name = %cmd.name, "Registered command");
        }
        tracing::info!(count = self.commands.len(), "Command palette loaded");
        &self.commands
    }

    pub fn commands(&self) -> &[RegisteredCommand] {
        &self.commands
    }

    /// Looks up a registered command. The first entry with a matching id wins.
    pub fn find(&self, id: &str) -> Option<&RegisteredCommand> {
        self.commands.iter().find(|cmd| cmd.id == id)
    }

    /// Runs the registered command `id`.
    ///
    /// An unknown id is returned as `NotFound`. Chain failures are not errors:
    /// they are notified and recorded in the returned report.
    pub async fn invoke(&self, id: &str, options: InvocationOptions) -> Result<InvocationOutcome> {
        let command = self
            .find(id)
            .ok_or_else(|| VaultCmdError::not_found("command", id))?;

        tracing::info!(id = %command.id, name = %command.name, "Invoking command");
        self.execute_command(&command.command, options).await
    }

    /// Splits `body` into a chain and runs it in the vault root.
    pub async fn execute_command(
        &self,
        body: &str,
        options: InvocationOptions,
    ) -> Result<InvocationOutcome> {
        let chain = match CommandChain::parse(body) {
            Ok(chain) => chain,
            Err(VaultCmdError::UndefinedCommand) => {
                self.sink
                    .notify(Notice::error(VaultCmdError::UndefinedCommand.to_string()));
                return Ok(InvocationOutcome::Undefined);
            }
            Err(e) => return Err(e),
        };

        let working_dir = self.resolve_working_dir();
        let observer = NotifyingObserver::new(self.sink.clone(), options.show_output);

        let report = self
            .runner
            .run(&chain, working_dir.as_deref(), &observer)
            .await?;
        Ok(InvocationOutcome::Completed(report))
    }

    fn resolve_working_dir(&self) -> Option<PathBuf> {
        match self.vault.vault_root() {
            Ok(root) => {
                tracing::debug!(vault_root = %root.display(), "Resolved vault root");
                Some(root)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Could not resolve vault root, running without a working directory");
                None
            }
        }
    }
}
