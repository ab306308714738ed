//! Command entry domain models.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Result, VaultCmdError};

/// A user-defined command: a display name and a shell body.
///
/// The body may hold several newline-separated sub-commands, which are run
/// as a chain when the command is invoked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandEntry {
    /// Display name shown in the palette
    pub name: String,
    /// Shell command body
    pub command: String,
}

impl CommandEntry {
    /// Creates a new command entry.
    pub fn new(name: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            command: command.into(),
        }
    }

    /// Returns true when both the name and the body are non-empty.
    pub fn is_registrable(&self) -> bool {
        !self.name.is_empty() && !self.command.is_empty()
    }

    /// Palette identifier derived from the name.
    ///
    /// Every whitespace character is replaced by `-`.
    pub fn command_id(&self) -> String {
        command_id_for(&self.name)
    }
}

/// Derives a palette identifier from a display name.
pub fn command_id_for(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_whitespace() { '-' } else { c })
        .collect()
}

/// A command entry that made it into the palette.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisteredCommand {
    pub id: String,
    pub name: String,
    pub command: String,
    /// Position of the source entry in the settings list
    pub index: usize,
}

/// The ordered list of command entries plus the configured vault root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSettings {
    pub commands: Vec<CommandEntry>,
    pub vault_root: Option<PathBuf>,
}

impl Default for CommandSettings {
    fn default() -> Self {
        Self {
            commands: vec![CommandEntry::default()],
            vault_root: None,
        }
    }
}

impl CommandSettings {
    /// Returns the registrable entries in list order.
    pub fn registered(&self) -> Vec<RegisteredCommand> {
        self.commands
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.is_registrable())
            .map(|(index, entry)| RegisteredCommand {
                id: entry.command_id(),
                name: entry.name.clone(),
                command: entry.command.clone(),
                index,
            })
            .collect()
    }

    /// Finds the first registered command with the given id.
    pub fn find_registered(&self, id: &str) -> Option<RegisteredCommand> {
        self.registered().into_iter().find(|cmd| cmd.id == id)
    }

    /// Appends an entry and returns its index.
    pub fn push(&mut self, entry: CommandEntry) -> usize {
        self.commands.push(entry);
        self.commands.len() - 1
    }

    /// Replaces the name of the entry at `index`.
    pub fn rename(&mut self, index: usize, name: impl Into<String>) -> Result<()> {
        self.entry_mut(index)?.name = name.into();
        Ok(())
    }

    /// Replaces the body of the entry at `index`.
    pub fn set_command(&mut self, index: usize, command: impl Into<String>) -> Result<()> {
        self.entry_mut(index)?.command = command.into();
        Ok(())
    }

    /// Removes and returns the entry at `index`.
    pub fn remove(&mut self, index: usize) -> Result<CommandEntry> {
        if index >= self.commands.len() {
            return Err(VaultCmdError::not_found("command entry", index.to_string()));
        }
        Ok(self.commands.remove(index))
    }

    fn entry_mut(&mut self, index: usize) -> Result<&mut CommandEntry> {
        self.commands
            .get_mut(index)
            .ok_or_else(|| VaultCmdError::not_found("command entry", index.to_string()))
    }
}
