//! Command entries and their settings store.
//!
//! Users define named shell commands. Each complete entry is registered in
//! the palette under an id derived from its name.

pub mod model;
pub mod repository;

pub use model::{CommandEntry, CommandSettings, RegisteredCommand, command_id_for};
pub use repository::{CommandSettingsRepository, SettingsEdit};
