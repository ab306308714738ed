//! Data transfer objects for the settings file.

pub mod settings;

pub use settings::{CommandEntryDto, SETTINGS_VERSION, SettingsDto};
