//! Application layer for vaultcmd.
//!
//! Use cases that wire the domain runner to the settings store, the vault
//! root resolver and the notification sink.

pub mod notice;
pub mod palette;
pub mod settings;

pub use notice::NotifyingObserver;
pub use palette::{CommandPalette, InvocationOptions, InvocationOutcome};
pub use settings::CommandSettingsService;
