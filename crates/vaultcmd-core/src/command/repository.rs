//! Command settings repository trait.

use async_trait::async_trait;

use crate::command::CommandSettings;
use crate::error::Result;

/// A change applied to the stored settings by [`CommandSettingsRepository::update`].
pub type SettingsEdit = Box<dyn FnOnce(&mut CommandSettings) -> Result<()> + Send>;

/// Persistence for the command list.
#[async_trait]
pub trait CommandSettingsRepository: Send + Sync {
    /// Loads the settings. Returns the defaults if nothing has been saved yet.
    async fn load(&self) -> Result<CommandSettings>;

    /// Saves the settings, replacing the stored copy.
    async fn save(&self, settings: &CommandSettings) -> Result<()>;

    /// Loads, applies `edit` and saves as one step with respect to other
    /// writers of the same store. Nothing is saved when `edit` fails.
    async fn update(&self, edit: SettingsEdit) -> Result<CommandSettings>;
}
