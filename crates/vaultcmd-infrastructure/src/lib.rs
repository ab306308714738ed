pub mod dto;
pub mod paths;
pub mod shell_launcher;
pub mod storage;
pub mod toml_settings_repository;
pub mod vault_resolver;

pub use crate::shell_launcher::ShellProcessLauncher;
pub use crate::toml_settings_repository::TomlSettingsRepository;
pub use crate::vault_resolver::FsVaultRootResolver;
