pub mod chain;
pub mod command;
pub mod error;
pub mod notify;
pub mod process;
pub mod vault;

// Re-export common error type
pub use error::VaultCmdError;
