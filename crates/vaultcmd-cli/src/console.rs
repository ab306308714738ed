//! Console notification sink.

use colored::Colorize;

use vaultcmd_core::notify::{Notice, NoticeLevel, NotificationSink};

/// Prints notices to the terminal and records them in the log.
///
/// Errors go to stderr in red and are logged at `error`. Info notices go to
/// stdout and are logged at `info`.
pub struct ConsoleNotifier;

impl NotificationSink for ConsoleNotifier {
    fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Error => {
                tracing::error!(text = %notice.message, "Notice");
                eprintln!("{}", notice.message.red());
            }
            NoticeLevel::Info => {
                tracing::info!(text = %notice.message, "Notice");
                println!("{}", notice.message);
            }
        }
    }
}
