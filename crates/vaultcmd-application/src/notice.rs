//! Notice policy for chain steps.
//!
//! The runner only emits structured [`StepReport`]s. This module decides which
//! of them reach the user and with what text.

use std::sync::Arc;

use vaultcmd_core::chain::{StepObserver, StepOutcome, StepReport};
use vaultcmd_core::notify::{Notice, NotificationSink};

/// Maps a step report to at most one notice.
///
/// - failure: error notice with the failure description
/// - success with a configured message: info notice with that message
/// - success with `show_output` and non-empty output: info notice with the output
pub fn notice_for(report: &StepReport, show_output: bool) -> Option<Notice> {
    match &report.outcome {
        StepOutcome::Failed { error } => Some(Notice::error(error.clone())),
        StepOutcome::Succeeded { output } => {
            if let Some(message) = &report.success_message {
                Some(Notice::info(message.clone()))
            } else if show_output && !output.trim().is_empty() {
                Some(Notice::info(output.trim_end().to_string()))
            } else {
                None
            }
        }
    }
}

/// Step observer that forwards the notices chosen by [`notice_for`] to a sink.
pub struct NotifyingObserver {
    sink: Arc<dyn NotificationSink>,
    show_output: bool,
}

impl NotifyingObserver {
    pub fn new(sink: Arc<dyn NotificationSink>, show_output: bool) -> Self {
        Self { sink, show_output }
    }
}

impl StepObserver for NotifyingObserver {
    fn on_step(&self, report: &StepReport) {
        if let Some(notice) = notice_for(report, self.show_output) {
            self.sink.notify(notice);
        }
    }
}
