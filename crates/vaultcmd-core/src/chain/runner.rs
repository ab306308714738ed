//! Sequential chain runner.

use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::chain::{ChainState, CommandChain};
use crate::error::{Result, VaultCmdError};
use crate::process::ProcessLauncher;

/// Result of one executed step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StepOutcome {
    Succeeded { output: String },
    Failed { error: String },
}

impl StepOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded { .. })
    }
}

/// Structured report emitted after every executed step.
#[derive(Debug, Clone, Serialize)]
pub struct StepReport {
    pub index: usize,
    pub command: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success_message: Option<String>,
    pub outcome: StepOutcome,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

/// Final state of a chain plus the reports of the steps that ran.
#[derive(Debug, Clone, Serialize)]
pub struct ChainReport {
    pub state: ChainState,
    pub steps: Vec<StepReport>,
}

impl ChainReport {
    pub fn succeeded(&self) -> bool {
        self.state == ChainState::Succeeded
    }

    /// The report of the step that halted the chain.
    pub fn failed_step(&self) -> Option<&StepReport> {
        match self.state {
            ChainState::Failed { step } => self.steps.iter().find(|r| r.index == step),
            _ => None,
        }
    }

    pub fn executed_commands(&self) -> Vec<&str> {
        self.steps.iter().map(|r| r.command.as_str()).collect()
    }
}

/// Receives each step report as soon as the step completes.
pub trait StepObserver: Send + Sync {
    fn on_step(&self, report: &StepReport);
}

/// Observer that ignores every report.
pub struct NoopObserver;

impl StepObserver for NoopObserver {
    fn on_step(&self, _report: &StepReport) {}
}

/// Runs the steps of a chain one after another.
///
/// A step starts only once the previous one has completed. The first failing
/// step halts the chain.
pub struct ChainRunner {
    launcher: Arc<dyn ProcessLauncher>,
}

impl ChainRunner {
    pub fn new(launcher: Arc<dyn ProcessLauncher>) -> Self {
        Self { launcher }
    }

    /// Runs `chain` with every process started in `working_dir`.
    ///
    /// Step failures are reported in the returned [`ChainReport`]; the `Err`
    /// path only carries internal state machine errors.
    pub async fn run(
        &self,
        chain: &CommandChain,
        working_dir: Option<&Path>,
        observer: &dyn StepObserver,
    ) -> Result<ChainReport> {
        let mut state = ChainState::Idle.start()?;
        let mut reports = Vec::with_capacity(chain.len());

        while let Some(index) = state.current_step() {
            let step = chain.steps().get(index).ok_or_else(|| {
                VaultCmdError::internal(format!("chain step {index} out of range"))
            })?;

            tracing::debug!(step = index, command = %step.command, "Running chain step");
            let started_at = Utc::now();
            let outcome = match self.launcher.launch(&step.command, working_dir).await {
                Ok(output) => StepOutcome::Succeeded {
                    output: output.stdout,
                },
                Err(e) => StepOutcome::Failed {
                    error: e.to_string(),
                },
            };

            let report = StepReport {
                index,
                command: step.command.clone(),
                success_message: step.success_message.clone(),
                outcome,
                started_at,
                finished_at: Utc::now(),
            };

            if let StepOutcome::Failed { error } = &report.outcome {
                tracing::warn!(step = index, command = %step.command, %error, "Chain step failed");
            }

            observer.on_step(&report);
            state = state.complete_step(report.outcome.is_success(), chain.len())?;
            reports.push(report);
        }

        tracing::info!(state = %state, steps = reports.len(), "Chain finished");

        Ok(ChainReport {
            state,
            steps: reports,
        })
    }
}
