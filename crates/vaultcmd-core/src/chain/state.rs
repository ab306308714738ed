//! Chain state machine.

use std::fmt;

use serde::Serialize;

use crate::error::{Result, VaultCmdError};

/// Progress of one chain invocation.
///
/// `Succeeded` and `Failed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ChainState {
    Idle,
    Running { step: usize },
    Succeeded,
    Failed { step: usize },
}

impl fmt::Display for ChainState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Running { step } => write!(f, "running({step})"),
            Self::Succeeded => write!(f, "succeeded"),
            Self::Failed { step } => write!(f, "failed({step})"),
        }
    }
}

impl ChainState {
    /// `Idle -> Running{0}`.
    pub fn start(self) -> Result<Self> {
        match self {
            Self::Idle => Ok(Self::Running { step: 0 }),
            other => Err(invalid_transition(other, "start")),
        }
    }

    /// Applies the outcome of the running step in a chain of `len` steps.
    pub fn complete_step(self, succeeded: bool, len: usize) -> Result<Self> {
        match self {
            Self::Running { step } if !succeeded => Ok(Self::Failed { step }),
            Self::Running { step } if step + 1 < len => Ok(Self::Running { step: step + 1 }),
            Self::Running { step } if step + 1 == len => Ok(Self::Succeeded),
            other => Err(invalid_transition(other, "complete_step")),
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed { .. })
    }

    /// Index of the step being run, if any.
    pub fn current_step(self) -> Option<usize> {
        match self {
            Self::Running { step } => Some(step),
            _ => None,
        }
    }
}

fn invalid_transition(state: ChainState, event: &str) -> VaultCmdError {
    VaultCmdError::internal(format!("invalid chain transition: {event} from {state}"))
}
