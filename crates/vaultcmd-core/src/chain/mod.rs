//! Command chains.
//!
//! A command body is split on newlines into a chain of steps. The runner
//! executes those steps strictly in sequence and stops at the first failure.

pub mod model;
pub mod runner;
pub mod state;

pub use model::{ChainStep, CommandChain};
pub use runner::{ChainReport, ChainRunner, NoopObserver, StepObserver, StepOutcome, StepReport};
pub use state::ChainState;
