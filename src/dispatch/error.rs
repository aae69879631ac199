//! Dispatcher misuse errors.

use thiserror::Error;

/// Errors that can occur when driving the dispatcher.
///
/// Events without a matching rule are not errors; they surface as
/// `StepOutcome::Flushed` or `StepOutcome::Held`.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum DispatchError {
    #[error("Dispatcher not started. Call start() or run_state_machine() first")]
    NotStarted,

    #[error("Unexpected-event policy is locked once the dispatcher has started")]
    PolicyLocked,
}
