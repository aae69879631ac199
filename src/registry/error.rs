//! Registration errors.

use thiserror::Error;

/// Errors raised while registering states and transitions.
///
/// Both variants are raised at the offending call and leave the registry
/// unchanged.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RegistryError {
    #[error("State '{state}' is already registered")]
    DuplicateState { state: String },

    #[error("Transition from '{from}' on event '{event}' is already registered (target '{existing}')")]
    DuplicateTransition {
        from: String,
        event: String,
        existing: String,
    },
}
