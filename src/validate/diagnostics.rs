//! Model diagnostics and the serializable report.

use crate::core::{Event, State};
use crate::registry::TransitionRule;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which end of a transition rule a diagnostic refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Endpoint {
    Source,
    Target,
}

/// Non-fatal findings about a model.
///
/// Diagnostics are developer-facing. They are produced only by the
/// validator and never during dispatch.
#[derive(Debug, Clone, Error, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub enum Diagnostic<S: State, E: Event> {
    #[error(
        "Transition {} --{}--> {} references unregistered {:?} state",
        .rule.from.name(), .rule.event.name(), .rule.to.name(), .endpoint
    )]
    DanglingReference {
        rule: TransitionRule<S, E>,
        endpoint: Endpoint,
    },

    #[error("State '{}' is referenced {references} time(s) but has no descriptor", .state.name())]
    UnregisteredState { state: S, references: usize },

    #[error("State '{}' is unreachable from '{}'", .state.name(), .start.name())]
    UnreachableState { state: S, start: S },
}

impl<S: State, E: Event> Diagnostic<S, E> {
    /// State the diagnostic is about.
    pub fn state(&self) -> &S {
        match self {
            Self::DanglingReference {
                rule,
                endpoint: Endpoint::Source,
            } => &rule.from,
            Self::DanglingReference {
                rule,
                endpoint: Endpoint::Target,
            } => &rule.to,
            Self::UnregisteredState { state, .. } | Self::UnreachableState { state, .. } => state,
        }
    }
}

/// Outcome of validating a model, ready to be logged or written as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct ValidationReport<S: State, E: Event> {
    pub start: S,
    pub states: usize,
    pub transitions: usize,
    pub reachable: usize,
    pub diagnostics: Vec<Diagnostic<S, E>>,
}

impl<S: State, E: Event> ValidationReport<S, E> {
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn dangling(&self) -> impl Iterator<Item = &Diagnostic<S, E>> {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d, Diagnostic::DanglingReference { .. }))
    }

    pub fn unreachable(&self) -> impl Iterator<Item = &S> {
        self.diagnostics.iter().filter_map(|d| match d {
            Diagnostic::UnreachableState { state, .. } => Some(state),
            _ => None,
        })
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
