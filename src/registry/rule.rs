//! Transition rules.

use crate::core::{Event, State};
use serde::{Deserialize, Serialize};

/// An edge of the model: in state `from`, event `event` moves the machine to `to`.
///
/// There are no guards. The `(from, event)` pair alone selects the rule, so
/// any classification of input must happen before the event is enqueued.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct TransitionRule<S: State, E: Event> {
    pub from: S,
    pub event: E,
    pub to: S,
}

impl<S: State, E: Event> TransitionRule<S, E> {
    pub fn new(from: S, event: E, to: S) -> Self {
        Self { from, event, to }
    }

    /// Check if this rule matches the given state and event (pure)
    pub fn matches(&self, state: &S, event: &E) -> bool {
        self.from == *state && self.event == *event
    }

    pub fn is_self_transition(&self) -> bool {
        self.from == self.to
    }
}
