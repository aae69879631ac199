//! Model registry: the known states and transition rules.
//!
//! The registry enforces two uniqueness invariants:
//! - a state identifier is registered at most once
//! - a `(from, event)` pair maps to at most one target
//!
//! Registration order is unconstrained. A rule may name states that are not
//! registered yet (or ever); the validator reports those.

mod descriptor;
mod error;
mod rule;

pub use descriptor::{Action, StateBehavior, StateDescriptor};
pub use error::RegistryError;
pub use rule::TransitionRule;

use crate::core::{Event, State};
use std::collections::HashMap;
use std::fmt;
use tracing::{trace, warn};

/// Owner of every `StateDescriptor` and `TransitionRule` in a model.
pub struct ModelRegistry<S: State, E: Event> {
    states: Vec<StateDescriptor<S, E>>,
    state_index: HashMap<S, usize>,
    transitions: Vec<TransitionRule<S, E>>,
    rule_index: HashMap<(S, E), usize>,
}

impl<S: State, E: Event> ModelRegistry<S, E> {
    pub fn new() -> Self {
        Self {
            states: Vec::new(),
            state_index: HashMap::new(),
            transitions: Vec::new(),
            rule_index: HashMap::new(),
        }
    }

    /// Register a state and its actions.
    ///
    /// # Errors
    ///
    /// `RegistryError::DuplicateState` if the identifier is already registered.
    ///
    /// # Example
    ///
    /// ```rust
    /// use fsm_dispatch::registry::{ModelRegistry, RegistryError, StateDescriptor};
    /// use fsm_dispatch::{event_enum, state_enum};
    ///
    /// state_enum! {
    ///     enum Turnstile { Locked, Unlocked }
    /// }
    ///
    /// event_enum! {
    ///     enum Input { Coin, Pass }
    /// }
    ///
    /// let mut registry: ModelRegistry<Turnstile, Input> = ModelRegistry::new();
    /// registry.add_state(StateDescriptor::new(Turnstile::Locked)).unwrap();
    ///
    /// let again = registry.add_state(StateDescriptor::new(Turnstile::Locked));
    /// assert!(matches!(again, Err(RegistryError::DuplicateState { .. })));
    /// assert_eq!(registry.state_count(), 1);
    /// ```
    pub fn add_state(&mut self, descriptor: StateDescriptor<S, E>) -> Result<(), RegistryError> {
        let id = descriptor.id().clone();
        if self.state_index.contains_key(&id) {
            warn!(state = id.name(), "rejected duplicate state");
            return Err(RegistryError::DuplicateState {
                state: id.name().to_string(),
            });
        }

        trace!(
            state = id.name(),
            on_entry = descriptor.has_entry(),
            on_exit = descriptor.has_exit(),
            "registered state"
        );
        self.state_index.insert(id, self.states.len());
        self.states.push(descriptor);
        Ok(())
    }

    /// Register a transition rule.
    ///
    /// Neither endpoint has to be registered yet.
    ///
    /// # Errors
    ///
    /// `RegistryError::DuplicateTransition` if `(from, event)` is already mapped.
    pub fn add_transition(&mut self, from: S, event: E, to: S) -> Result<(), RegistryError> {
        let key = (from, event);
        if let Some(&existing) = self.rule_index.get(&key) {
            let (from, event) = key;
            warn!(from = from.name(), event = event.name(), "rejected duplicate transition");
            return Err(RegistryError::DuplicateTransition {
                from: from.name().to_string(),
                event: event.name().to_string(),
                existing: self.transitions[existing].to.name().to_string(),
            });
        }

        let (from, event) = key;
        trace!(
            from = from.name(),
            event = event.name(),
            to = to.name(),
            "registered transition"
        );
        self.rule_index
            .insert((from.clone(), event.clone()), self.transitions.len());
        self.transitions.push(TransitionRule::new(from, event, to));
        Ok(())
    }

    /// Register a pre-built rule.
    ///
    /// # Errors
    ///
    /// Same as [`ModelRegistry::add_transition`].
    pub fn add_rule(&mut self, rule: TransitionRule<S, E>) -> Result<(), RegistryError> {
        self.add_transition(rule.from, rule.event, rule.to)
    }

    /// Target of the rule for `(from, event)`, if one is registered (pure)
    pub fn lookup(&self, from: &S, event: &E) -> Option<&S> {
        self.rule_index
            .get(&(from.clone(), event.clone()))
            .map(|&index| &self.transitions[index].to)
    }

    /// Descriptor registered for `id` (pure)
    pub fn descriptor(&self, id: &S) -> Option<&StateDescriptor<S, E>> {
        self.state_index.get(id).map(|&index| &self.states[index])
    }

    pub(crate) fn descriptor_mut(&mut self, id: &S) -> Option<&mut StateDescriptor<S, E>> {
        match self.state_index.get(id) {
            Some(&index) => self.states.get_mut(index),
            None => None,
        }
    }

    pub fn contains_state(&self, id: &S) -> bool {
        self.state_index.contains_key(id)
    }

    /// Registered state identifiers in registration order.
    pub fn states(&self) -> impl Iterator<Item = &S> {
        self.states.iter().map(StateDescriptor::id)
    }

    /// Registered rules in registration order.
    pub fn transitions(&self) -> &[TransitionRule<S, E>] {
        &self.transitions
    }

    /// Rules leaving `state`, in registration order.
    pub fn transitions_from<'a>(&'a self, state: &'a S) -> impl Iterator<Item = &'a TransitionRule<S, E>> {
        self.transitions.iter().filter(move |rule| rule.from == *state)
    }

    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    pub fn transition_count(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty() && self.transitions.is_empty()
    }
}

impl<S: State, E: Event> Default for ModelRegistry<S, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State, E: Event> fmt::Debug for ModelRegistry<S, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelRegistry")
            .field("states", &self.states)
            .field("transitions", &self.transitions)
            .finish()
    }
}
