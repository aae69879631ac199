//! Consistency checks over a model registry, using Validation.

use crate::core::{Event, State};
use crate::registry::ModelRegistry;
use crate::validate::diagnostics::{Diagnostic, Endpoint, ValidationReport};
use std::collections::{HashMap, HashSet, VecDeque};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use tracing::{debug, warn};

/// Type alias for the accumulated result of a model check
pub type ModelValidation<S, E> = Validation<(), NonEmptyVec<Diagnostic<S, E>>>;

/// Offline checker for a model.
///
/// Walks the registered states and rules without running any action and
/// accumulates every finding instead of stopping at the first one.
pub struct ModelValidator<'a, S: State, E: Event> {
    registry: &'a ModelRegistry<S, E>,
    start: S,
    check_references: bool,
    check_reachability: bool,
}

impl<'a, S: State, E: Event> ModelValidator<'a, S, E> {
    /// Validator for `registry` with `start` as the intended initial state.
    pub fn new(registry: &'a ModelRegistry<S, E>, start: S) -> Self {
        Self {
            registry,
            start,
            check_references: true,
            check_reachability: true,
        }
    }

    /// Skip the dangling-reference and unregistered-state checks
    pub fn skip_references(mut self) -> Self {
        self.check_references = false;
        self
    }

    /// Skip the reachability check
    pub fn skip_reachability(mut self) -> Self {
        self.check_reachability = false;
        self
    }

    /// Run all enabled checks, accumulating ALL diagnostics.
    /// Returns Validation::Success(()) for a clean model.
    pub fn validate(&self) -> ModelValidation<S, E> {
        let mut checks: Vec<ModelValidation<S, E>> = Vec::new();

        if self.check_references {
            checks.extend(self.dangling_references());
            checks.extend(self.unregistered_states());
        }
        if self.check_reachability {
            checks.extend(self.unreachable_states());
        }

        Validation::all_vec(checks).map(|_| ())
    }

    /// Run the checks and collect the findings into a report.
    pub fn report(&self) -> ValidationReport<S, E> {
        let diagnostics = match self.validate() {
            Validation::Success(_) => Vec::new(),
            Validation::Failure(errors) => errors.iter().cloned().collect(),
        };
        for diagnostic in &diagnostics {
            warn!(state = diagnostic.state().name(), "{diagnostic}");
        }
        debug!(
            start = self.start.name(),
            diagnostics = diagnostics.len(),
            "model validated"
        );

        ValidationReport {
            start: self.start.clone(),
            states: self.registry.state_count(),
            transitions: self.registry.transition_count(),
            reachable: self.reachable_states().len(),
            diagnostics,
        }
    }

    /// States reachable from the start state, in breadth-first order.
    ///
    /// The walk follows every registered rule, including rules whose
    /// endpoints are not registered.
    pub fn reachable_states(&self) -> Vec<S> {
        let mut edges: HashMap<&S, Vec<&S>> = HashMap::new();
        for rule in self.registry.transitions() {
            edges.entry(&rule.from).or_default().push(&rule.to);
        }

        let mut seen: HashSet<&S> = HashSet::from([&self.start]);
        let mut order = vec![self.start.clone()];
        let mut frontier = VecDeque::from([&self.start]);
        while let Some(state) = frontier.pop_front() {
            for &next in edges.get(state).into_iter().flatten() {
                if seen.insert(next) {
                    order.push(next.clone());
                    frontier.push_back(next);
                }
            }
        }
        order
    }

    fn dangling_references(&self) -> Vec<ModelValidation<S, E>> {
        let mut checks = Vec::new();
        for rule in self.registry.transitions() {
            for (state, endpoint) in [(&rule.from, Endpoint::Source), (&rule.to, Endpoint::Target)] {
                if !self.registry.contains_state(state) {
                    checks.push(Validation::fail(Diagnostic::DanglingReference {
                        rule: rule.clone(),
                        endpoint,
                    }));
                }
            }
        }
        checks
    }

    fn unregistered_states(&self) -> Vec<ModelValidation<S, E>> {
        let mut references: Vec<(&S, usize)> = Vec::new();
        for rule in self.registry.transitions() {
            for state in [&rule.from, &rule.to] {
                if self.registry.contains_state(state) {
                    continue;
                }
                match references.iter_mut().find(|(seen, _)| *seen == state) {
                    Some((_, count)) => *count += 1,
                    None => references.push((state, 1)),
                }
            }
        }

        references
            .into_iter()
            .map(|(state, references)| {
                Validation::fail(Diagnostic::UnregisteredState {
                    state: state.clone(),
                    references,
                })
            })
            .collect()
    }

    fn unreachable_states(&self) -> Vec<ModelValidation<S, E>> {
        let reachable: HashSet<S> = self.reachable_states().into_iter().collect();
        self.registry
            .states()
            .filter(|state| !reachable.contains(*state))
            .map(|state| {
                Validation::fail(Diagnostic::UnreachableState {
                    state: state.clone(),
                    start: self.start.clone(),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::StateDescriptor;
    use std::cell::Cell;
    use std::rc::Rc;

    crate::state_enum! {
        enum Plant {
            Start,
            Init,
            WaitInput,
            CheckChange,
            LogError,
            Heat,
        }
    }

    crate::event_enum! {
        enum PlantEvent {
            Init,
            InitSuccess,
            InputChanged,
            OutsideBounds,
            ErrorLogged,
            TooCold,
            Reset,
        }
    }

    fn register(registry: &mut ModelRegistry<Plant, PlantEvent>, states: &[Plant]) {
        for state in states {
            registry.add_state(StateDescriptor::new(*state)).unwrap();
        }
    }

    #[test]
    fn clean_model_passes() {
        let mut registry = ModelRegistry::new();
        register(&mut registry, &[Plant::Start, Plant::Init, Plant::WaitInput]);
        registry.add_transition(Plant::Start, PlantEvent::Init, Plant::Init).unwrap();
        registry
            .add_transition(Plant::Init, PlantEvent::InitSuccess, Plant::WaitInput)
            .unwrap();

        let validator = ModelValidator::new(&registry, Plant::Start);

        assert!(validator.validate().is_success());
        let report = validator.report();
        assert!(report.is_clean());
        assert_eq!(report.reachable, 3);
    }

    #[test]
    fn validation_accumulates_all_diagnostics() {
        let mut registry = ModelRegistry::new();
        register(&mut registry, &[Plant::Start, Plant::Init, Plant::Heat]);
        registry.add_transition(Plant::Start, PlantEvent::Init, Plant::Init).unwrap();
        registry
            .add_transition(Plant::Init, PlantEvent::InitSuccess, Plant::WaitInput)
            .unwrap();
        registry
            .add_transition(Plant::CheckChange, PlantEvent::OutsideBounds, Plant::LogError)
            .unwrap();

        let result = ModelValidator::new(&registry, Plant::Start).validate();

        match result {
            Validation::Failure(errors) => {
                // Init->WaitInput target, CheckChange->LogError both ends,
                // three unregistered states, and Heat unreachable.
                assert_eq!(errors.len(), 7);

                let dangling = errors
                    .iter()
                    .filter(|e| matches!(e, Diagnostic::DanglingReference { .. }))
                    .count();
                let unregistered = errors
                    .iter()
                    .filter(|e| matches!(e, Diagnostic::UnregisteredState { .. }))
                    .count();
                let unreachable: Vec<&Plant> = errors
                    .iter()
                    .filter(|e| matches!(e, Diagnostic::UnreachableState { .. }))
                    .map(Diagnostic::state)
                    .collect();

                assert_eq!(dangling, 3);
                assert_eq!(unregistered, 3);
                assert_eq!(unreachable, vec![&Plant::Heat]);
            }
            Validation::Success(_) => panic!("Expected failures, got success"),
        }
    }

    #[test]
    fn unregistered_state_counts_references() {
        let mut registry = ModelRegistry::new();
        register(&mut registry, &[Plant::CheckChange, Plant::Heat]);
        registry
            .add_transition(Plant::CheckChange, PlantEvent::Reset, Plant::WaitInput)
            .unwrap();
        registry
            .add_transition(Plant::Heat, PlantEvent::Reset, Plant::WaitInput)
            .unwrap();

        let report = ModelValidator::new(&registry, Plant::CheckChange)
            .skip_reachability()
            .report();

        assert!(report.diagnostics.contains(&Diagnostic::UnregisteredState {
            state: Plant::WaitInput,
            references: 2,
        }));
        assert_eq!(report.dangling().count(), 2);
    }

    #[test]
    fn reachability_follows_rules_through_unregistered_states() {
        let mut registry = ModelRegistry::new();
        register(&mut registry, &[Plant::Start, Plant::LogError]);
        registry.add_transition(Plant::Start, PlantEvent::Init, Plant::Init).unwrap();
        registry
            .add_transition(Plant::Init, PlantEvent::OutsideBounds, Plant::LogError)
            .unwrap();

        let validator = ModelValidator::new(&registry, Plant::Start).skip_references();

        assert_eq!(
            validator.reachable_states(),
            vec![Plant::Start, Plant::Init, Plant::LogError]
        );
        assert!(validator.validate().is_success());
    }

    #[test]
    fn validator_never_runs_actions() {
        let calls = Rc::new(Cell::new(0));
        let mut registry = ModelRegistry::new();
        let entry_calls = Rc::clone(&calls);
        registry
            .add_state(StateDescriptor::new(Plant::Init).on_entry(move |ctx| {
                entry_calls.set(entry_calls.get() + 1);
                ctx.add_event(PlantEvent::InitSuccess);
            }))
            .unwrap();
        registry.add_transition(Plant::Start, PlantEvent::Init, Plant::Init).unwrap();

        let report = ModelValidator::new(&registry, Plant::Start).report();

        assert_eq!(calls.get(), 0);
        assert!(!report.is_clean());
    }
}
