//! Builder for constructing models.

use crate::config::{ConfigError, EngineConfig};
use crate::core::{Event, State};
use crate::dispatch::{Context, Dispatcher};
use crate::registry::{ModelRegistry, RegistryError, StateBehavior, StateDescriptor};

/// Builder for registering states and transitions with a fluent API.
///
/// Every registration call fails fast with the registry's duplicate errors,
/// so a model is either built completely or not at all.
pub struct ModelBuilder<S: State, E: Event> {
    registry: ModelRegistry<S, E>,
    config: EngineConfig,
}

impl<S: State, E: Event> ModelBuilder<S, E> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            registry: ModelRegistry::new(),
            config: EngineConfig::default(),
        }
    }

    /// Register a state without actions.
    pub fn state(self, id: S) -> Result<Self, RegistryError> {
        self.describe(StateDescriptor::new(id))
    }

    /// Register a state with an entry action.
    pub fn state_with_entry<F>(self, id: S, on_entry: F) -> Result<Self, RegistryError>
    where
        F: FnMut(&mut Context<'_, S, E>) + 'static,
    {
        self.describe(StateDescriptor::new(id).on_entry(on_entry))
    }

    /// Register a state with entry and exit actions.
    pub fn state_with_actions<F, G>(self, id: S, on_entry: F, on_exit: G) -> Result<Self, RegistryError>
    where
        F: FnMut(&mut Context<'_, S, E>) + 'static,
        G: FnMut(&mut Context<'_, S, E>) + 'static,
    {
        self.describe(StateDescriptor::new(id).on_entry(on_entry).on_exit(on_exit))
    }

    /// Register a state whose actions delegate to a `StateBehavior`.
    pub fn behavior<B>(self, id: S, behavior: B) -> Result<Self, RegistryError>
    where
        B: StateBehavior<S, E> + 'static,
    {
        self.describe(StateDescriptor::with_behavior(id, behavior))
    }

    /// Register a pre-built descriptor.
    pub fn describe(mut self, descriptor: StateDescriptor<S, E>) -> Result<Self, RegistryError> {
        self.registry.add_state(descriptor)?;
        Ok(self)
    }

    /// Register a transition rule.
    pub fn transition(mut self, from: S, event: E, to: S) -> Result<Self, RegistryError> {
        self.registry.add_transition(from, event, to)?;
        Ok(self)
    }

    /// Register several transition rules at once, stopping at the first duplicate.
    pub fn transitions<I>(mut self, rules: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = (S, E, S)>,
    {
        for (from, event, to) in rules {
            self.registry.add_transition(from, event, to)?;
        }
        Ok(self)
    }

    /// Select the flush (`true`) or hold (`false`) policy for the dispatcher.
    pub fn flush_unexpected_events(mut self, flush: bool) -> Self {
        self.config = self.config.flush_unexpected_events(flush);
        self
    }

    /// Replace the dispatcher configuration.
    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Finish the model.
    pub fn build(self) -> ModelRegistry<S, E> {
        self.registry
    }

    /// Finish the model and hand it to a dispatcher.
    pub fn dispatcher(self) -> Result<Dispatcher<S, E>, ConfigError> {
        Dispatcher::with_config(self.registry, self.config)
    }
}

impl<S: State, E: Event> Default for ModelBuilder<S, E> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UnexpectedEventPolicy;

    crate::state_enum! {
        enum TestState {
            Start,
            Init,
            WaitInput,
        }
    }

    crate::event_enum! {
        enum TestEvent {
            Init,
            InitSuccess,
            Reset,
        }
    }

    #[test]
    fn fluent_api_builds_model() {
        let model = ModelBuilder::<TestState, TestEvent>::new()
            .state(TestState::Start)
            .unwrap()
            .state_with_entry(TestState::Init, |ctx| ctx.add_event(TestEvent::InitSuccess))
            .unwrap()
            .state_with_actions(TestState::WaitInput, |_ctx| {}, |_ctx| {})
            .unwrap()
            .transitions([
                (TestState::Start, TestEvent::Init, TestState::Init),
                (TestState::Init, TestEvent::InitSuccess, TestState::WaitInput),
            ])
            .unwrap()
            .build();

        assert_eq!(model.state_count(), 3);
        assert_eq!(model.transition_count(), 2);
        assert!(model.descriptor(&TestState::Init).unwrap().has_entry());
        assert!(model.descriptor(&TestState::WaitInput).unwrap().has_exit());
    }

    #[test]
    fn builder_rejects_duplicate_state() {
        let result = ModelBuilder::<TestState, TestEvent>::new()
            .state(TestState::Start)
            .and_then(|b| b.state(TestState::Start));

        assert!(matches!(result, Err(RegistryError::DuplicateState { .. })));
    }

    #[test]
    fn builder_rejects_duplicate_transition_in_batch() {
        let result = ModelBuilder::<TestState, TestEvent>::new().transitions([
            (TestState::Init, TestEvent::Reset, TestState::Start),
            (TestState::Init, TestEvent::Reset, TestState::WaitInput),
        ]);

        assert!(matches!(
            result,
            Err(RegistryError::DuplicateTransition { .. })
        ));
    }

    #[test]
    fn dispatcher_inherits_configuration() {
        let dispatcher = ModelBuilder::<TestState, TestEvent>::new()
            .state(TestState::Start)
            .unwrap()
            .flush_unexpected_events(true)
            .dispatcher()
            .unwrap();

        assert_eq!(dispatcher.policy(), UnexpectedEventPolicy::Flush);
        assert_eq!(dispatcher.registry().state_count(), 1);
    }

    #[test]
    fn dispatcher_rejects_invalid_configuration() {
        let result = ModelBuilder::<TestState, TestEvent>::new()
            .config(EngineConfig {
                max_steps: Some(0),
                ..EngineConfig::default()
            })
            .dispatcher();

        assert!(matches!(result, Err(ConfigError::Invalid { .. })));
    }
}
