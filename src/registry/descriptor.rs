//! State descriptors: a state identifier plus its optional actions.

use crate::core::{Event, State};
use crate::dispatch::Context;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Type alias for entry and exit actions.
pub type Action<S, E> = Box<dyn FnMut(&mut Context<'_, S, E>)>;

/// Capability interface for states whose entry and exit behavior lives in
/// one application type.
///
/// Both methods default to doing nothing.
///
/// # Example
///
/// ```rust
/// use fsm_dispatch::dispatch::Context;
/// use fsm_dispatch::registry::{StateBehavior, StateDescriptor};
/// use fsm_dispatch::{event_enum, state_enum};
///
/// state_enum! {
///     enum Plant { Init, WaitInput }
/// }
///
/// event_enum! {
///     enum PlantEvent { InitSuccess, InitError }
/// }
///
/// struct Subsystems {
///     healthy: bool,
/// }
///
/// impl StateBehavior<Plant, PlantEvent> for Subsystems {
///     fn on_entry(&mut self, ctx: &mut Context<'_, Plant, PlantEvent>) {
///         if self.healthy {
///             ctx.add_event(PlantEvent::InitSuccess);
///         } else {
///             ctx.add_event(PlantEvent::InitError);
///         }
///     }
/// }
///
/// let init = StateDescriptor::with_behavior(Plant::Init, Subsystems { healthy: true });
/// assert!(init.has_entry());
/// ```
pub trait StateBehavior<S: State, E: Event> {
    fn on_entry(&mut self, ctx: &mut Context<'_, S, E>) {
        let _ = ctx;
    }

    fn on_exit(&mut self, ctx: &mut Context<'_, S, E>) {
        let _ = ctx;
    }
}

/// A registered state and its optional entry and exit actions.
///
/// Actions are owned by the descriptor; whatever application state they
/// capture stays the application's.
pub struct StateDescriptor<S: State, E: Event> {
    id: S,
    on_entry: Option<Action<S, E>>,
    on_exit: Option<Action<S, E>>,
}

impl<S: State, E: Event> StateDescriptor<S, E> {
    /// Descriptor without actions.
    pub fn new(id: S) -> Self {
        Self {
            id,
            on_entry: None,
            on_exit: None,
        }
    }

    /// Set the entry action.
    pub fn on_entry<F>(mut self, action: F) -> Self
    where
        F: FnMut(&mut Context<'_, S, E>) + 'static,
    {
        self.on_entry = Some(Box::new(action));
        self
    }

    /// Set the exit action.
    pub fn on_exit<F>(mut self, action: F) -> Self
    where
        F: FnMut(&mut Context<'_, S, E>) + 'static,
    {
        self.on_exit = Some(Box::new(action));
        self
    }

    /// Descriptor whose entry and exit actions delegate to `behavior`.
    pub fn with_behavior<B>(id: S, behavior: B) -> Self
    where
        B: StateBehavior<S, E> + 'static,
    {
        let shared = Rc::new(RefCell::new(behavior));
        let on_exit = Rc::clone(&shared);
        Self::new(id)
            .on_entry(move |ctx| shared.borrow_mut().on_entry(ctx))
            .on_exit(move |ctx| on_exit.borrow_mut().on_exit(ctx))
    }

    pub fn id(&self) -> &S {
        &self.id
    }

    pub fn has_entry(&self) -> bool {
        self.on_entry.is_some()
    }

    pub fn has_exit(&self) -> bool {
        self.on_exit.is_some()
    }

    /// Run the entry action if present. Returns whether one ran.
    pub(crate) fn enter(&mut self, ctx: &mut Context<'_, S, E>) -> bool {
        match self.on_entry.as_mut() {
            Some(action) => {
                action(ctx);
                true
            }
            None => false,
        }
    }

    /// Run the exit action if present. Returns whether one ran.
    pub(crate) fn exit(&mut self, ctx: &mut Context<'_, S, E>) -> bool {
        match self.on_exit.as_mut() {
            Some(action) => {
                action(ctx);
                true
            }
            None => false,
        }
    }
}

impl<S: State, E: Event> fmt::Debug for StateDescriptor<S, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateDescriptor")
            .field("id", &self.id)
            .field("on_entry", &self.has_entry())
            .field("on_exit", &self.has_exit())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queue::EventQueue;

    crate::state_enum! {
        enum TestState {
            Start,
            Init,
        }
    }

    crate::event_enum! {
        enum TestEvent {
            InitSuccess,
            Reset,
        }
    }

    #[test]
    fn new_descriptor_has_no_actions() {
        let descriptor: StateDescriptor<TestState, TestEvent> = StateDescriptor::new(TestState::Start);

        assert_eq!(descriptor.id(), &TestState::Start);
        assert!(!descriptor.has_entry());
        assert!(!descriptor.has_exit());
    }

    #[test]
    fn enter_runs_closure_with_context() {
        let mut descriptor = StateDescriptor::new(TestState::Init)
            .on_entry(|ctx: &mut Context<'_, TestState, TestEvent>| ctx.add_event(TestEvent::InitSuccess));

        let mut queue = EventQueue::new();
        let mut stop = false;
        let mut ctx = Context::new(&TestState::Init, &mut queue, &mut stop);

        assert!(descriptor.enter(&mut ctx));
        assert!(!descriptor.exit(&mut ctx));
        assert_eq!(queue.dequeue(), Some(TestEvent::InitSuccess));
    }

    #[test]
    fn behavior_keeps_state_between_calls() {
        struct Counter {
            entries: u32,
        }

        impl StateBehavior<TestState, TestEvent> for Counter {
            fn on_entry(&mut self, ctx: &mut Context<'_, TestState, TestEvent>) {
                self.entries += 1;
                if self.entries > 1 {
                    ctx.add_event(TestEvent::Reset);
                }
            }
        }

        let mut descriptor = StateDescriptor::with_behavior(TestState::Init, Counter { entries: 0 });
        let mut queue = EventQueue::new();
        let mut stop = false;

        descriptor.enter(&mut Context::new(&TestState::Init, &mut queue, &mut stop));
        assert!(queue.is_empty());

        descriptor.enter(&mut Context::new(&TestState::Init, &mut queue, &mut stop));
        assert_eq!(queue.dequeue(), Some(TestEvent::Reset));

        assert!(descriptor.exit(&mut Context::new(&TestState::Init, &mut queue, &mut stop)));
        assert!(queue.is_empty());
    }

    #[test]
    fn debug_hides_closures() {
        let descriptor: StateDescriptor<TestState, TestEvent> =
            StateDescriptor::new(TestState::Start).on_exit(|_ctx| {});

        let rendered = format!("{descriptor:?}");
        assert!(rendered.contains("Start"));
        assert!(rendered.contains("on_exit: true"));
    }
}
