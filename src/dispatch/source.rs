//! External event sources polled when the queue runs dry.

use crate::core::{Event, State};
use std::collections::VecDeque;

/// Supplier of externally observed events.
///
/// The run loop asks the source for the next event only when no event is
/// pending. The call may block, for instance on console input. Returning
/// `None` tears the run loop down.
pub trait EventSource<S: State, E: Event> {
    fn next_event(&mut self, state: &S) -> Option<E>;
}

/// Source with nothing to offer; the run loop returns once the queue drains.
#[derive(Debug, Clone, Copy, Default)]
pub struct Exhausted;

impl<S: State, E: Event> EventSource<S, E> for Exhausted {
    fn next_event(&mut self, _state: &S) -> Option<E> {
        None
    }
}

/// Source replaying a fixed list of events in order.
#[derive(Debug, Clone)]
pub struct Scripted<E: Event> {
    events: VecDeque<E>,
}

impl<E: Event> Scripted<E> {
    pub fn new<I: IntoIterator<Item = E>>(events: I) -> Self {
        Self {
            events: events.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.events.len()
    }
}

impl<S: State, E: Event> EventSource<S, E> for Scripted<E> {
    fn next_event(&mut self, _state: &S) -> Option<E> {
        self.events.pop_front()
    }
}

/// Source backed by a closure; see [`from_fn`].
pub struct FnSource<F> {
    poll: F,
}

/// Build a source from a closure that receives the current state.
///
/// # Example
///
/// ```rust
/// use fsm_dispatch::dispatch::{from_fn, EventSource};
/// use fsm_dispatch::{event_enum, state_enum};
///
/// state_enum! {
///     enum Light { Off, On }
/// }
///
/// event_enum! {
///     enum Switch { Toggle }
/// }
///
/// let mut presses = 2;
/// let mut source = from_fn(move |_state: &Light| {
///     if presses == 0 {
///         return None;
///     }
///     presses -= 1;
///     Some(Switch::Toggle)
/// });
///
/// assert_eq!(source.next_event(&Light::Off), Some(Switch::Toggle));
/// assert_eq!(source.next_event(&Light::On), Some(Switch::Toggle));
/// assert_eq!(source.next_event(&Light::Off), None);
/// ```
pub fn from_fn<F>(poll: F) -> FnSource<F> {
    FnSource { poll }
}

impl<S, E, F> EventSource<S, E> for FnSource<F>
where
    S: State,
    E: Event,
    F: FnMut(&S) -> Option<E>,
{
    fn next_event(&mut self, state: &S) -> Option<E> {
        (self.poll)(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    crate::state_enum! {
        enum TestState {
            WaitInput,
        }
    }

    crate::event_enum! {
        enum TestEvent {
            InputChanged,
            Reset,
        }
    }

    #[test]
    fn exhausted_never_yields() {
        let mut source = Exhausted;
        let next: Option<TestEvent> = source.next_event(&TestState::WaitInput);
        assert_eq!(next, None);
    }

    #[test]
    fn scripted_replays_in_order() {
        let mut source = Scripted::new([TestEvent::InputChanged, TestEvent::Reset]);
        assert_eq!(source.remaining(), 2);

        assert_eq!(
            EventSource::<TestState, _>::next_event(&mut source, &TestState::WaitInput),
            Some(TestEvent::InputChanged)
        );
        assert_eq!(
            EventSource::<TestState, _>::next_event(&mut source, &TestState::WaitInput),
            Some(TestEvent::Reset)
        );
        assert_eq!(
            EventSource::<TestState, _>::next_event(&mut source, &TestState::WaitInput),
            None
        );
    }

    #[test]
    fn closure_source_sees_current_state() {
        let mut source = from_fn(|state: &TestState| match state {
            TestState::WaitInput => Some(TestEvent::InputChanged),
        });

        assert_eq!(
            source.next_event(&TestState::WaitInput),
            Some(TestEvent::InputChanged)
        );
    }
}
