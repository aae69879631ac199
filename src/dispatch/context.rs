//! Context handed to entry and exit actions.

use crate::core::{Event, State};
use crate::queue::EventQueue;

/// View of the running dispatcher available inside state actions.
///
/// Actions never dispatch directly. They enqueue follow-up events, and the
/// run loop processes those on later iterations in FIFO order.
pub struct Context<'a, S: State, E: Event> {
    state: &'a S,
    queue: &'a mut EventQueue<E>,
    stop_requested: &'a mut bool,
}

impl<'a, S: State, E: Event> Context<'a, S, E> {
    pub(crate) fn new(
        state: &'a S,
        queue: &'a mut EventQueue<E>,
        stop_requested: &'a mut bool,
    ) -> Self {
        Self {
            state,
            queue,
            stop_requested,
        }
    }

    /// Current state of the machine.
    ///
    /// Inside `on_exit` this is the state being left; inside `on_entry` it is
    /// the state just entered.
    pub fn state(&self) -> &S {
        self.state
    }

    /// Enqueue an internally generated event.
    pub fn add_event(&mut self, event: E) {
        self.queue.enqueue(event);
    }

    /// Number of events currently pending in the queue.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Ask the run loop to return once the current step completes.
    pub fn request_stop(&mut self) {
        *self.stop_requested = true;
    }
}
