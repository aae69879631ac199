//! FIFO buffer of pending events.

use crate::core::Event;
use std::collections::VecDeque;

/// Ordered buffer of pending events.
///
/// An event enqueued while an earlier event is being processed is dispatched
/// after every event already queued ahead of it and before any event
/// enqueued later. The queue is unbounded and never blocks.
///
/// # Example
///
/// ```rust
/// use fsm_dispatch::queue::EventQueue;
/// use fsm_dispatch::event_enum;
///
/// event_enum! {
///     enum Input { Coin, Pass }
/// }
///
/// let mut queue = EventQueue::new();
/// queue.enqueue(Input::Coin);
/// queue.enqueue(Input::Pass);
///
/// assert_eq!(queue.dequeue(), Some(Input::Coin));
/// assert_eq!(queue.dequeue(), Some(Input::Pass));
/// assert_eq!(queue.dequeue(), None);
/// ```
#[derive(Clone, Debug)]
pub struct EventQueue<E: Event> {
    pending: VecDeque<E>,
}

impl<E: Event> EventQueue<E> {
    pub fn new() -> Self {
        Self {
            pending: VecDeque::new(),
        }
    }

    /// Append an event to the tail.
    pub fn enqueue(&mut self, event: E) {
        self.pending.push_back(event);
    }

    /// Remove and return the head, or `None` when nothing is pending.
    pub fn dequeue(&mut self) -> Option<E> {
        self.pending.pop_front()
    }

    /// Put previously dequeued events back at the head, keeping their order.
    pub(crate) fn requeue_front<I>(&mut self, events: I)
    where
        I: IntoIterator<Item = E>,
        I::IntoIter: DoubleEndedIterator,
    {
        for event in events.into_iter().rev() {
            self.pending.push_front(event);
        }
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Pending events, head first.
    pub fn iter(&self) -> impl Iterator<Item = &E> {
        self.pending.iter()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

impl<E: Event> Default for EventQueue<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Event> Extend<E> for EventQueue<E> {
    fn extend<T: IntoIterator<Item = E>>(&mut self, iter: T) {
        self.pending.extend(iter);
    }
}
