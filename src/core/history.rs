//! Dispatch trace.
//!
//! Records what the dispatcher did with every event it consumed, including
//! events that matched no transition. The trace is bounded: once it reaches
//! its capacity the oldest entries are evicted.

use super::event::Event;
use super::state::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Record of a single dispatch outcome.
///
/// # Example
///
/// ```rust
/// use fsm_dispatch::core::TraceEntry;
/// use fsm_dispatch::{event_enum, state_enum};
/// use chrono::Utc;
///
/// state_enum! {
///     enum Door { Closed, Open }
/// }
///
/// event_enum! {
///     enum DoorEvent { Push }
/// }
///
/// let entry = TraceEntry::Transitioned {
///     from: Door::Closed,
///     event: DoorEvent::Push,
///     to: Door::Open,
///     step: 1,
///     timestamp: Utc::now(),
/// };
/// assert_eq!(entry.step(), 1);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub enum TraceEntry<S: State, E: Event> {
    /// A rule matched and the machine moved from `from` to `to`
    Transitioned {
        from: S,
        event: E,
        to: S,
        step: u64,
        timestamp: DateTime<Utc>,
    },

    /// No rule matched and the event was discarded
    Flushed {
        state: S,
        event: E,
        step: u64,
        timestamp: DateTime<Utc>,
    },

    /// No rule matched and the event was held for a later state
    Held {
        state: S,
        event: E,
        step: u64,
        timestamp: DateTime<Utc>,
    },
}

impl<S: State, E: Event> TraceEntry<S, E> {
    /// Dispatch step this entry was recorded at.
    pub fn step(&self) -> u64 {
        match self {
            Self::Transitioned { step, .. }
            | Self::Flushed { step, .. }
            | Self::Held { step, .. } => *step,
        }
    }

    /// Event that was consumed.
    pub fn event(&self) -> &E {
        match self {
            Self::Transitioned { event, .. }
            | Self::Flushed { event, .. }
            | Self::Held { event, .. } => event,
        }
    }

    /// When the entry was recorded.
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::Transitioned { timestamp, .. }
            | Self::Flushed { timestamp, .. }
            | Self::Held { timestamp, .. } => *timestamp,
        }
    }

    pub fn is_transition(&self) -> bool {
        matches!(self, Self::Transitioned { .. })
    }
}

/// Ordered, bounded history of dispatch outcomes.
///
/// Deserializing rejects a trace holding more entries than its capacity.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "", try_from = "TraceParts<S, E>")]
pub struct DispatchTrace<S: State, E: Event> {
    entries: VecDeque<TraceEntry<S, E>>,
    capacity: usize,
    evicted: u64,
}

/// Serialized form of a `DispatchTrace`, checked before it becomes one.
#[derive(Deserialize)]
#[serde(bound = "")]
struct TraceParts<S: State, E: Event> {
    entries: VecDeque<TraceEntry<S, E>>,
    capacity: usize,
    evicted: u64,
}

impl<S: State, E: Event> TryFrom<TraceParts<S, E>> for DispatchTrace<S, E> {
    type Error = String;

    fn try_from(parts: TraceParts<S, E>) -> Result<Self, Self::Error> {
        if parts.entries.len() > parts.capacity {
            return Err(format!(
                "trace holds {} entries but its capacity is {}",
                parts.entries.len(),
                parts.capacity
            ));
        }
        Ok(Self {
            entries: parts.entries,
            capacity: parts.capacity,
            evicted: parts.evicted,
        })
    }
}

impl<S: State, E: Event> DispatchTrace<S, E> {
    /// Default number of entries kept.
    pub const DEFAULT_CAPACITY: usize = 256;

    /// Create an empty trace holding at most `capacity` entries.
    ///
    /// A capacity of zero disables recording.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity.min(Self::DEFAULT_CAPACITY)),
            capacity,
            evicted: 0,
        }
    }

    /// Append an entry, evicting the oldest one when full.
    pub fn record(&mut self, entry: TraceEntry<S, E>) {
        if self.capacity == 0 {
            self.evicted += 1;
            return;
        }
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
            self.evicted += 1;
        }
        self.entries.push_back(entry);
    }

    /// Get the path of states traversed by the retained transitions.
    ///
    /// Returns the `from` state of the first retained transition followed by
    /// the `to` state of every retained transition. Flushed and held entries
    /// do not move the machine and are skipped.
    ///
    /// # Example
    ///
    /// ```rust
    /// use fsm_dispatch::core::{DispatchTrace, TraceEntry};
    /// use fsm_dispatch::{event_enum, state_enum};
    /// use chrono::Utc;
    ///
    /// state_enum! {
    ///     enum Phase { One, Two, Three }
    /// }
    ///
    /// event_enum! {
    ///     enum Tick { Next }
    /// }
    ///
    /// let mut trace = DispatchTrace::with_capacity(8);
    /// trace.record(TraceEntry::Transitioned {
    ///     from: Phase::One, event: Tick::Next, to: Phase::Two, step: 1, timestamp: Utc::now(),
    /// });
    /// trace.record(TraceEntry::Transitioned {
    ///     from: Phase::Two, event: Tick::Next, to: Phase::Three, step: 2, timestamp: Utc::now(),
    /// });
    ///
    /// assert_eq!(trace.path(), vec![&Phase::One, &Phase::Two, &Phase::Three]);
    /// ```
    pub fn path(&self) -> Vec<&S> {
        let mut path = Vec::new();
        for entry in &self.entries {
            if let TraceEntry::Transitioned { from, to, .. } = entry {
                if path.is_empty() {
                    path.push(from);
                }
                path.push(to);
            }
        }
        path
    }

    /// Events in the order they were consumed.
    pub fn events(&self) -> Vec<&E> {
        self.entries.iter().map(TraceEntry::event).collect()
    }

    /// Retained entries, oldest first.
    pub fn entries(&self) -> impl Iterator<Item = &TraceEntry<S, E>> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of entries dropped because the trace was full.
    pub fn evicted(&self) -> u64 {
        self.evicted
    }
}

impl<S: State, E: Event> Default for DispatchTrace<S, E> {
    fn default() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }
}
