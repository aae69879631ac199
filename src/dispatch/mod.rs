//! The dispatcher: the run loop around the model registry.
//!
//! # Key Concepts
//!
//! - **Dispatcher**: owns the model, the event queue, and the current state
//! - **Context**: what entry and exit actions may see and do
//! - **Event sources**: where the loop waits when the queue is empty
//!
//! # Unexpected events
//!
//! An event with no rule in the current state is either flushed (discarded
//! and traced) or held. Held events are offered again, ahead of newer
//! events, after the next transition.

mod context;
mod error;
mod machine;
mod source;

pub use context::Context;
pub use error::DispatchError;
pub use machine::{Dispatcher, RunSummary, StepOutcome, StopReason};
pub use source::{from_fn, EventSource, Exhausted, FnSource, Scripted};
