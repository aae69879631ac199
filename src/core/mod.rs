//! Core identifier types and the dispatch trace.
//!
//! This module contains the vocabulary every other module is written in:
//! - State identifiers via the `State` trait
//! - Event identifiers via the `Event` trait
//! - The bounded `DispatchTrace` of dispatch outcomes

mod event;
mod history;
mod state;

pub use event::Event;
pub use history::{DispatchTrace, TraceEntry};
pub use state::State;
