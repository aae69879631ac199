//! fsm-dispatch: a table-driven finite state machine dispatch engine
//!
//! A model is declared up front: states with optional entry and exit
//! actions, and transition rules keyed by `(current state, event)`. A
//! dispatcher then consumes events in FIFO order, looks up the matching
//! rule, runs the exit action of the old state and the entry action of the
//! new one. Actions may enqueue further events; those are processed by later
//! iterations of the same loop, never reentrantly.
//!
//! # Core Concepts
//!
//! - **Registry**: the states and transition rules of a model
//! - **Queue**: FIFO buffer of pending events
//! - **Dispatcher**: the run loop, with a flush or hold policy for events
//!   that match no rule
//! - **Validator**: offline checks for dangling references and unreachable states
//!
//! # Example
//!
//! ```rust
//! use fsm_dispatch::builder::ModelBuilder;
//! use fsm_dispatch::dispatch::StopReason;
//! use fsm_dispatch::{event_enum, state_enum};
//!
//! state_enum! {
//!     enum Plant { Start, Init, WaitInput }
//! }
//!
//! event_enum! {
//!     enum PlantEvent { Init, InitSuccess, Reset }
//! }
//!
//! let mut dispatcher = ModelBuilder::new()
//!     .state(Plant::Start)?
//!     .state_with_entry(Plant::Init, |ctx| ctx.add_event(PlantEvent::InitSuccess))?
//!     .state(Plant::WaitInput)?
//!     .transition(Plant::Start, PlantEvent::Init, Plant::Init)?
//!     .transition(Plant::Init, PlantEvent::InitSuccess, Plant::WaitInput)?
//!     .flush_unexpected_events(true)
//!     .dispatcher()?;
//!
//! let summary = dispatcher.run_state_machine(Plant::Start, PlantEvent::Init)?;
//! assert_eq!(summary.state, Plant::WaitInput);
//! assert_eq!(summary.reason, StopReason::Drained);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod builder;
pub mod config;
pub mod core;
pub mod dispatch;
pub mod queue;
pub mod registry;
pub mod validate;

// Re-export commonly used types
pub use builder::ModelBuilder;
pub use config::{EngineConfig, UnexpectedEventPolicy};
pub use core::{Event, State};
pub use dispatch::{Context, Dispatcher, StepOutcome, StopReason};
pub use registry::{ModelRegistry, RegistryError, StateDescriptor};
pub use validate::{revert_model, Diagnostic, ModelValidator};
