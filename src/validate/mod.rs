//! Validation-based model checks.
//!
//! This module inspects a model before it is handed to a dispatcher. It uses
//! Stillwater's `Validation` type to accumulate ALL findings in one pass
//! instead of stopping at the first one. Nothing here runs a state action.
//!
//! # Example
//!
//! ```rust
//! use fsm_dispatch::registry::{ModelRegistry, StateDescriptor};
//! use fsm_dispatch::validate::{revert_model, Diagnostic};
//! use fsm_dispatch::{event_enum, state_enum};
//! use stillwater::validation::Validation;
//!
//! state_enum! {
//!     enum Plant { Start, Init, Heat }
//! }
//!
//! event_enum! {
//!     enum PlantEvent { Init }
//! }
//!
//! let mut registry: ModelRegistry<Plant, PlantEvent> = ModelRegistry::new();
//! registry.add_state(StateDescriptor::new(Plant::Start)).unwrap();
//! registry.add_transition(Plant::Start, PlantEvent::Init, Plant::Init).unwrap();
//!
//! match revert_model(&registry, &Plant::Start) {
//!     Validation::Failure(diagnostics) => {
//!         assert!(diagnostics
//!             .iter()
//!             .any(|d| matches!(d, Diagnostic::DanglingReference { .. })));
//!     }
//!     Validation::Success(_) => unreachable!(),
//! }
//! ```

pub mod diagnostics;
pub mod diagram;
pub mod validator;

pub use diagnostics::{Diagnostic, Endpoint, ValidationReport};
pub use diagram::to_plantuml;
pub use validator::{ModelValidation, ModelValidator};

use crate::core::{Event, State};
use crate::registry::ModelRegistry;

/// Run every model check against `registry`, starting from `start`.
///
/// Reports dangling rule endpoints, states referenced by rules without a
/// descriptor, and registered states that no chain of rules reaches from
/// `start`. Findings are non-fatal diagnostics for the model author.
pub fn revert_model<S: State, E: Event>(
    registry: &ModelRegistry<S, E>,
    start: &S,
) -> ModelValidation<S, E> {
    ModelValidator::new(registry, start.clone()).validate()
}
