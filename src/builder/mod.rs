//! Builder API for ergonomic model construction.
//!
//! This module provides a fluent builder and macros for declaring states,
//! events, and transition tables with minimal boilerplate.

pub mod macros;
pub mod model;

pub use model::ModelBuilder;

use crate::core::{Event, State};
use crate::registry::{ModelRegistry, RegistryError, StateDescriptor};

/// Build a model from a bare transition table.
///
/// Every state named by a rule is registered without actions, in order of
/// first appearance, so the result passes the validator's reference checks.
///
/// # Example
///
/// ```
/// use fsm_dispatch::builder::table_model;
/// use fsm_dispatch::{event_enum, state_enum};
///
/// state_enum! {
///     enum Turnstile { Locked, Unlocked }
/// }
///
/// event_enum! {
///     enum Input { Coin, Pass }
/// }
///
/// let model = table_model([
///     (Turnstile::Locked, Input::Coin, Turnstile::Unlocked),
///     (Turnstile::Unlocked, Input::Pass, Turnstile::Locked),
/// ])
/// .unwrap();
///
/// assert_eq!(model.state_count(), 2);
/// assert_eq!(model.lookup(&Turnstile::Locked, &Input::Coin), Some(&Turnstile::Unlocked));
/// ```
pub fn table_model<S, E, I>(rules: I) -> Result<ModelRegistry<S, E>, RegistryError>
where
    S: State,
    E: Event,
    I: IntoIterator<Item = (S, E, S)>,
{
    let mut registry = ModelRegistry::new();
    for (from, event, to) in rules {
        for state in [&from, &to] {
            if !registry.contains_state(state) {
                registry.add_state(StateDescriptor::new(state.clone()))?;
            }
        }
        registry.add_transition(from, event, to)?;
    }
    Ok(registry)
}
