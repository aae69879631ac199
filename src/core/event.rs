//! Event identifiers.

use serde::{de::DeserializeOwned, Serialize};
use std::fmt::Debug;
use std::hash::Hash;

/// Trait for event identifiers that trigger transitions.
///
/// Only the identity of an event selects a transition; events carry no
/// payload the dispatcher inspects. An absent event is `None` at the queue,
/// so it can never be matched against a rule.
///
/// # Example
///
/// ```rust
/// use fsm_dispatch::core::Event;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
/// enum Turnstile {
///     Coin,
///     Pass,
/// }
///
/// impl Event for Turnstile {
///     fn name(&self) -> &str {
///         match self {
///             Self::Coin => "Coin",
///             Self::Pass => "Pass",
///         }
///     }
/// }
///
/// assert_eq!(Turnstile::Coin.name(), "Coin");
/// ```
pub trait Event:
    Clone + Eq + Hash + Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Get the event's name for display/logging.
    fn name(&self) -> &str;
}
