//! State identifiers.
//!
//! A state is a small closed identifier. The "no state yet" condition is not a
//! value of the identifier type; the dispatcher models it as `Option<S>`.

use serde::{de::DeserializeOwned, Serialize};
use std::fmt::Debug;
use std::hash::Hash;

/// Trait for state identifiers registered with a model.
///
/// # Required Traits
///
/// - `Clone`: identifiers are copied into transition rules and the trace
/// - `Eq` + `Hash`: identifiers key the registry tables
/// - `Debug`: identifiers appear in diagnostics
/// - `Serialize` + `Deserialize`: the trace and validation reports are serializable
///
/// # Example
///
/// ```rust
/// use fsm_dispatch::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
/// enum Turnstile {
///     Locked,
///     Unlocked,
///     Broken,
/// }
///
/// impl State for Turnstile {
///     fn name(&self) -> &str {
///         match self {
///             Self::Locked => "Locked",
///             Self::Unlocked => "Unlocked",
///             Self::Broken => "Broken",
///         }
///     }
///
///     fn is_final(&self) -> bool {
///         matches!(self, Self::Broken)
///     }
/// }
///
/// assert_eq!(Turnstile::Locked.name(), "Locked");
/// assert!(Turnstile::Broken.is_final());
/// ```
pub trait State:
    Clone + Eq + Hash + Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Get the state's name for display/logging.
    fn name(&self) -> &str;

    /// Check if this is a final (terminal) state.
    ///
    /// Entering a final state tears down the run loop. Machines that are
    /// meant to run until externally terminated leave this at the default.
    ///
    /// Default implementation returns `false`.
    fn is_final(&self) -> bool {
        false
    }
}
