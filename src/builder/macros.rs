//! Macros for declaring state and event identifier enums.

/// Generate a state identifier enum and its `State` implementation.
///
/// # Example
///
/// ```
/// use fsm_dispatch::state_enum;
/// use fsm_dispatch::core::State;
///
/// state_enum! {
///     pub enum Greenhouse {
///         Start,
///         Init,
///         WaitInput,
///         CheckChange,
///         Shutdown,
///     }
///     final: [Shutdown]
/// }
///
/// assert_eq!(Greenhouse::CheckChange.name(), "CheckChange");
/// assert!(Greenhouse::Shutdown.is_final());
/// ```
#[macro_export]
macro_rules! state_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }

        $(final: [$($final:ident),* $(,)?])?
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::State for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }

            #[allow(unreachable_patterns)]
            fn is_final(&self) -> bool {
                match self {
                    $($(Self::$final => true,)*)?
                    _ => false,
                }
            }
        }
    };
}

/// Generate an event identifier enum and its `Event` implementation.
///
/// # Example
///
/// ```
/// use fsm_dispatch::event_enum;
/// use fsm_dispatch::core::Event;
///
/// event_enum! {
///     pub enum Sensor {
///         InputChanged,
///         Co2Low,
///         TooCold,
///     }
/// }
///
/// assert_eq!(Sensor::TooCold.name(), "TooCold");
/// ```
#[macro_export]
macro_rules! event_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::Event for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::core::{Event, State};

    state_enum! {
        enum TestState {
            Start,
            Init,
            WaitInput,
            Halted,
        }
        final: [Halted]
    }

    event_enum! {
        enum TestEvent {
            Init,
            InitSuccess,
        }
    }

    #[test]
    fn state_enum_macro_generates_trait() {
        assert_eq!(TestState::Start.name(), "Start");
        assert_eq!(TestState::WaitInput.name(), "WaitInput");
        assert!(!TestState::Init.is_final());
        assert!(TestState::Halted.is_final());
    }

    #[test]
    fn event_enum_macro_generates_trait() {
        assert_eq!(TestEvent::Init.name(), "Init");
        assert_eq!(TestEvent::InitSuccess.name(), "InitSuccess");
    }

    #[test]
    fn state_enum_supports_visibility() {
        state_enum! {
            pub enum PublicState {
                A,
                B,
            }
            final: [B]
        }

        let _state = PublicState::A;
    }

    #[test]
    fn state_enum_works_without_final() {
        state_enum! {
            enum MinimalState {
                One,
                Two,
            }
        }

        assert!(!MinimalState::One.is_final());
        assert!(!MinimalState::Two.is_final());
    }
}
