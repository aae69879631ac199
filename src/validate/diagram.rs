//! Render a registered model back into PlantUML state-diagram notation.

use crate::core::{Event, State};
use crate::registry::ModelRegistry;
use std::fmt::Write;

/// Render `registry` as a PlantUML state diagram starting at `start`.
///
/// Registered states are declared first, annotated with the actions they
/// carry. Every rule becomes an edge labelled with its event, and final
/// states get an edge to the terminal pseudo-state.
///
/// # Example
///
/// ```
/// use fsm_dispatch::builder::table_model;
/// use fsm_dispatch::validate::to_plantuml;
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
/// let diagram = to_plantuml(&model, &Turnstile::Locked);
/// assert!(diagram.contains("[*] --> Locked"));
/// assert!(diagram.contains("Locked --> Unlocked : Coin"));
/// ```
pub fn to_plantuml<S: State, E: Event>(registry: &ModelRegistry<S, E>, start: &S) -> String {
    let mut out = String::from("@startuml\n");

    for state in registry.states() {
        let _ = writeln!(out, "state {}", state.name());
        if let Some(descriptor) = registry.descriptor(state) {
            if descriptor.has_entry() {
                let _ = writeln!(out, "{} : entry", state.name());
            }
            if descriptor.has_exit() {
                let _ = writeln!(out, "{} : exit", state.name());
            }
        }
    }

    let _ = writeln!(out, "[*] --> {}", start.name());
    for rule in registry.transitions() {
        let _ = writeln!(
            out,
            "{} --> {} : {}",
            rule.from.name(),
            rule.to.name(),
            rule.event.name()
        );
    }

    for state in registry.states().filter(|s| s.is_final()) {
        let _ = writeln!(out, "{} --> [*]", state.name());
    }

    out.push_str("@enduml\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::StateDescriptor;

    crate::state_enum! {
        enum Plant {
            Start,
            Init,
            WaitInput,
            Shutdown,
        }
        final: [Shutdown]
    }

    crate::event_enum! {
        enum PlantEvent {
            Init,
            InitSuccess,
            PowerOff,
        }
    }

    #[test]
    fn diagram_lists_states_edges_and_terminals() {
        let mut registry = ModelRegistry::new();
        registry.add_state(StateDescriptor::new(Plant::Start)).unwrap();
        registry
            .add_state(
                StateDescriptor::new(Plant::Init)
                    .on_entry(|ctx| ctx.add_event(PlantEvent::InitSuccess))
                    .on_exit(|_ctx| {}),
            )
            .unwrap();
        registry.add_state(StateDescriptor::new(Plant::Shutdown)).unwrap();
        registry.add_transition(Plant::Start, PlantEvent::Init, Plant::Init).unwrap();
        registry
            .add_transition(Plant::Init, PlantEvent::InitSuccess, Plant::WaitInput)
            .unwrap();
        registry
            .add_transition(Plant::WaitInput, PlantEvent::PowerOff, Plant::Shutdown)
            .unwrap();

        let diagram = to_plantuml(&registry, &Plant::Start);
        let lines: Vec<&str> = diagram.lines().collect();

        assert_eq!(
            lines,
            vec![
                "@startuml",
                "state Start",
                "state Init",
                "Init : entry",
                "Init : exit",
                "state Shutdown",
                "[*] --> Start",
                "Start --> Init : Init",
                "Init --> WaitInput : InitSuccess",
                "WaitInput --> Shutdown : PowerOff",
                "Shutdown --> [*]",
                "@enduml",
            ]
        );
    }
}
