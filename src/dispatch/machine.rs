//! The run loop: consumes events and applies transition rules.

use crate::config::{ConfigError, EngineConfig, UnexpectedEventPolicy};
use crate::core::{DispatchTrace, Event, State, TraceEntry};
use crate::dispatch::context::Context;
use crate::dispatch::error::DispatchError;
use crate::dispatch::source::{EventSource, Exhausted};
use crate::queue::EventQueue;
use crate::registry::ModelRegistry;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use tracing::{debug, info, warn};

/// Result of dispatching a single event
#[derive(Clone, Debug, PartialEq)]
pub enum StepOutcome<S: State, E: Event> {
    /// A rule matched; exit and entry actions ran
    Transitioned { from: S, event: E, to: S },

    /// No rule matched and the event was discarded
    Flushed { state: S, event: E },

    /// No rule matched and the event was held for a later state
    Held { state: S, event: E },

    /// Nothing was pending
    Idle,
}

/// Why the run loop returned
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopReason {
    /// Queue empty and the event source has nothing more
    Drained,

    /// A final state was entered
    FinalState,

    /// An action called `Context::request_stop`
    Stopped,

    /// The configured step limit was reached
    StepLimit,
}

/// Summary of a completed run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct RunSummary<S: State> {
    /// State the machine was in when the loop returned
    pub state: S,
    pub reason: StopReason,
    /// Events dispatched during this run
    pub steps: u64,
    /// Events still held under the hold policy
    pub held: usize,
    /// Events left in the queue, including held events re-offered but not yet dispatched
    pub pending: usize,
}

/// Table-driven state machine runtime.
///
/// The dispatcher takes ownership of a `ModelRegistry`; the model cannot be
/// changed once it is handed over. All actions run synchronously on the
/// caller's thread and may only enqueue events, so chains of transitions
/// unfold iteratively in FIFO order.
///
/// # Example
///
/// ```rust
/// use fsm_dispatch::builder::ModelBuilder;
/// use fsm_dispatch::dispatch::Dispatcher;
/// use fsm_dispatch::{event_enum, state_enum};
///
/// state_enum! {
///     enum Plant { Start, Init, WaitInput }
/// }
///
/// event_enum! {
///     enum PlantEvent { Init, InitSuccess }
/// }
///
/// let model = ModelBuilder::new()
///     .state(Plant::Start)?
///     .state_with_entry(Plant::Init, |ctx| ctx.add_event(PlantEvent::InitSuccess))?
///     .state(Plant::WaitInput)?
///     .transition(Plant::Start, PlantEvent::Init, Plant::Init)?
///     .transition(Plant::Init, PlantEvent::InitSuccess, Plant::WaitInput)?
///     .build();
///
/// let mut dispatcher = Dispatcher::new(model);
/// dispatcher.flush_unexpected_events(true)?;
/// let summary = dispatcher.run_state_machine(Plant::Start, PlantEvent::Init)?;
///
/// assert_eq!(summary.state, Plant::WaitInput);
/// assert_eq!(dispatcher.state(), Some(&Plant::WaitInput));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct Dispatcher<S: State, E: Event> {
    registry: ModelRegistry<S, E>,
    queue: EventQueue<E>,
    held: VecDeque<E>,
    current: Option<S>,
    config: EngineConfig,
    trace: DispatchTrace<S, E>,
    started: bool,
    stop_requested: bool,
    steps: u64,
}

impl<S: State, E: Event> Dispatcher<S, E> {
    /// Create a dispatcher with the default configuration.
    pub fn new(registry: ModelRegistry<S, E>) -> Self {
        Self::build(registry, EngineConfig::default())
    }

    /// Create a dispatcher with a validated configuration.
    pub fn with_config(
        registry: ModelRegistry<S, E>,
        config: EngineConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(registry, config))
    }

    fn build(registry: ModelRegistry<S, E>, config: EngineConfig) -> Self {
        Self {
            registry,
            queue: EventQueue::new(),
            held: VecDeque::new(),
            current: None,
            trace: DispatchTrace::with_capacity(config.trace_capacity),
            config,
            started: false,
            stop_requested: false,
            steps: 0,
        }
    }

    /// Choose between discarding (`true`) and holding (`false`) events that
    /// match no rule.
    ///
    /// # Errors
    ///
    /// `DispatchError::PolicyLocked` once the dispatcher has started.
    pub fn flush_unexpected_events(&mut self, flush: bool) -> Result<(), DispatchError> {
        if self.started {
            return Err(DispatchError::PolicyLocked);
        }
        self.config = self.config.clone().flush_unexpected_events(flush);
        Ok(())
    }

    /// Enqueue an externally observed event.
    pub fn add_event(&mut self, event: E) {
        self.queue.enqueue(event);
    }

    /// Current state, or `None` before the dispatcher starts (pure)
    pub fn state(&self) -> Option<&S> {
        self.current.as_ref()
    }

    /// Check if the machine is in a final state (pure)
    pub fn is_final(&self) -> bool {
        self.current.as_ref().is_some_and(S::is_final)
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn registry(&self) -> &ModelRegistry<S, E> {
        &self.registry
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn policy(&self) -> UnexpectedEventPolicy {
        self.config.unexpected_events
    }

    /// Events waiting to be dispatched, head first.
    pub fn pending_events(&self) -> impl Iterator<Item = &E> {
        self.queue.iter()
    }

    /// Events held under the hold policy, oldest first.
    pub fn held_events(&self) -> impl Iterator<Item = &E> {
        self.held.iter()
    }

    pub fn trace(&self) -> &DispatchTrace<S, E> {
        &self.trace
    }

    /// Total events dispatched since construction.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Enter `initial_state` without running its entry action, enqueue
    /// `initial_event`, and lock the configuration.
    ///
    /// Events added before the first start are dispatched ahead of
    /// `initial_event`. Starting again discards whatever a previous run left
    /// pending or held, so `initial_event` is the first event the new run
    /// dispatches. Use [`Dispatcher::resume`] to continue a run instead.
    pub fn start(&mut self, initial_state: S, initial_event: E) {
        if self.started {
            if !self.queue.is_empty() || !self.held.is_empty() {
                warn!(
                    pending = self.queue.len(),
                    held = self.held.len(),
                    "discarding events left by the previous run"
                );
            }
            self.queue.clear();
            self.held.clear();
        }
        info!(
            state = initial_state.name(),
            event = initial_event.name(),
            policy = ?self.config.unexpected_events,
            "starting state machine"
        );
        self.current = Some(initial_state);
        self.started = true;
        self.stop_requested = false;
        self.queue.enqueue(initial_event);
    }

    /// Dispatch the next pending event.
    ///
    /// On a match the current state's exit action runs, the state changes,
    /// and the new state's entry action runs. Self-transitions run both.
    ///
    /// # Errors
    ///
    /// `DispatchError::NotStarted` before [`Dispatcher::start`].
    pub fn step(&mut self) -> Result<StepOutcome<S, E>, DispatchError> {
        let current = self.current.clone().ok_or(DispatchError::NotStarted)?;
        let Some(event) = self.queue.dequeue() else {
            return Ok(StepOutcome::Idle);
        };
        self.steps += 1;

        let Some(target) = self.registry.lookup(&current, &event).cloned() else {
            return Ok(self.unexpected(current, event));
        };

        self.exit(&current);
        self.current = Some(target.clone());
        self.enter(&target);

        debug!(
            step = self.steps,
            from = current.name(),
            event = event.name(),
            to = target.name(),
            "transitioned"
        );
        self.trace.record(TraceEntry::Transitioned {
            from: current.clone(),
            event: event.clone(),
            to: target.clone(),
            step: self.steps,
            timestamp: Utc::now(),
        });

        if !self.held.is_empty() {
            debug!(count = self.held.len(), state = target.name(), "re-offering held events");
            self.queue.requeue_front(self.held.drain(..).collect::<Vec<_>>());
        }

        Ok(StepOutcome::Transitioned {
            from: current,
            event,
            to: target,
        })
    }

    fn unexpected(&mut self, state: S, event: E) -> StepOutcome<S, E> {
        let timestamp = Utc::now();
        match self.config.unexpected_events {
            UnexpectedEventPolicy::Flush => {
                debug!(state = state.name(), event = event.name(), "flushed unexpected event");
                self.trace.record(TraceEntry::Flushed {
                    state: state.clone(),
                    event: event.clone(),
                    step: self.steps,
                    timestamp,
                });
                StepOutcome::Flushed { state, event }
            }
            UnexpectedEventPolicy::Hold => {
                warn!(
                    state = state.name(),
                    event = event.name(),
                    held = self.held.len() + 1,
                    "holding unexpected event"
                );
                self.held.push_back(event.clone());
                self.trace.record(TraceEntry::Held {
                    state: state.clone(),
                    event: event.clone(),
                    step: self.steps,
                    timestamp,
                });
                StepOutcome::Held { state, event }
            }
        }
    }

    fn exit(&mut self, state: &S) {
        if let Some(descriptor) = self.registry.descriptor_mut(state) {
            let mut ctx = Context::new(state, &mut self.queue, &mut self.stop_requested);
            descriptor.exit(&mut ctx);
        }
    }

    fn enter(&mut self, state: &S) {
        if let Some(descriptor) = self.registry.descriptor_mut(state) {
            let mut ctx = Context::new(state, &mut self.queue, &mut self.stop_requested);
            descriptor.enter(&mut ctx);
        }
    }

    /// Start in `initial_state` with `initial_event` and run until the queue
    /// drains, a final state is entered, an action requests a stop, or the
    /// step limit is reached.
    pub fn run_state_machine(
        &mut self,
        initial_state: S,
        initial_event: E,
    ) -> Result<RunSummary<S>, DispatchError> {
        self.run_with_source(initial_state, initial_event, &mut Exhausted)
    }

    /// Like [`Dispatcher::run_state_machine`], but when the queue is empty
    /// the loop waits on `source` for the next external event instead of
    /// returning. The loop runs for as long as the source keeps yielding.
    pub fn run_with_source<Src>(
        &mut self,
        initial_state: S,
        initial_event: E,
        source: &mut Src,
    ) -> Result<RunSummary<S>, DispatchError>
    where
        Src: EventSource<S, E>,
    {
        self.start(initial_state, initial_event);
        self.resume(source)
    }

    /// Continue a started machine without resetting its state.
    ///
    /// # Errors
    ///
    /// `DispatchError::NotStarted` before [`Dispatcher::start`].
    pub fn resume<Src>(&mut self, source: &mut Src) -> Result<RunSummary<S>, DispatchError>
    where
        Src: EventSource<S, E>,
    {
        if !self.started {
            return Err(DispatchError::NotStarted);
        }
        self.stop_requested = false;
        let first_step = self.steps;

        let reason = loop {
            if self.stop_requested {
                break StopReason::Stopped;
            }
            if self
                .config
                .max_steps
                .is_some_and(|max| self.steps - first_step >= max)
            {
                break StopReason::StepLimit;
            }

            if self.queue.is_empty() {
                let state = self.current.as_ref().ok_or(DispatchError::NotStarted)?;
                match source.next_event(state) {
                    Some(event) => self.queue.enqueue(event),
                    None => break StopReason::Drained,
                }
                continue;
            }

            if let StepOutcome::Transitioned { to, .. } = self.step()? {
                if to.is_final() {
                    break StopReason::FinalState;
                }
            }
        };

        let state = self.current.clone().ok_or(DispatchError::NotStarted)?;
        let summary = RunSummary {
            state,
            reason,
            steps: self.steps - first_step,
            held: self.held.len(),
            pending: self.queue.len(),
        };
        if summary.held > 0 || summary.pending > 0 {
            warn!(
                held = summary.held,
                pending = summary.pending,
                "run loop returned with undispatched events"
            );
        }
        info!(
            state = summary.state.name(),
            reason = ?summary.reason,
            steps = summary.steps,
            "state machine stopped"
        );
        Ok(summary)
    }
}

impl<S: State, E: Event> fmt::Debug for Dispatcher<S, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("current", &self.current)
            .field("pending", &self.queue.len())
            .field("held", &self.held)
            .field("config", &self.config)
            .field("steps", &self.steps)
            .finish()
    }
}
