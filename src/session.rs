//! Play session - wires visibility, resolution, suspicion and capture together
//!
//! All calls are synchronous and complete within the step they are made in.
//! Every notification raised during a call is stamped with the current tick,
//! forwarded to the presentation sink (if any) and kept until drained.

use crate::actions::{ActionKind, ActionOutcome, ActionRequest, ActionResolver};
use crate::capture::{CaptureGate, CaptureReason, CaptureState};
use crate::core::clock::WorldClock;
use crate::core::config::StealthConfig;
use crate::core::error::Result;
use crate::core::types::{EntityId, SourceId, Tick};
use crate::events::{CoreEvent, EventLog, EventRecord, PresentationSink};
use crate::suspicion::{SuspicionMeter, SuspicionState};
use crate::visibility::{VisibilityRegistry, VisibilitySnapshot};

pub struct Session {
    config: StealthConfig,
    clock: WorldClock,
    visibility: VisibilityRegistry,
    meter: SuspicionMeter,
    gate: CaptureGate,
    resolver: ActionResolver,
    history: Vec<EventRecord>,
    sink: Option<Box<dyn PresentationSink>>,
}

impl Session {
    /// Start a session with a validated config
    pub fn new(config: StealthConfig) -> Result<Self> {
        config.validate()?;

        let mut session = Self {
            clock: WorldClock::new(),
            visibility: VisibilityRegistry::new(),
            meter: SuspicionMeter::new(&config),
            gate: CaptureGate::new(),
            resolver: ActionResolver::new(config.deltas),
            history: Vec::new(),
            sink: None,
            config,
        };
        session.announce_start();
        Ok(session)
    }

    /// Start a session from the process-wide config
    pub fn from_global_config() -> Result<Self> {
        Self::new(crate::core::config::config().clone())
    }

    /// Install or remove the presentation collaborator
    pub fn set_sink(&mut self, sink: Option<Box<dyn PresentationSink>>) {
        self.sink = sink;
    }

    pub fn config(&self) -> &StealthConfig {
        &self.config
    }

    // === ENTITIES & VISIBILITY ===

    /// Create and track a new entity
    pub fn spawn_entity(&mut self) -> EntityId {
        let id = EntityId::new();
        self.visibility.register(id);
        id
    }

    pub fn register_entity(&mut self, entity: EntityId) {
        self.visibility.register(entity);
    }

    pub fn despawn_entity(&mut self, entity: EntityId) -> bool {
        self.visibility.unregister(entity).is_some()
    }

    pub fn detection_enter(&mut self, entity: EntityId, source: SourceId) -> Result<()> {
        self.visibility.enter(entity, source)
    }

    pub fn detection_exit(&mut self, entity: EntityId, source: SourceId) -> Result<()> {
        self.visibility.exit(entity, source)
    }

    pub fn is_seen(&self, entity: EntityId) -> bool {
        self.visibility.is_seen(entity)
    }

    pub fn visibility(&self) -> &VisibilityRegistry {
        &self.visibility
    }

    pub fn snapshot(&self, actor: EntityId, target: Option<EntityId>) -> VisibilitySnapshot {
        self.visibility.snapshot(actor, target)
    }

    // === ACTIONS ===

    /// Resolve one attempt
    pub fn resolve(&mut self, request: ActionRequest) -> ActionOutcome {
        let mut events = EventLog::new();
        let outcome = self
            .resolver
            .resolve(&request, &mut self.meter, &mut self.gate, &mut events);
        events.push(CoreEvent::ActionResolved {
            kind: request.kind,
            outcome: outcome.clone(),
        });
        self.commit(events);
        outcome
    }

    /// Resolve an attempt using the live visibility of `actor` and `target`
    pub fn attempt(
        &mut self,
        kind: ActionKind,
        actor: EntityId,
        target: Option<EntityId>,
        delta: Option<i32>,
    ) -> ActionOutcome {
        let mut request = ActionRequest::from_snapshot(kind, self.snapshot(actor, target));
        request.requested_delta = delta;
        self.resolve(request)
    }

    // === SUSPICION ===

    pub fn add_suspicion(&mut self, delta: i32) -> bool {
        let mut events = EventLog::new();
        let changed = self.meter.add(delta, &mut self.gate, &mut events);
        self.commit(events);
        changed
    }

    pub fn set_suspicion(&mut self, value: i32) -> bool {
        let mut events = EventLog::new();
        let changed = self.meter.set_to(value, &mut self.gate, &mut events);
        self.commit(events);
        changed
    }

    pub fn suspicion(&self) -> &SuspicionState {
        self.meter.state()
    }

    // === CAPTURE ===

    /// Capture on contact with a world trigger (security guard touch)
    pub fn capture_by_contact(&mut self, reason: impl Into<String>) -> bool {
        let mut events = EventLog::new();
        let tripped = self
            .gate
            .trip(CaptureReason::Other(reason.into()), &mut events);
        self.commit(events);
        tripped
    }

    pub fn is_captured(&self) -> bool {
        self.gate.is_captured()
    }

    pub fn capture_state(&self) -> CaptureState {
        self.gate.state()
    }

    pub fn capture_reason(&self) -> Option<&CaptureReason> {
        self.gate.reason()
    }

    /// The only way back to Free: a brand new session
    ///
    /// Suspicion returns to its starting value and world time restarts.
    /// Entity registrations and their overlap counts are world state and stay.
    pub fn reset_for_new_session(&mut self) {
        tracing::info!("Starting new session");
        self.gate.reset_for_new_session();
        self.clock.restart();

        let mut events = EventLog::new();
        events.push(CoreEvent::SessionReset);
        self.meter.restart(&self.config, &mut events);
        self.meter.check_full(&mut self.gate, &mut events);
        self.commit(events);
    }

    // === TIME ===

    /// Advance world time one step. Returns false while frozen by capture.
    pub fn tick(&mut self) -> bool {
        self.clock.advance()
    }

    pub fn current_tick(&self) -> Tick {
        self.clock.current_tick()
    }

    pub fn is_frozen(&self) -> bool {
        self.clock.is_frozen()
    }

    // === EVENTS ===

    pub fn events(&self) -> &[EventRecord] {
        &self.history
    }

    pub fn drain_events(&mut self) -> Vec<EventRecord> {
        std::mem::take(&mut self.history)
    }

    fn announce_start(&mut self) {
        let mut events = EventLog::new();
        let state = *self.meter.state();
        events.push(CoreEvent::SuspicionChanged {
            value: state.value(),
            max_value: state.max_value(),
            filled_cells: state.filled_cells(),
        });
        self.meter.check_full(&mut self.gate, &mut events);
        self.commit(events);
    }

    fn commit(&mut self, mut events: EventLog) {
        let tick = self.clock.current_tick();
        for event in events.drain() {
            if matches!(event, CoreEvent::Captured { .. }) {
                self.clock.freeze();
            }
            let record = EventRecord { tick, event };
            if let Some(sink) = self.sink.as_mut() {
                sink.on_event(&record);
            }
            self.history.push(record);
        }
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("tick", &self.clock.current_tick())
            .field("suspicion", self.meter.state())
            .field("capture", &self.gate.state())
            .field("entities", &self.visibility.len())
            .field("has_sink", &self.sink.is_some())
            .finish()
    }
}
