//! Notifications raised by the core for presentation collaborators
//!
//! Components push [`CoreEvent`]s into an [`EventLog`] handed to them by `&mut`.
//! The session stamps each one with the current tick and keeps it until the
//! caller drains it, optionally forwarding to a [`PresentationSink`] on the way.

use serde::{Deserialize, Serialize};

use crate::actions::{ActionKind, ActionOutcome};
use crate::capture::CaptureReason;
use crate::core::types::Tick;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoreEvent {
    /// Meter value moved; drives a segmented bar or numeric display
    SuspicionChanged {
        value: i32,
        max_value: i32,
        filled_cells: i32,
    },
    /// Meter reached full scale
    SuspicionFull { value: i32 },
    /// Capture gate tripped
    Captured { reason: CaptureReason },
    /// Session restarted from outside
    SessionReset,
    /// An action attempt was resolved
    ActionResolved {
        kind: ActionKind,
        outcome: ActionOutcome,
    },
}

/// A core event stamped with the tick it happened on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub tick: Tick,
    pub event: CoreEvent,
}

/// Events raised during a single operation
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    pub events: Vec<CoreEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: CoreEvent) {
        self.events.push(event);
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Number of capture notifications in the log
    pub fn capture_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, CoreEvent::Captured { .. }))
            .count()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn drain(&mut self) -> std::vec::Drain<'_, CoreEvent> {
        self.events.drain(..)
    }
}

/// Presentation collaborator (bar display, captured overlay, feedback audio)
///
/// Optional: a session without one still queues every record.
pub trait PresentationSink {
    fn on_event(&mut self, record: &EventRecord);
}

/// Sink that ignores everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl PresentationSink for NullSink {
    fn on_event(&mut self, _record: &EventRecord) {}
}
