//! Suspicion meter
//!
//! Suspicion accumulates from misdeeds and drains with observed good deeds.
//! It is bounded on both ends; reaching full scale ends the session.

use serde::{Deserialize, Serialize};

use crate::capture::{CaptureGate, CaptureReason};
use crate::core::config::StealthConfig;
use crate::events::{CoreEvent, EventLog};

/// Bounded suspicion score
///
/// Invariant: `0 <= value <= max_value`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuspicionState {
    value: i32,
    max_value: i32,
    cell_size: i32,
}

impl SuspicionState {
    pub fn new(value: i32, max_value: i32, cell_size: i32) -> Self {
        let max_value = max_value.max(0);
        Self {
            value: value.clamp(0, max_value),
            max_value,
            cell_size: cell_size.max(1),
        }
    }

    pub fn value(&self) -> i32 {
        self.value
    }

    pub fn max_value(&self) -> i32 {
        self.max_value
    }

    pub fn cell_size(&self) -> i32 {
        self.cell_size
    }

    /// Segments of the bar a full meter shows (never zero)
    pub fn max_cells(&self) -> i32 {
        (self.max_value / self.cell_size).max(1)
    }

    /// Segments currently lit
    pub fn filled_cells(&self) -> i32 {
        (self.value / self.cell_size).clamp(0, self.max_cells())
    }

    pub fn is_full(&self) -> bool {
        self.value >= self.max_value
    }
}

/// Owns the session's [`SuspicionState`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuspicionMeter {
    state: SuspicionState,
    capture_when_full: bool,
}

impl SuspicionMeter {
    pub fn new(config: &StealthConfig) -> Self {
        Self {
            state: SuspicionState::new(config.initial_value, config.max_value, config.cell_size),
            capture_when_full: config.capture_when_full,
        }
    }

    pub fn state(&self) -> &SuspicionState {
        &self.state
    }

    pub fn value(&self) -> i32 {
        self.state.value
    }

    pub fn filled_cells(&self) -> i32 {
        self.state.filled_cells()
    }

    /// Shift suspicion by a signed delta
    ///
    /// Returns whether the value changed. No-op once captured.
    pub fn add(&mut self, delta: i32, gate: &mut CaptureGate, events: &mut EventLog) -> bool {
        if delta == 0 {
            return false;
        }
        let target = self.state.value.saturating_add(delta);
        self.apply(target, gate, events)
    }

    /// Overwrite suspicion (clamped into range)
    ///
    /// Returns whether the value changed. No-op once captured.
    pub fn set_to(&mut self, value: i32, gate: &mut CaptureGate, events: &mut EventLog) -> bool {
        self.apply(value, gate, events)
    }

    /// Trip the gate if the meter already sits at full scale
    ///
    /// Covers a session configured to start full.
    pub fn check_full(&self, gate: &mut CaptureGate, events: &mut EventLog) {
        if self.capture_when_full && self.state.is_full() && !gate.is_captured() {
            gate.trip(CaptureReason::SuspicionLimit, events);
        }
    }

    /// Back to the configured starting value for a new session
    pub(crate) fn restart(&mut self, config: &StealthConfig, events: &mut EventLog) {
        *self = Self::new(config);
        events.push(self.changed_event());
    }

    fn apply(&mut self, target: i32, gate: &mut CaptureGate, events: &mut EventLog) -> bool {
        if gate.is_captured() {
            return false;
        }

        let clamped = target.clamp(0, self.state.max_value);
        if clamped == self.state.value {
            return false;
        }

        tracing::debug!(
            "Suspicion {} -> {} ({}/{} cells)",
            self.state.value,
            clamped,
            clamped / self.state.cell_size,
            self.state.max_cells()
        );
        self.state.value = clamped;
        events.push(self.changed_event());

        if self.state.is_full() {
            events.push(CoreEvent::SuspicionFull {
                value: self.state.value,
            });
            self.check_full(gate, events);
        }

        true
    }

    fn changed_event(&self) -> CoreEvent {
        CoreEvent::SuspicionChanged {
            value: self.state.value,
            max_value: self.state.max_value,
            filled_cells: self.state.filled_cells(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meter_with(initial: i32) -> SuspicionMeter {
        SuspicionMeter::new(&StealthConfig {
            initial_value: initial,
            ..StealthConfig::default()
        })
    }

    #[test]
    fn test_filled_cells() {
        let state = SuspicionState::new(35, 120, 10);
        assert_eq!(state.filled_cells(), 3);
        assert_eq!(state.max_cells(), 12);

        let full = SuspicionState::new(120, 120, 10);
        assert_eq!(full.filled_cells(), 12);
    }

    #[test]
    fn test_state_clamps_on_construction() {
        assert_eq!(SuspicionState::new(-5, 120, 10).value(), 0);
        assert_eq!(SuspicionState::new(500, 120, 10).value(), 120);
    }

    #[test]
    fn test_add_notifies_with_cells() {
        let mut meter = meter_with(20);
        let mut gate = CaptureGate::new();
        let mut events = EventLog::new();

        assert!(meter.add(20, &mut gate, &mut events));

        assert_eq!(meter.value(), 40);
        assert_eq!(
            events.events,
            vec![CoreEvent::SuspicionChanged {
                value: 40,
                max_value: 120,
                filled_cells: 4
            }]
        );
    }

    #[test]
    fn test_add_zero_is_silent() {
        let mut meter = meter_with(20);
        let mut gate = CaptureGate::new();
        let mut events = EventLog::new();

        assert!(!meter.add(0, &mut gate, &mut events));
        assert_eq!(meter.value(), 20);
        assert!(events.is_empty());
    }

    #[test]
    fn test_clamps_at_zero() {
        let mut meter = meter_with(5);
        let mut gate = CaptureGate::new();
        let mut events = EventLog::new();

        meter.add(-10, &mut gate, &mut events);
        assert_eq!(meter.value(), 0);

        // Already at the floor: nothing changes, nothing is reported
        events.clear();
        assert!(!meter.add(-10, &mut gate, &mut events));
        assert!(events.is_empty());
    }

    #[test]
    fn test_full_scale_trips_gate_once() {
        let mut meter = meter_with(20);
        let mut gate = CaptureGate::new();
        let mut events = EventLog::new();

        meter.add(100, &mut gate, &mut events);

        assert_eq!(meter.value(), 120);
        assert!(gate.is_captured());
        assert_eq!(gate.reason(), Some(&CaptureReason::SuspicionLimit));
        assert_eq!(events.capture_count(), 1);
        assert!(events
            .events
            .contains(&CoreEvent::SuspicionFull { value: 120 }));

        events.clear();
        assert!(!meter.add(10, &mut gate, &mut events));
        assert_eq!(meter.value(), 120);
        assert!(events.is_empty());
    }

    #[test]
    fn test_overflowing_add_saturates() {
        let mut meter = meter_with(20);
        let mut gate = CaptureGate::new();
        let mut events = EventLog::new();

        meter.add(i32::MAX, &mut gate, &mut events);
        assert_eq!(meter.value(), 120);
    }

    #[test]
    fn test_set_to_clamps() {
        let mut meter = meter_with(20);
        let mut gate = CaptureGate::new();
        let mut events = EventLog::new();

        meter.set_to(-5, &mut gate, &mut events);
        assert_eq!(meter.value(), 0);

        meter.set_to(75, &mut gate, &mut events);
        assert_eq!(meter.value(), 75);
        assert_eq!(meter.filled_cells(), 7);
    }

    #[test]
    fn test_frozen_after_capture() {
        let mut meter = meter_with(20);
        let mut gate = CaptureGate::new();
        let mut events = EventLog::new();
        gate.trip(CaptureReason::CaughtInTheAct, &mut events);
        events.clear();

        assert!(!meter.add(-10, &mut gate, &mut events));
        assert!(!meter.set_to(0, &mut gate, &mut events));
        assert_eq!(meter.value(), 20);
        assert!(events.is_empty());
    }

    #[test]
    fn test_full_without_capture_rule() {
        let mut meter = SuspicionMeter::new(&StealthConfig {
            capture_when_full: false,
            ..StealthConfig::default()
        });
        let mut gate = CaptureGate::new();
        let mut events = EventLog::new();

        meter.add(200, &mut gate, &mut events);

        assert_eq!(meter.value(), 120);
        assert!(!gate.is_captured());
        assert!(events
            .events
            .contains(&CoreEvent::SuspicionFull { value: 120 }));

        // Can still come back down
        meter.add(-10, &mut gate, &mut events);
        assert_eq!(meter.value(), 110);
    }

    #[test]
    fn test_check_full_on_full_start() {
        let meter = meter_with(120);
        let mut gate = CaptureGate::new();
        let mut events = EventLog::new();

        meter.check_full(&mut gate, &mut events);
        assert!(gate.is_captured());
    }
}
