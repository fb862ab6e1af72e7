//! World clock for gameplay time
//!
//! Counts discrete steps. Capture freezes it; only a new session thaws it.

use serde::{Deserialize, Serialize};

use crate::core::types::Tick;

/// Tracks gameplay-affecting time advancement
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorldClock {
    tick: Tick,
    frozen: bool,
}

impl WorldClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance one step. Returns false (and does nothing) while frozen.
    pub fn advance(&mut self) -> bool {
        if self.frozen {
            return false;
        }
        self.tick += 1;
        true
    }

    pub fn current_tick(&self) -> Tick {
        self.tick
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    /// Thaw and rewind to tick 0 for a fresh session
    pub fn restart(&mut self) {
        self.tick = 0;
        self.frozen = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_advances() {
        let mut clock = WorldClock::new();
        assert!(clock.advance());
        assert!(clock.advance());
        assert_eq!(clock.current_tick(), 2);
    }

    #[test]
    fn test_frozen_clock_does_not_advance() {
        let mut clock = WorldClock::new();
        clock.advance();
        clock.freeze();

        assert!(!clock.advance());
        assert_eq!(clock.current_tick(), 1);
        assert!(clock.is_frozen());
    }

    #[test]
    fn test_restart_thaws_and_rewinds() {
        let mut clock = WorldClock::new();
        clock.advance();
        clock.freeze();
        clock.restart();

        assert!(!clock.is_frozen());
        assert_eq!(clock.current_tick(), 0);
        assert!(clock.advance());
    }
}
