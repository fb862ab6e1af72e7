//! Held-input debounce
//!
//! Some attempts fire once per press, others only after the key has been held
//! for a while (dancing). Counted in steps so the core never reads a clock.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoldTrigger {
    /// Steps the input must be held before firing
    threshold: u32,
    held_for: u32,
    fired: bool,
}

impl HoldTrigger {
    pub fn new(threshold: u32) -> Self {
        Self {
            threshold: threshold.max(1),
            held_for: 0,
            fired: false,
        }
    }

    /// Feed one step of input. True exactly once per hold, on the crossing step.
    pub fn update(&mut self, held: bool) -> bool {
        if !held {
            self.held_for = 0;
            self.fired = false;
            return false;
        }

        self.held_for = self.held_for.saturating_add(1);
        if !self.fired && self.held_for >= self.threshold {
            self.fired = true;
            return true;
        }
        false
    }

    pub fn is_holding(&self) -> bool {
        self.held_for > 0
    }

    pub fn held_for(&self) -> u32 {
        self.held_for
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_once_per_hold() {
        let mut trigger = HoldTrigger::new(3);
        let fired: Vec<bool> = (0..6).map(|_| trigger.update(true)).collect();
        assert_eq!(fired, vec![false, false, true, false, false, false]);
    }

    #[test]
    fn test_release_rearms() {
        let mut trigger = HoldTrigger::new(2);
        trigger.update(true);
        assert!(trigger.update(true));

        assert!(!trigger.update(false));
        assert!(!trigger.is_holding());

        trigger.update(true);
        assert!(trigger.update(true));
    }

    #[test]
    fn test_short_tap_never_fires() {
        let mut trigger = HoldTrigger::new(5);
        for _ in 0..3 {
            for _ in 0..4 {
                assert!(!trigger.update(true));
            }
            trigger.update(false);
        }
    }

    #[test]
    fn test_zero_threshold_fires_on_first_step() {
        let mut trigger = HoldTrigger::new(0);
        assert!(trigger.update(true));
    }
}
