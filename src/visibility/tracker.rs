//! Per-entity detection overlap counter
//!
//! Several fields of view can cover the same entity at once, so "seen" is a
//! reference count rather than a flag: one source leaving must not clear it
//! while another still overlaps.

use serde::{Deserialize, Serialize};

/// Visibility state of one trackable entity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibilityTracker {
    seen_count: u32,
}

impl VisibilityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// A detection source started overlapping this entity
    pub fn on_detection_enter(&mut self) {
        self.seen_count = self.seen_count.saturating_add(1);
    }

    /// A detection source stopped overlapping this entity
    ///
    /// An unmatched exit is absorbed at zero.
    pub fn on_detection_exit(&mut self) {
        self.seen_count = self.seen_count.saturating_sub(1);
    }

    pub fn is_seen(&self) -> bool {
        self.seen_count > 0
    }

    pub fn seen_count(&self) -> u32 {
        self.seen_count
    }
}
