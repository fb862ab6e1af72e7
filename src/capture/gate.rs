//! Capture gate - the terminal state of a play session
//!
//! Many ways in (full suspicion, caught red-handed, guard contact), one way out:
//! an explicit reset issued by whoever restarts the session.

use serde::{Deserialize, Serialize};

use crate::events::{CoreEvent, EventLog};

/// Capture state of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CaptureState {
    #[default]
    Free,
    Captured,
}

/// Why the player was captured
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CaptureReason {
    /// Seen while performing an act that required concealment
    CaughtInTheAct,
    /// Suspicion meter reached full scale
    SuspicionLimit,
    /// Caller-supplied reason (guard contact and similar world triggers)
    Other(String),
}

impl std::fmt::Display for CaptureReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CaptureReason::CaughtInTheAct => write!(f, "caught performing a hidden act"),
            CaptureReason::SuspicionLimit => write!(f, "suspicion exceeded limit"),
            CaptureReason::Other(reason) => write!(f, "{}", reason),
        }
    }
}

/// One-directional Free -> Captured gate
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CaptureGate {
    state: CaptureState,
    reason: Option<CaptureReason>,
}

impl CaptureGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> CaptureState {
        self.state
    }

    pub fn is_captured(&self) -> bool {
        self.state == CaptureState::Captured
    }

    /// Reason of the capture that closed the gate, if any
    pub fn reason(&self) -> Option<&CaptureReason> {
        self.reason.as_ref()
    }

    /// Close the gate
    ///
    /// Returns true only for the call that actually transitioned. Later calls
    /// keep the first reason and raise no notification.
    pub fn trip(&mut self, reason: CaptureReason, events: &mut EventLog) -> bool {
        if self.is_captured() {
            tracing::debug!("Capture gate already closed, ignoring trip ({})", reason);
            return false;
        }

        tracing::info!("Captured: {}", reason);
        self.state = CaptureState::Captured;
        self.reason = Some(reason.clone());
        events.push(CoreEvent::Captured { reason });
        true
    }

    /// Reopen the gate for a brand new session
    ///
    /// Only the session-restart path calls this; gameplay code never does.
    pub(crate) fn reset_for_new_session(&mut self) {
        self.state = CaptureState::Free;
        self.reason = None;
    }
}
