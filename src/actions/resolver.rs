//! Action resolution
//!
//! Decides, from visibility alone, whether an attempt counts, is refused, or
//! gets the player caught. The per-kind visibility policy is fixed:
//!
//! | Kind      | Counts when                                   | Otherwise                            |
//! |-----------|-----------------------------------------------|--------------------------------------|
//! | Good      | target ? anyone seen : actor seen             | refused, must be observed            |
//! | BadPublic | anyone seen                                   | refused, must be observed            |
//! | BadHidden | target ? both hidden : actor hidden           | caught if anyone seen, else refused  |
//!
//! Only the BadHidden row can capture directly; every other capture goes
//! through the suspicion meter.

use crate::actions::kind::{ActionKind, ActionOutcome, ActionRequest, RejectReason};
use crate::capture::{CaptureGate, CaptureReason};
use crate::core::config::DeltaDefaults;
use crate::events::EventLog;
use crate::suspicion::SuspicionMeter;

/// What the policy says about an attempt, before anything is applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Accept { delta: i32 },
    Reject(RejectReason),
    CaughtInTheAct,
    AlreadyCaptured,
}

/// Apply the per-kind policy. Pure.
pub fn decide(request: &ActionRequest, captured: bool, deltas: &DeltaDefaults) -> Verdict {
    if captured {
        return Verdict::AlreadyCaptured;
    }

    let has_target = request.target_visible.is_some();
    let delta = request
        .requested_delta
        .unwrap_or_else(|| deltas.for_kind(request.kind));

    match request.kind {
        ActionKind::Good => {
            let observed = if has_target {
                request.any_seen()
            } else {
                request.actor_visible
            };
            if observed {
                Verdict::Accept { delta }
            } else {
                Verdict::Reject(RejectReason::MustBeObserved)
            }
        }
        ActionKind::BadPublic => {
            if request.any_seen() {
                Verdict::Accept { delta }
            } else {
                Verdict::Reject(RejectReason::MustBeObserved)
            }
        }
        ActionKind::BadHidden => {
            let concealed = if has_target {
                request.both_hidden()
            } else {
                request.actor_hidden()
            };
            if concealed {
                Verdict::Accept { delta }
            } else if request.any_seen() {
                Verdict::CaughtInTheAct
            } else {
                Verdict::Reject(RejectReason::MustBeHidden)
            }
        }
    }
}

/// Resolves attempts against a session's meter and gate
///
/// Holds only the configured default magnitudes.
#[derive(Debug, Clone, Copy, Default)]
pub struct ActionResolver {
    deltas: DeltaDefaults,
}

impl ActionResolver {
    pub fn new(deltas: DeltaDefaults) -> Self {
        Self { deltas }
    }

    pub fn deltas(&self) -> &DeltaDefaults {
        &self.deltas
    }

    /// Decide and apply. Exactly one outcome per call.
    pub fn resolve(
        &self,
        request: &ActionRequest,
        meter: &mut SuspicionMeter,
        gate: &mut CaptureGate,
        events: &mut EventLog,
    ) -> ActionOutcome {
        let verdict = decide(request, gate.is_captured(), &self.deltas);
        tracing::debug!("{} attempt: {:?}", request.kind.name(), verdict);

        match verdict {
            Verdict::AlreadyCaptured => ActionOutcome::AlreadyCaptured,
            Verdict::Reject(reason) => ActionOutcome::RejectedNoChange { reason },
            Verdict::CaughtInTheAct => {
                gate.trip(CaptureReason::CaughtInTheAct, events);
                ActionOutcome::Captured {
                    reason: CaptureReason::CaughtInTheAct,
                }
            }
            Verdict::Accept { delta } => {
                meter.add(delta, gate, events);
                ActionOutcome::Succeeded { delta }
            }
        }
    }
}
