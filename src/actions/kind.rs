//! Action kinds, attempts and their outcomes

use serde::{Deserialize, Serialize};

use crate::capture::CaptureReason;
use crate::visibility::VisibilitySnapshot;

/// Category of a player attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    /// Beneficial, only counts when someone is watching (dancing, complimenting)
    Good,
    /// Harmful but tolerated if observed (rude in public)
    BadPublic,
    /// Harmful, needs concealment (stealing, relieving oneself in a corner)
    BadHidden,
}

impl ActionKind {
    pub fn all() -> &'static [ActionKind] {
        &[ActionKind::Good, ActionKind::BadPublic, ActionKind::BadHidden]
    }

    pub fn name(&self) -> &'static str {
        match self {
            ActionKind::Good => "good",
            ActionKind::BadPublic => "bad_public",
            ActionKind::BadHidden => "bad_hidden",
        }
    }
}

impl std::str::FromStr for ActionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "good" => Ok(ActionKind::Good),
            "bad_public" | "badpublic" | "public" => Ok(ActionKind::BadPublic),
            "bad_hidden" | "badhidden" | "hidden" => Ok(ActionKind::BadHidden),
            other => Err(format!("unknown action kind '{}'", other)),
        }
    }
}

/// One discrete action attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRequest {
    pub kind: ActionKind,
    pub actor_visible: bool,
    /// `None` for solo actions with no secondary observed object
    pub target_visible: Option<bool>,
    /// `None` means "use the kind's default magnitude"
    pub requested_delta: Option<i32>,
}

impl ActionRequest {
    /// Solo action with the kind's default magnitude
    pub fn solo(kind: ActionKind, actor_visible: bool) -> Self {
        Self {
            kind,
            actor_visible,
            target_visible: None,
            requested_delta: None,
        }
    }

    /// Action on a target object with the kind's default magnitude
    pub fn targeted(kind: ActionKind, actor_visible: bool, target_visible: bool) -> Self {
        Self {
            kind,
            actor_visible,
            target_visible: Some(target_visible),
            requested_delta: None,
        }
    }

    pub fn from_snapshot(kind: ActionKind, snapshot: VisibilitySnapshot) -> Self {
        Self {
            kind,
            actor_visible: snapshot.actor_visible,
            target_visible: snapshot.target_visible,
            requested_delta: None,
        }
    }

    /// Override the default magnitude (signed)
    pub fn with_delta(mut self, delta: i32) -> Self {
        self.requested_delta = Some(delta);
        self
    }

    /// Actor or present target is observed
    pub fn any_seen(&self) -> bool {
        self.actor_visible || self.target_visible == Some(true)
    }

    /// Neither actor nor (if present) target is observed
    pub fn both_hidden(&self) -> bool {
        !self.actor_visible && self.target_visible != Some(true)
    }

    pub fn actor_hidden(&self) -> bool {
        !self.actor_visible
    }
}

/// Why an attempt was turned down without consequences
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RejectReason {
    MustBeObserved,
    MustBeHidden,
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RejectReason::MustBeObserved => write!(f, "must be observed"),
            RejectReason::MustBeHidden => write!(f, "must be hidden"),
        }
    }
}

/// Result of resolving one attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionOutcome {
    /// Accepted; `delta` was forwarded to the suspicion meter
    Succeeded { delta: i32 },
    /// Refused, nothing changed
    RejectedNoChange { reason: RejectReason },
    /// The attempt itself got the player captured
    Captured { reason: CaptureReason },
    /// Session already over; nothing was evaluated
    AlreadyCaptured,
}

impl ActionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ActionOutcome::Succeeded { .. })
    }

    /// Whether the session is over after this outcome
    pub fn is_capture(&self) -> bool {
        matches!(
            self,
            ActionOutcome::Captured { .. } | ActionOutcome::AlreadyCaptured
        )
    }
}

impl std::fmt::Display for ActionOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActionOutcome::Succeeded { delta } => write!(f, "succeeded ({:+})", delta),
            ActionOutcome::RejectedNoChange { reason } => write!(f, "rejected: {}", reason),
            ActionOutcome::Captured { reason } => write!(f, "captured: {}", reason),
            ActionOutcome::AlreadyCaptured => write!(f, "already captured"),
        }
    }
}
