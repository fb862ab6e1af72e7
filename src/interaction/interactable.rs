//! Objects in the level the player can act on (donation box, NPC wallet, statue)

use serde::{Deserialize, Serialize};

use crate::actions::{ActionKind, ActionOutcome};
use crate::core::types::EntityId;
use crate::session::Session;

/// A single interaction point
///
/// Resolution only happens when the player is in range (if required) and the
/// object has not been used up. A consumable object stays consumed for good.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interactable {
    pub kind: ActionKind,
    /// Observed object, if the action has one
    pub target: Option<EntityId>,
    /// Overrides the kind's default magnitude
    pub delta: Option<i32>,
    pub require_in_range: bool,
    pub consume_on_success: bool,
    in_range: bool,
    consumed: bool,
}

impl Interactable {
    pub fn new(kind: ActionKind) -> Self {
        Self {
            kind,
            target: None,
            delta: None,
            require_in_range: true,
            consume_on_success: false,
            in_range: false,
            consumed: false,
        }
    }

    pub fn with_target(mut self, target: EntityId) -> Self {
        self.target = Some(target);
        self
    }

    pub fn with_delta(mut self, delta: i32) -> Self {
        self.delta = Some(delta);
        self
    }

    pub fn consumable(mut self) -> Self {
        self.consume_on_success = true;
        self
    }

    pub fn anywhere(mut self) -> Self {
        self.require_in_range = false;
        self
    }

    /// Proximity zone enter/exit
    pub fn set_in_range(&mut self, in_range: bool) {
        self.in_range = in_range;
    }

    pub fn in_range(&self) -> bool {
        self.in_range
    }

    pub fn is_consumed(&self) -> bool {
        self.consumed
    }

    /// Whether a press would reach the resolver at all
    pub fn is_available(&self) -> bool {
        !self.consumed && (self.in_range || !self.require_in_range)
    }

    /// One press. `None` when nothing was attempted.
    pub fn try_interact(&mut self, session: &mut Session, actor: EntityId) -> Option<ActionOutcome> {
        if !self.is_available() {
            return None;
        }

        let outcome = session.attempt(self.kind, actor, self.target, self.delta);
        if outcome.is_success() && self.consume_on_success {
            self.consumed = true;
            self.in_range = false;
        }
        Some(outcome)
    }
}
