//! Visibility trackers for every trackable entity in the session

use ahash::AHashMap;

use super::tracker::VisibilityTracker;
use crate::core::error::{Result, StealthError};
use crate::core::types::{EntityId, SourceId};

/// Visibility of an actor and its optional target, captured at attempt time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibilitySnapshot {
    pub actor_visible: bool,
    /// `None` when the action has no secondary observed object
    pub target_visible: Option<bool>,
}

/// Owns one tracker per registered entity
#[derive(Debug, Clone, Default)]
pub struct VisibilityRegistry {
    trackers: AHashMap<EntityId, VisibilityTracker>,
}

impl VisibilityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tracking an entity. Re-registering keeps its current count.
    pub fn register(&mut self, entity: EntityId) {
        self.trackers.entry(entity).or_default();
    }

    /// Stop tracking an entity (it was destroyed)
    pub fn unregister(&mut self, entity: EntityId) -> Option<VisibilityTracker> {
        self.trackers.remove(&entity)
    }

    pub fn contains(&self, entity: EntityId) -> bool {
        self.trackers.contains_key(&entity)
    }

    pub fn len(&self) -> usize {
        self.trackers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trackers.is_empty()
    }

    pub fn get(&self, entity: EntityId) -> Option<&VisibilityTracker> {
        self.trackers.get(&entity)
    }

    pub fn enter(&mut self, entity: EntityId, source: SourceId) -> Result<()> {
        let tracker = self
            .trackers
            .get_mut(&entity)
            .ok_or(StealthError::UnknownEntity(entity))?;
        tracker.on_detection_enter();
        tracing::debug!(
            "Source {:?} sees {} ({} watching)",
            source,
            entity,
            tracker.seen_count()
        );
        Ok(())
    }

    pub fn exit(&mut self, entity: EntityId, source: SourceId) -> Result<()> {
        let tracker = self
            .trackers
            .get_mut(&entity)
            .ok_or(StealthError::UnknownEntity(entity))?;
        tracker.on_detection_exit();
        tracing::debug!(
            "Source {:?} lost {} ({} watching)",
            source,
            entity,
            tracker.seen_count()
        );
        Ok(())
    }

    /// Unregistered entities are never seen
    pub fn is_seen(&self, entity: EntityId) -> bool {
        self.trackers
            .get(&entity)
            .map(|t| t.is_seen())
            .unwrap_or(false)
    }

    /// Visibility of an actor and optional target for an action attempt
    pub fn snapshot(&self, actor: EntityId, target: Option<EntityId>) -> VisibilitySnapshot {
        VisibilitySnapshot {
            actor_visible: self.is_seen(actor),
            target_visible: target.map(|t| self.is_seen(t)),
        }
    }
}
