//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for trackable entities (player, props, NPC-held items)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId(pub Uuid);

impl EntityId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a detection source (an NPC field of view, a camera cone)
///
/// Only carried for logging. Trackers never deduplicate by source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceId(pub u32);

impl SourceId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }
}

/// World tick counter (one logical update per discrete step)
pub type Tick = u64;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_ids_are_unique() {
        let a = EntityId::new();
        let b = EntityId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn test_source_id_equality() {
        assert_eq!(SourceId::new(3), SourceId(3));
        assert_ne!(SourceId(1), SourceId(2));
    }
}
