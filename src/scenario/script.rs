//! Scripted scenarios loaded from TOML
//!
//! ```toml
//! name = "pickpocket"
//! entities = ["player", "wallet"]
//!
//! [config]
//! initial_value = 20
//!
//! [[interactable]]
//! name = "wallet"
//! kind = "bad_hidden"
//! target = "wallet"
//! consumable = true
//!
//! [[step]]
//! op = "enter"
//! entity = "wallet"
//! source = 1
//!
//! [[step]]
//! op = "act"
//! kind = "bad_hidden"
//! actor = "player"
//! target = "wallet"
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::actions::ActionKind;
use crate::core::config::StealthConfig;
use crate::core::error::Result;

fn one() -> u32 {
    1
}

fn yes() -> bool {
    true
}

/// One scripted operation against the session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    /// Create a named entity mid-scenario
    Spawn { entity: String },
    /// Destroy a named entity and its visibility state
    Despawn { entity: String },
    /// Detection source starts overlapping an entity
    Enter { entity: String, source: u32 },
    /// Detection source stops overlapping an entity
    Exit { entity: String, source: u32 },
    /// Direct action attempt
    Act {
        kind: ActionKind,
        actor: String,
        #[serde(default)]
        target: Option<String>,
        #[serde(default)]
        delta: Option<i32>,
    },
    /// Proximity zone update for an interactable
    InRange { name: String, value: bool },
    /// Press on an interactable
    Interact { name: String, actor: String },
    /// Advance world time
    Tick {
        #[serde(default = "one")]
        count: u32,
    },
    Add { delta: i32 },
    Set { value: i32 },
    /// Security contact
    Contact { reason: String },
    /// External session restart
    Reset,
}

/// Interactable placed in the scenario
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractableSpec {
    pub name: String,
    pub kind: ActionKind,
    #[serde(default)]
    pub target: Option<String>,
    #[serde(default)]
    pub delta: Option<i32>,
    #[serde(default)]
    pub consumable: bool,
    #[serde(default = "yes")]
    pub require_in_range: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub config: StealthConfig,
    /// Entities spawned before the first step
    #[serde(default)]
    pub entities: Vec<String>,
    #[serde(default, rename = "interactable")]
    pub interactables: Vec<InteractableSpec>,
    #[serde(default, rename = "step")]
    pub steps: Vec<Step>,
}

impl Scenario {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let scenario: Scenario = toml::from_str(content)?;
        scenario.config.validate()?;
        Ok(scenario)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let mut scenario = Self::from_toml_str(&content)?;
        if scenario.name.is_empty() {
            scenario.name = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
        }
        Ok(scenario)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_steps() {
        let scenario = Scenario::from_toml_str(
            r#"
            name = "smoke"
            entities = ["player"]

            [[step]]
            op = "enter"
            entity = "player"
            source = 3

            [[step]]
            op = "act"
            kind = "bad_public"
            actor = "player"

            [[step]]
            op = "tick"

            [[step]]
            op = "reset"
            "#,
        )
        .unwrap();

        assert_eq!(scenario.name, "smoke");
        assert_eq!(scenario.config, StealthConfig::default());
        assert_eq!(
            scenario.steps,
            vec![
                Step::Enter {
                    entity: "player".into(),
                    source: 3
                },
                Step::Act {
                    kind: ActionKind::BadPublic,
                    actor: "player".into(),
                    target: None,
                    delta: None
                },
                Step::Tick { count: 1 },
                Step::Reset,
            ]
        );
    }

    #[test]
    fn test_parse_interactables() {
        let scenario = Scenario::from_toml_str(
            r#"
            [[interactable]]
            name = "donation_box"
            kind = "good"
            delta = -20
            "#,
        )
        .unwrap();

        let spec = &scenario.interactables[0];
        assert_eq!(spec.kind, ActionKind::Good);
        assert_eq!(spec.delta, Some(-20));
        assert!(spec.require_in_range);
        assert!(!spec.consumable);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let result = Scenario::from_toml_str(
            r#"
            [config]
            max_value = 0
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_op_rejected() {
        let result = Scenario::from_toml_str(
            r#"
            [[step]]
            op = "teleport"
            "#,
        );
        assert!(result.is_err());
    }
}
