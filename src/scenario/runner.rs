//! Replays a [`Scenario`] against a fresh [`Session`]

use ahash::AHashMap;
use serde::Serialize;

use super::script::{Scenario, Step};
use crate::actions::{ActionKind, ActionOutcome};
use crate::core::error::{Result, StealthError};
use crate::core::types::{EntityId, SourceId, Tick};
use crate::interaction::Interactable;
use crate::session::Session;

/// Outcome of one resolved attempt during a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportedOutcome {
    /// Index of the step that produced it
    pub step: usize,
    pub kind: ActionKind,
    pub outcome: ActionOutcome,
}

/// Summary of a finished run
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioReport {
    pub name: String,
    pub final_value: i32,
    pub max_value: i32,
    pub filled_cells: i32,
    pub captured: bool,
    pub capture_reason: Option<String>,
    pub ticks: Tick,
    pub outcomes: Vec<ReportedOutcome>,
    /// Notifications raised over the whole run
    pub events: usize,
}

impl ScenarioReport {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Session plus the name tables a script refers to
pub struct ScenarioRunner {
    name: String,
    session: Session,
    entities: AHashMap<String, EntityId>,
    interactables: AHashMap<String, Interactable>,
    outcomes: Vec<ReportedOutcome>,
    event_count: usize,
}

impl ScenarioRunner {
    pub fn new(scenario: &Scenario) -> Result<Self> {
        let mut runner = Self {
            name: scenario.name.clone(),
            session: Session::new(scenario.config.clone())?,
            entities: AHashMap::new(),
            interactables: AHashMap::new(),
            outcomes: Vec::new(),
            event_count: 0,
        };

        for name in &scenario.entities {
            runner.spawn(name);
        }

        for spec in &scenario.interactables {
            let mut interactable = Interactable::new(spec.kind);
            if let Some(target) = &spec.target {
                interactable = interactable.with_target(runner.entity(target)?);
            }
            if let Some(delta) = spec.delta {
                interactable = interactable.with_delta(delta);
            }
            interactable.consume_on_success = spec.consumable;
            interactable.require_in_range = spec.require_in_range;
            runner.interactables.insert(spec.name.clone(), interactable);
        }

        Ok(runner)
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Run every step in order
    pub fn run(mut self, steps: &[Step]) -> Result<ScenarioReport> {
        for (index, step) in steps.iter().enumerate() {
            self.apply(index, step)?;
        }
        Ok(self.finish())
    }

    pub fn apply(&mut self, index: usize, step: &Step) -> Result<()> {
        match step {
            Step::Spawn { entity } => {
                self.spawn(entity);
            }
            Step::Despawn { entity } => {
                let id = self.entity(entity)?;
                self.session.despawn_entity(id);
                self.entities.remove(entity);
            }
            Step::Enter { entity, source } => {
                let id = self.entity(entity)?;
                self.session.detection_enter(id, SourceId(*source))?;
            }
            Step::Exit { entity, source } => {
                let id = self.entity(entity)?;
                self.session.detection_exit(id, SourceId(*source))?;
            }
            Step::Act {
                kind,
                actor,
                target,
                delta,
            } => {
                let actor = self.entity(actor)?;
                let target = target.as_deref().map(|t| self.entity(t)).transpose()?;
                let outcome = self.session.attempt(*kind, actor, target, *delta);
                self.record(index, *kind, outcome);
            }
            Step::InRange { name, value } => {
                self.interactable(name)?.set_in_range(*value);
            }
            Step::Interact { name, actor } => {
                let actor = self.entity(actor)?;
                let interactable = self
                    .interactables
                    .get_mut(name)
                    .ok_or_else(|| StealthError::Scenario(format!("unknown interactable '{}'", name)))?;
                let kind = interactable.kind;
                let outcome = interactable.try_interact(&mut self.session, actor);
                if let Some(outcome) = outcome {
                    self.record(index, kind, outcome);
                }
            }
            Step::Tick { count } => {
                for _ in 0..*count {
                    self.session.tick();
                }
            }
            Step::Add { delta } => {
                self.session.add_suspicion(*delta);
            }
            Step::Set { value } => {
                self.session.set_suspicion(*value);
            }
            Step::Contact { reason } => {
                self.session.capture_by_contact(reason.clone());
            }
            Step::Reset => {
                self.session.reset_for_new_session();
            }
        }

        self.event_count += self.session.drain_events().len();
        Ok(())
    }

    pub fn finish(mut self) -> ScenarioReport {
        self.event_count += self.session.drain_events().len();
        let suspicion = *self.session.suspicion();

        ScenarioReport {
            name: self.name,
            final_value: suspicion.value(),
            max_value: suspicion.max_value(),
            filled_cells: suspicion.filled_cells(),
            captured: self.session.is_captured(),
            capture_reason: self.session.capture_reason().map(|r| r.to_string()),
            ticks: self.session.current_tick(),
            outcomes: self.outcomes,
            events: self.event_count,
        }
    }

    fn spawn(&mut self, name: &str) {
        if !self.entities.contains_key(name) {
            let id = self.session.spawn_entity();
            self.entities.insert(name.to_string(), id);
        }
    }

    fn entity(&self, name: &str) -> Result<EntityId> {
        self.entities
            .get(name)
            .copied()
            .ok_or_else(|| StealthError::Scenario(format!("unknown entity '{}'", name)))
    }

    fn interactable(&mut self, name: &str) -> Result<&mut Interactable> {
        self.interactables
            .get_mut(name)
            .ok_or_else(|| StealthError::Scenario(format!("unknown interactable '{}'", name)))
    }

    fn record(&mut self, step: usize, kind: ActionKind, outcome: ActionOutcome) {
        tracing::debug!("step {}: {} -> {}", step, kind.name(), outcome);
        self.outcomes.push(ReportedOutcome {
            step,
            kind,
            outcome,
        });
    }
}

/// Run a parsed scenario start to finish
pub fn run_scenario(scenario: &Scenario) -> Result<ScenarioReport> {
    ScenarioRunner::new(scenario)?.run(&scenario.steps)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_entity_fails_run() {
        let scenario = Scenario::from_toml_str(
            r#"
            [[step]]
            op = "enter"
            entity = "ghost"
            source = 1
            "#,
        )
        .unwrap();

        assert!(matches!(
            run_scenario(&scenario),
            Err(StealthError::Scenario(_))
        ));
    }

    #[test]
    fn test_interactable_target_must_exist() {
        let scenario = Scenario::from_toml_str(
            r#"
            [[interactable]]
            name = "wallet"
            kind = "bad_hidden"
            target = "nobody"
            "#,
        )
        .unwrap();

        assert!(ScenarioRunner::new(&scenario).is_err());
    }

    #[test]
    fn test_pickpocket_run() {
        let scenario = Scenario::from_toml_str(
            r#"
            name = "pickpocket"
            entities = ["player", "wallet"]

            [[interactable]]
            name = "wallet"
            kind = "bad_hidden"
            target = "wallet"
            consumable = true

            [[step]]
            op = "in_range"
            name = "wallet"
            value = true

            [[step]]
            op = "interact"
            name = "wallet"
            actor = "player"

            [[step]]
            op = "interact"
            name = "wallet"
            actor = "player"

            [[step]]
            op = "tick"
            count = 4
            "#,
        )
        .unwrap();

        let report = run_scenario(&scenario).unwrap();

        // Second press hits a consumed wallet and never reaches the resolver
        assert_eq!(report.outcomes.len(), 1);
        assert_eq!(report.outcomes[0].outcome, ActionOutcome::Succeeded { delta: 10 });
        assert_eq!(report.final_value, 30);
        assert_eq!(report.filled_cells, 3);
        assert_eq!(report.ticks, 4);
        assert!(!report.captured);
    }
}
