pub mod random;
pub mod runner;
pub mod script;

pub use random::random_scenario;
pub use runner::{run_scenario, ReportedOutcome, ScenarioReport, ScenarioRunner};
pub use script::{InteractableSpec, Scenario, Step};
