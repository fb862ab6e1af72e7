//! Headless Scenario Runner
//!
//! Replays a scripted or randomly generated scenario and prints the final
//! suspicion and capture state.

use clap::Parser;
use serde::Serialize;
use stealth_core::core::config::StealthConfig;
use stealth_core::core::error::Result;
use stealth_core::scenario::{random_scenario, run_scenario, Scenario, ScenarioReport};

use std::path::PathBuf;

/// Headless Scenario Runner - replay stealth scenarios without a frontend
#[derive(Parser, Debug)]
#[command(name = "scenario_runner")]
#[command(about = "Replay a stealth scenario and report suspicion and capture")]
struct Args {
    /// Scenario file to replay (TOML)
    #[arg(long, conflicts_with = "random")]
    scenario: Option<PathBuf>,

    /// Config file overriding the scenario's [config] table
    #[arg(long)]
    config: Option<PathBuf>,

    /// Generate a random scenario with this many steps
    #[arg(long)]
    random: Option<usize>,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Output format: json or text
    #[arg(long, default_value = "json")]
    format: String,

    /// Print every step of the script before running
    #[arg(long, short = 'v')]
    verbose: bool,
}

/// JSON output structure
#[derive(Serialize)]
struct RunResult {
    #[serde(flatten)]
    report: ScenarioReport,
    seed: Option<u64>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_filter = if args.verbose {
        "stealth_core=debug"
    } else {
        "stealth_core=warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = match &args.config {
        Some(path) => Some(StealthConfig::from_file(path)?),
        None => None,
    };

    let (mut scenario, seed) = match (&args.scenario, args.random) {
        (Some(path), _) => (Scenario::from_file(path)?, None),
        (None, steps) => {
            let seed = args.seed.unwrap_or_else(rand::random);
            let steps = steps.unwrap_or(100);
            let base = config.clone().unwrap_or_default();
            (random_scenario(steps, seed, base), Some(seed))
        }
    };

    if let Some(config) = config {
        scenario.config = config;
    }

    if args.verbose {
        eprintln!("Scenario '{}': {} steps", scenario.name, scenario.steps.len());
        for (index, step) in scenario.steps.iter().enumerate() {
            eprintln!("  [{}] {:?}", index, step);
        }
        eprintln!();
    }

    let report = run_scenario(&scenario)?;
    let result = RunResult { report, seed };

    match args.format.as_str() {
        "text" => print_text(&result),
        "json" => println!("{}", serde_json::to_string_pretty(&result)?),
        other => {
            eprintln!("Unknown format '{}', defaulting to json", other);
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
    }

    Ok(())
}

fn print_text(result: &RunResult) {
    let report = &result.report;
    println!("Scenario Result");
    println!("===============");
    println!("Name: {}", report.name);
    println!(
        "Suspicion: {}/{} ({} cells)",
        report.final_value, report.max_value, report.filled_cells
    );
    match &report.capture_reason {
        Some(reason) => println!("Captured: {}", reason),
        None => println!("Captured: no"),
    }
    println!("Ticks: {}", report.ticks);
    println!("Notifications: {}", report.events);
    println!();
    println!("Attempts:");
    for entry in &report.outcomes {
        println!("  [{}] {} -> {}", entry.step, entry.kind.name(), entry.outcome);
    }
    if let Some(seed) = result.seed {
        println!();
        println!("Seed: {}", seed);
    }
}
