//! Stealth Core - interactive console
//!
//! Drives a single session by hand: toggle detection sources on the player or
//! a prop, attempt actions, and watch suspicion and capture respond.

use stealth_core::actions::{ActionKind, ActionOutcome};
use stealth_core::core::config::{set_config, StealthConfig};
use stealth_core::core::error::Result;
use stealth_core::core::types::{EntityId, SourceId};
use stealth_core::events::{CoreEvent, EventRecord, PresentationSink};
use stealth_core::interaction::HoldTrigger;
use stealth_core::Session;

use std::io::{self, Write};
use std::path::Path;

/// Steps the dance key must be held for the dance to count
const DANCE_HOLD_STEPS: u32 = 3;

/// Prints notifications the way a HUD would show them
struct ConsoleSink {
    max_cells: usize,
}

impl PresentationSink for ConsoleSink {
    fn on_event(&mut self, record: &EventRecord) {
        match &record.event {
            CoreEvent::SuspicionChanged {
                value,
                max_value,
                filled_cells,
            } => {
                let filled = (*filled_cells as usize).min(self.max_cells);
                println!(
                    "  [{}{}] {}/{}",
                    "#".repeat(filled),
                    ".".repeat(self.max_cells - filled),
                    value,
                    max_value
                );
            }
            CoreEvent::SuspicionFull { .. } => println!("  Suspicion is maxed out!"),
            CoreEvent::Captured { reason } => {
                println!("  BUSTED! {}", reason);
                println!("  (type 'reset' to start over)");
            }
            CoreEvent::SessionReset => println!("  New session."),
            CoreEvent::ActionResolved { .. } => {}
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stealth_core=info".into()),
        )
        .init();

    tracing::info!("Stealth Core starting...");

    // Optional config file as the first argument
    if let Some(path) = std::env::args().nth(1) {
        set_config(StealthConfig::from_file(Path::new(&path))?)?;
    }

    let mut session = Session::from_global_config()?;
    let max_cells = session.suspicion().max_cells() as usize;
    session.set_sink(Some(Box::new(ConsoleSink { max_cells })));

    let player = session.spawn_entity();
    let prop = session.spawn_entity();
    let mut dance = HoldTrigger::new(DANCE_HOLD_STEPS);

    println!("\n=== STEALTH CORE ===");
    println!();
    println!("Commands:");
    println!("  see <player|prop> <source>   - Detection source starts watching");
    println!("  unsee <player|prop> <source> - Detection source looks away");
    println!("  act <kind> [prop] [delta]    - Attempt good / bad_public / bad_hidden");
    println!("  dance <steps>                - Hold the dance key for n steps");
    println!("  tick [n]                     - Advance world time");
    println!("  set <value>                  - Overwrite suspicion");
    println!("  guard                        - A guard bumps into you");
    println!("  reset                        - Restart the session");
    println!("  status / s                   - Show state");
    println!("  quit / q                     - Exit");
    println!();

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let words: Vec<&str> = input.split_whitespace().collect();
        let Some((&command, args)) = words.split_first() else {
            continue;
        };

        match command {
            "quit" | "q" => break,
            "status" | "s" => display_status(&session, player, prop),
            "see" | "unsee" => {
                let (Some(entity), Some(source)) = (
                    args.first().and_then(|w| pick_entity(w, player, prop)),
                    args.get(1).and_then(|w| w.parse::<u32>().ok()),
                ) else {
                    println!("Usage: {} <player|prop> <source>", command);
                    continue;
                };
                let result = if command == "see" {
                    session.detection_enter(entity, SourceId(source))
                } else {
                    session.detection_exit(entity, SourceId(source))
                };
                if let Err(e) = result {
                    tracing::warn!("{}", e);
                }
            }
            "act" => {
                let Some(kind) = args.first().and_then(|w| w.parse::<ActionKind>().ok()) else {
                    println!("Usage: act <good|bad_public|bad_hidden> [prop] [delta]");
                    continue;
                };
                let target = args.iter().any(|w| *w == "prop").then_some(prop);
                let delta = args.iter().skip(1).find_map(|w| w.parse::<i32>().ok());
                let outcome = session.attempt(kind, player, target, delta);
                report(&outcome);
            }
            "dance" => {
                let steps = args.first().and_then(|w| w.parse::<u32>().ok()).unwrap_or(1);
                for _ in 0..steps {
                    if dance.update(true) {
                        let outcome = session.attempt(ActionKind::Good, player, None, None);
                        report(&outcome);
                    }
                    session.tick();
                }
                dance.update(false);
                if steps < DANCE_HOLD_STEPS {
                    println!("Let go too early.");
                }
            }
            "tick" | "t" => {
                let n = args.first().and_then(|w| w.parse::<u32>().ok()).unwrap_or(1);
                let advanced = (0..n).filter(|_| session.tick()).count();
                if advanced == 0 && session.is_frozen() {
                    println!("World is frozen.");
                } else {
                    println!("Tick {}.", session.current_tick());
                }
            }
            "set" => match args.first().and_then(|w| w.parse::<i32>().ok()) {
                Some(value) => {
                    session.set_suspicion(value);
                }
                None => println!("Usage: set <value>"),
            },
            "guard" => {
                session.capture_by_contact("Caught by security.");
            }
            "reset" => session.reset_for_new_session(),
            _ => println!("Unknown command '{}'", command),
        }

        // Notifications were already shown by the sink
        session.drain_events();
    }

    println!("Goodbye!");
    Ok(())
}

fn pick_entity(word: &str, player: EntityId, prop: EntityId) -> Option<EntityId> {
    match word {
        "player" => Some(player),
        "prop" => Some(prop),
        _ => None,
    }
}

fn report(outcome: &ActionOutcome) {
    match outcome {
        ActionOutcome::Succeeded { .. } => println!("{}", outcome),
        ActionOutcome::RejectedNoChange { .. } => println!("Nothing happens ({}).", outcome),
        ActionOutcome::Captured { .. } | ActionOutcome::AlreadyCaptured => println!("{}", outcome),
    }
}

fn display_status(session: &Session, player: EntityId, prop: EntityId) {
    let suspicion = session.suspicion();
    println!("--- Tick {} ---", session.current_tick());
    println!(
        "Suspicion: {}/{} ({}/{} cells)",
        suspicion.value(),
        suspicion.max_value(),
        suspicion.filled_cells(),
        suspicion.max_cells()
    );
    println!(
        "Player seen: {} | Prop seen: {}",
        session.is_seen(player),
        session.is_seen(prop)
    );
    match session.capture_reason() {
        Some(reason) => println!("CAPTURED: {}", reason),
        None => println!("Free"),
    }
}
