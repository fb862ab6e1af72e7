//! Seeded random scenarios for soak runs
//!
//! Detection events are generated in matched pairs: a source only exits an
//! entity it is currently overlapping, mirroring what real trigger volumes do.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::script::{Scenario, Step};
use crate::actions::ActionKind;
use crate::core::config::StealthConfig;

const ENTITIES: [&str; 4] = ["player", "wallet", "statue", "donation_box"];
const SOURCE_COUNT: u32 = 3;

/// Build a random but well-formed scenario. Same seed, same script.
pub fn random_scenario(steps: usize, seed: u64, config: StealthConfig) -> Scenario {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    // (entity index, source) pairs currently overlapping
    let mut overlaps: Vec<(usize, u32)> = Vec::new();
    let mut script = Vec::with_capacity(steps);

    for _ in 0..steps {
        let roll: u32 = rng.gen_range(0..100);
        let step = match roll {
            0..=29 => {
                let free: Vec<(usize, u32)> = (0..ENTITIES.len())
                    .flat_map(|e| (0..SOURCE_COUNT).map(move |s| (e, s)))
                    .filter(|pair| !overlaps.contains(pair))
                    .collect();
                match free.choose(&mut rng) {
                    Some(&(entity, source)) => {
                        overlaps.push((entity, source));
                        Step::Enter {
                            entity: ENTITIES[entity].to_string(),
                            source,
                        }
                    }
                    None => Step::Tick { count: 1 },
                }
            }
            30..=54 => {
                if overlaps.is_empty() {
                    Step::Tick { count: 1 }
                } else {
                    let (entity, source) = overlaps.swap_remove(rng.gen_range(0..overlaps.len()));
                    Step::Exit {
                        entity: ENTITIES[entity].to_string(),
                        source,
                    }
                }
            }
            55..=89 => {
                let kind = *ActionKind::all()
                    .choose(&mut rng)
                    .unwrap_or(&ActionKind::Good);
                let target = if rng.gen_bool(0.5) {
                    Some(ENTITIES[rng.gen_range(1..ENTITIES.len())].to_string())
                } else {
                    None
                };
                Step::Act {
                    kind,
                    actor: ENTITIES[0].to_string(),
                    target,
                    delta: None,
                }
            }
            _ => Step::Tick {
                count: rng.gen_range(1..=3),
            },
        };
        script.push(step);
    }

    Scenario {
        name: format!("random-{}", seed),
        config,
        entities: ENTITIES.iter().map(|e| e.to_string()).collect(),
        interactables: Vec::new(),
        steps: script,
    }
}
