pub mod clock;
pub mod config;
pub mod error;
pub mod types;

pub use clock::WorldClock;
pub use config::{DeltaDefaults, StealthConfig};
pub use error::{Result, StealthError};
pub use types::{EntityId, SourceId, Tick};
