//! Session configuration with documented constants
//!
//! Read once at initialization and immutable afterwards. The visibility
//! requirement of each action kind is fixed policy and deliberately absent here.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::actions::ActionKind;
use crate::core::error::{Result, StealthError};

/// Default suspicion magnitude applied per action kind
///
/// Signed: a negative value reduces suspicion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeltaDefaults {
    /// Observed good deed (one cell down at the default cell size)
    pub good: i32,
    /// Misbehaving in plain sight (two cells up)
    pub bad_public: i32,
    /// Unobserved misdeed, e.g. a theft (one cell up)
    pub bad_hidden: i32,
}

impl Default for DeltaDefaults {
    fn default() -> Self {
        Self {
            good: -10,
            bad_public: 20,
            bad_hidden: 10,
        }
    }
}

impl DeltaDefaults {
    /// Default delta for an action kind
    pub fn for_kind(&self, kind: ActionKind) -> i32 {
        match kind {
            ActionKind::Good => self.good,
            ActionKind::BadPublic => self.bad_public,
            ActionKind::BadHidden => self.bad_hidden,
        }
    }
}

/// Configuration for one play session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StealthConfig {
    /// Full-scale suspicion value
    ///
    /// Reaching it trips the capture gate when `capture_when_full` is set.
    pub max_value: i32,

    /// Suspicion per UI cell
    ///
    /// At the defaults (120 / 10) the bar has 12 segments.
    pub cell_size: i32,

    /// Suspicion at session start (two cells at the defaults)
    pub initial_value: i32,

    /// Per-kind default deltas, used when a request carries no override
    pub deltas: DeltaDefaults,

    /// Whether a full meter trips the capture gate
    ///
    /// When false the meter still reports full scale but the session goes on.
    pub capture_when_full: bool,
}

impl Default for StealthConfig {
    fn default() -> Self {
        Self {
            max_value: 120,
            cell_size: 10,
            initial_value: 20,
            deltas: DeltaDefaults::default(),
            capture_when_full: true,
        }
    }
}

impl StealthConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of UI cells a full meter shows
    pub fn max_cells(&self) -> i32 {
        (self.max_value / self.cell_size.max(1)).max(1)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.max_value <= 0 {
            return Err(StealthError::InvalidConfig(format!(
                "max_value ({}) must be positive",
                self.max_value
            )));
        }

        if self.cell_size <= 0 || self.cell_size > self.max_value {
            return Err(StealthError::InvalidConfig(format!(
                "cell_size ({}) must be in 1..={}",
                self.cell_size, self.max_value
            )));
        }

        if !(0..=self.max_value).contains(&self.initial_value) {
            return Err(StealthError::InvalidConfig(format!(
                "initial_value ({}) must be in 0..={}",
                self.initial_value, self.max_value
            )));
        }

        // Signs are policy: good deeds lower suspicion, misdeeds raise it
        if self.deltas.good > 0 {
            return Err(StealthError::InvalidConfig(format!(
                "deltas.good ({}) must not be positive",
                self.deltas.good
            )));
        }
        if self.deltas.bad_public < 0 || self.deltas.bad_hidden < 0 {
            return Err(StealthError::InvalidConfig(
                "deltas.bad_public and deltas.bad_hidden must not be negative".into(),
            ));
        }

        Ok(())
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: StealthConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::info!("Loaded stealth config from {}", path.display());
        Ok(config)
    }
}

// === GLOBAL CONFIG ACCESS ===

use std::sync::OnceLock;

static CONFIG: OnceLock<StealthConfig> = OnceLock::new();

/// Get the global config (initializes with defaults if not set)
pub fn config() -> &'static StealthConfig {
    CONFIG.get_or_init(StealthConfig::default)
}

/// Set the global config (can only be called once per process)
///
/// Fails if the config was already set, or already read through [`config`].
pub fn set_config(config: StealthConfig) -> Result<()> {
    config.validate()?;
    CONFIG
        .set(config)
        .map_err(|_| StealthError::ConfigAlreadyInitialized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = StealthConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_cells(), 12);
    }

    #[test]
    fn test_default_deltas_per_kind() {
        let deltas = DeltaDefaults::default();
        assert_eq!(deltas.for_kind(ActionKind::Good), -10);
        assert_eq!(deltas.for_kind(ActionKind::BadPublic), 20);
        assert_eq!(deltas.for_kind(ActionKind::BadHidden), 10);
    }

    #[test]
    fn test_rejects_initial_value_out_of_range() {
        let config = StealthConfig {
            initial_value: 130,
            ..StealthConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(StealthError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_rejects_bad_cell_size() {
        let zero = StealthConfig {
            cell_size: 0,
            ..StealthConfig::default()
        };
        assert!(zero.validate().is_err());

        let too_big = StealthConfig {
            cell_size: 200,
            ..StealthConfig::default()
        };
        assert!(too_big.validate().is_err());
    }

    #[test]
    fn test_rejects_wrong_delta_signs() {
        let mut config = StealthConfig::default();
        config.deltas.good = 5;
        assert!(config.validate().is_err());

        let mut config = StealthConfig::default();
        config.deltas.bad_hidden = -1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_takes_defaults() {
        let config = StealthConfig::from_toml_str(
            r#"
            max_value = 60
            initial_value = 0

            [deltas]
            bad_public = 30
            "#,
        )
        .unwrap();

        assert_eq!(config.max_value, 60);
        assert_eq!(config.cell_size, 10);
        assert_eq!(config.initial_value, 0);
        assert_eq!(config.deltas.bad_public, 30);
        assert_eq!(config.deltas.good, -10);
        assert!(config.capture_when_full);
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        assert!(matches!(
            StealthConfig::from_toml_str("max_value = \"lots\""),
            Err(StealthError::TomlError(_))
        ));
        assert!(matches!(
            StealthConfig::from_toml_str("max_value = -1"),
            Err(StealthError::InvalidConfig(_))
        ));
    }
}
