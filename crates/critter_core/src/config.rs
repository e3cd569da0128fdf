use crate::emotion::EmotionState;
use crate::rules::{ActionRule, RuleTable};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

// ============================================================================
// Top-level config
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CritterConfig {
    pub brain: BrainConfig,
    pub rules: Vec<ActionRule>,
}

impl Default for CritterConfig {
    fn default() -> Self {
        Self {
            brain: BrainConfig::default(),
            rules: RuleTable::<String>::default().rules().to_vec(),
        }
    }
}

impl CritterConfig {
    /// Load config from a TOML file, falling back to defaults for missing fields.
    /// After loading, env var overrides are applied.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;
        let mut config: CritterConfig =
            toml::from_str(&content).with_context(|| "Failed to parse TOML config")?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from path, or return defaults with env overrides if the file
    /// doesn't exist. A file that exists but fails to read or parse is an error.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::info!("Config file {} not found, using defaults", path.display());
            let mut cfg = Self::default();
            cfg.apply_env_overrides();
            return Ok(cfg);
        }
        Self::load(path)
    }

    /// Validate the configured rules into a table. Fails on the first bad rule.
    pub fn rule_table(&self) -> Result<RuleTable> {
        RuleTable::new(self.rules.clone()).with_context(|| "Invalid action rule in config")
    }

    /// Apply environment variable overrides on top of file-based config.
    fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("CRITTER_DECAY_RATE") {
            if let Ok(n) = v.parse() {
                self.brain.decay_rate = n;
            }
        }
        if let Ok(v) = std::env::var("CRITTER_TICK_UNIT_MS") {
            if let Ok(n) = v.parse() {
                self.brain.tick_unit_ms = n;
            }
        }
        if let Ok(v) = std::env::var("CRITTER_SEED") {
            if let Ok(n) = v.parse() {
                self.brain.seed = Some(n);
            }
        }
    }
}

// ============================================================================
// Sub-configs
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BrainConfig {
    /// Emotion points lost per idle tick. The toy's real rate is unknown; 1 is a guess.
    pub decay_rate: u8,
    /// Wall time of one delay unit, in milliseconds.
    pub tick_unit_ms: u64,
    /// Seed for a reproducible random source. `None` seeds from entropy.
    pub seed: Option<u64>,
    /// Emotions at power-on.
    pub initial: EmotionState,
}

impl Default for BrainConfig {
    fn default() -> Self {
        Self {
            decay_rate: 1,
            tick_unit_ms: 1000,
            seed: None,
            initial: EmotionState::new(),
        }
    }
}

impl BrainConfig {
    pub fn tick_unit(&self) -> Duration {
        Duration::from_millis(self.tick_unit_ms)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interaction::Interaction;

    #[test]
    fn test_default_config() {
        let cfg = CritterConfig::default();
        assert_eq!(cfg.brain.decay_rate, 1);
        assert_eq!(cfg.brain.tick_unit(), Duration::from_secs(1));
        assert!(cfg.brain.seed.is_none());
        assert_eq!(cfg.brain.initial, EmotionState::new());
        assert_eq!(cfg.rule_table().unwrap(), RuleTable::<String>::default());
    }

    #[test]
    fn test_parse_minimal_toml() {
        let toml_str = r#"
[brain]
decay_rate = 3
"#;
        let cfg: CritterConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(cfg.brain.decay_rate, 3);
        // Defaults for unspecified fields
        assert_eq!(cfg.brain.tick_unit_ms, 1000);
        assert_eq!(cfg.rules.len(), 1);
    }

    #[test]
    fn test_parse_full_toml() {
        let toml_str = r#"
[brain]
decay_rate = 2
tick_unit_ms = 250
seed = 7

[brain.initial]
wellness = 80
fullness = 60
displeasedness = 10
tiredness = 20
excitedness = 30

[[rules]]
min = [0, 0, 0, 0, 0]
max = [100, 100, 100, 100, 100]
payload = "wag tail"

[[rules]]
min = [0, 0, 0, 0, 0]
max = [100, 40, 100, 100, 100]
interaction = "back_sensor"
payload = "beg for food"
"#;
        let cfg: CritterConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(cfg.brain.decay_rate, 2);
        assert_eq!(cfg.brain.tick_unit(), Duration::from_millis(250));
        assert_eq!(cfg.brain.seed, Some(7));
        assert_eq!(cfg.brain.initial.get(), [80, 60, 10, 20, 30]);

        let table = cfg.rule_table().unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.rules()[1].interaction, Interaction::BackSensor);
        assert_eq!(table.rules()[1].payload, "beg for food");
    }

    #[test]
    fn test_sample_config_parses() {
        let cfg: CritterConfig = toml::from_str(include_str!("../../../critter.toml")).unwrap();
        let table = cfg.rule_table().unwrap();
        assert!(table.len() > 1);
        assert!(table.rules().iter().any(|r| r.interaction == Interaction::TailPull));
    }

    #[test]
    fn test_out_of_range_initial_state_is_rejected() {
        let toml_str = r#"
[brain.initial]
wellness = 180
"#;
        assert!(toml::from_str::<CritterConfig>(toml_str).is_err());
    }

    #[test]
    fn test_invalid_rule_fails_table_construction() {
        let toml_str = r#"
[[rules]]
min = [0, 0, 0, 80, 0]
max = [100, 100, 100, 20, 100]
payload = "nap"
"#;
        let cfg: CritterConfig = toml::from_str(toml_str).unwrap();
        let err = cfg.rule_table().unwrap_err();
        assert!(format!("{:#}", err).contains("tiredness"));
    }

    #[test]
    fn test_env_overrides_and_defaults() {
        // Part 1: env overrides
        std::env::set_var("CRITTER_DECAY_RATE", "5");
        std::env::set_var("CRITTER_SEED", "99");

        let mut cfg = CritterConfig::default();
        cfg.apply_env_overrides();

        assert_eq!(cfg.brain.decay_rate, 5);
        assert_eq!(cfg.brain.seed, Some(99));

        // Clean up env vars before testing defaults
        std::env::remove_var("CRITTER_DECAY_RATE");
        std::env::remove_var("CRITTER_SEED");

        // Part 2: nonexistent path returns defaults (no env interference)
        let cfg = CritterConfig::load_or_default("/nonexistent/critter.toml").unwrap();
        assert_eq!(cfg.brain.decay_rate, 1);
        assert_eq!(cfg.rules.len(), 1);
    }

    #[test]
    fn test_unparseable_config_file_is_an_error() {
        let path = std::env::temp_dir().join(format!("critter_bad_config_{}.toml", std::process::id()));
        std::fs::write(
            &path,
            r#"
[[rules]]
min = [0, 0, 0, 0, 0]
max = [100, 100, 100, 100, 100]
interaction = "shaek"
payload = "giggle"
"#,
        )
        .unwrap();

        let result = CritterConfig::load_or_default(&path);
        std::fs::remove_file(&path).ok();

        let err = result.expect_err("a typo'd interaction must not fall back to defaults");
        assert!(format!("{:#}", err).contains("Failed to parse TOML config"));
    }
}
