// config.rs - Engine configuration

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::history::DEFAULT_CAPACITY;
use crate::rules::RuleSet;

/// Settings an [`Engine`](crate::Engine) starts from.
///
/// Every field has a default, so a TOML document only needs the keys it
/// changes:
///
/// ```toml
/// rows = 64
/// cols = 48
/// rule = "B36/S23"
/// wrap = false
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub rows: usize,
    pub cols: usize,
    pub history_capacity: usize,
    pub rule: String,
    pub wrap: bool,
    /// Chance of each cell starting alive when the grid is seeded.
    pub seed_probability: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rows: 100,
            cols: 100,
            history_capacity: DEFAULT_CAPACITY,
            rule: RuleSet::default().to_string(),
            wrap: true,
            seed_probability: 0.25,
        }
    }
}

impl EngineConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks ranges and returns the parsed rule.
    pub fn validate(&self) -> Result<RuleSet, ConfigError> {
        if self.rows == 0 {
            return Err(invalid("rows", "must be at least 1"));
        }
        if self.cols == 0 {
            return Err(invalid("cols", "must be at least 1"));
        }
        if self.history_capacity == 0 {
            return Err(invalid("history_capacity", "must be at least 1"));
        }
        if !(0.0..=1.0).contains(&self.seed_probability) {
            return Err(invalid(
                "seed_probability",
                &format!("{} is outside [0, 1]", self.seed_probability),
            ));
        }
        Ok(RuleSet::parse(&self.rule)?)
    }
}

fn invalid(field: &'static str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_gives_defaults() {
        let config = EngineConfig::from_toml_str("").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.rule, "B3/S23");
    }

    #[test]
    fn partial_document_overrides_keys() {
        let config = EngineConfig::from_toml_str("rows = 64\nrule = \"S23/B36\"\nwrap = false\n").unwrap();
        assert_eq!((config.rows, config.cols), (64, 100));
        assert!(!config.wrap);
        assert_eq!(config.validate().unwrap(), RuleSet::high_life());
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            EngineConfig::from_toml_str("cols = 0"),
            Err(ConfigError::Invalid { field: "cols", .. })
        ));
        assert!(matches!(
            EngineConfig::from_toml_str("seed_probability = 1.5"),
            Err(ConfigError::Invalid { field: "seed_probability", .. })
        ));
        assert!(matches!(
            EngineConfig::from_toml_str("rule = \"23/3\""),
            Err(ConfigError::Rule(_))
        ));
        assert!(matches!(
            EngineConfig::from_toml_str("speed = 3"),
            Err(ConfigError::Toml(_))
        ));
    }
}
