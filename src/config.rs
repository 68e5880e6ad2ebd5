// Optimizer configuration

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{OptimizerError, Result};
use crate::models::Population;

/// Population substituted when a demand point has none and no region lookup
/// yields one.
pub const DEFAULT_POPULATION: Population = 2_876_546;

/// Tunables for one optimization request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerConfig {
    /// Cap on outer reducer iterations (each commits at most one removal)
    pub max_iterations: usize,

    /// Number of outlets seeded from the demand set
    pub initial_outlets: usize,

    /// Seed for the outlet sampler
    pub seed: u64,

    /// Fallback population for demand points
    pub default_population: Population,

    /// One of error, warn, info, debug, trace
    pub log_level: String,

    pub log_timestamp: bool,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            max_iterations: 10,
            initial_outlets: 5,
            seed: 42,
            default_population: DEFAULT_POPULATION,
            log_level: "info".to_string(),
            log_timestamp: false,
        }
    }
}

impl OptimizerConfig {
    /// Loads a JSON config file; absent fields keep their defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json_str = fs::read_to_string(path)?;
        let config: OptimizerConfig = serde_json::from_str(&json_str)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_iterations == 0 {
            return Err(OptimizerError::invalid_input("max_iterations must be > 0"));
        }
        if self.initial_outlets == 0 {
            return Err(OptimizerError::invalid_input("initial_outlets must be > 0"));
        }
        if self.default_population == 0 {
            return Err(OptimizerError::invalid_input(
                "default_population must be > 0",
            ));
        }
        Ok(())
    }

    pub fn level_filter(&self) -> log::LevelFilter {
        match self.log_level.trim().to_ascii_lowercase().as_str() {
            "off" => log::LevelFilter::Off,
            "error" => log::LevelFilter::Error,
            "warn" | "warning" => log::LevelFilter::Warn,
            "debug" => log::LevelFilter::Debug,
            "trace" => log::LevelFilter::Trace,
            _ => log::LevelFilter::Info,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = OptimizerConfig::default();
        assert_eq!(config.max_iterations, 10);
        assert_eq!(config.initial_outlets, 5);
        assert_eq!(config.default_population, 2_876_546);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: OptimizerConfig = serde_json::from_str(r#"{"max_iterations": 3}"#).unwrap();
        assert_eq!(config.max_iterations, 3);
        assert_eq!(config.seed, 42);
    }

    #[test]
    fn test_validate_rejects_zero_iterations() {
        let config = OptimizerConfig {
            max_iterations: 0,
            ..OptimizerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_level_filter() {
        let mut config = OptimizerConfig::default();
        config.log_level = "DEBUG".to_string();
        assert_eq!(config.level_filter(), log::LevelFilter::Debug);
        config.log_level = "nonsense".to_string();
        assert_eq!(config.level_filter(), log::LevelFilter::Info);
    }
}
