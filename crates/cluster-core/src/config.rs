//! Cluster configuration
//!
//! Stored as JSON. Every field has a default, so a partial file (or `{}`)
//! is a valid configuration.

use crate::cluster::{DisplayMode, WarningThresholds};
use crate::error::{ClusterError, Result};
use crate::units::UnitSystem;
use crate::vehicle::SimulatorSettings;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Settings for building a [`Cluster`](crate::Cluster)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterConfig {
    /// Timing of the simulated data source
    pub simulator: SimulatorSettings,
    /// Warning limits
    pub warnings: WarningThresholds,
    /// Mode shown at startup
    pub initial_mode: DisplayMode,
    /// Units for readouts
    pub units: UnitSystem,
}

impl ClusterConfig {
    /// Load and validate a configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: ClusterConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Write the configuration as pretty-printed JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        self.validate()?;
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Check values the pipeline cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.simulator.tick_period_ms == 0 {
            return Err(ClusterError::InvalidConfig(
                "simulator.tick_period_ms must be greater than zero".to_string(),
            ));
        }
        let step = self.simulator.time_step;
        if !step.is_finite() || step <= 0.0 {
            return Err(ClusterError::InvalidConfig(format!(
                "simulator.time_step must be a positive number, got {}",
                step
            )));
        }
        if !self.warnings.low_fuel_percent.is_finite()
            || !self.warnings.engine_hot_celsius.is_finite()
        {
            return Err(ClusterError::InvalidConfig(
                "warning thresholds must be finite".to_string(),
            ));
        }
        Ok(())
    }
}
