//! Cluster State
//!
//! Combines the latest vehicle reading, navigation event and selected display
//! mode into the snapshot a presentation layer renders.

pub mod layout;
mod view_model;

pub use layout::{ClusterLayout, GaugeConfig, GaugeType};
pub use view_model::ClusterViewModel;

use crate::navigation::NavigationEvent;
use crate::vehicle::VehicleReading;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Visual layout selected by the driver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    /// Round speedometer and tachometer
    #[default]
    Classic,
    /// Speed readout with linear bars
    Minimal,
    /// Navigation tile with a reduced speed readout
    Navigation,
    /// Sweep gauges
    Neon,
}

impl DisplayMode {
    /// Every mode, in selector order
    pub const ALL: [DisplayMode; 4] = [
        DisplayMode::Classic,
        DisplayMode::Minimal,
        DisplayMode::Navigation,
        DisplayMode::Neon,
    ];

    /// Name shown in the mode selector
    pub fn label(&self) -> &'static str {
        match self {
            DisplayMode::Classic => "Classic",
            DisplayMode::Minimal => "Minimal",
            DisplayMode::Navigation => "Navigation",
            DisplayMode::Neon => "Neon",
        }
    }
}

/// Conditions that raise a warning on the cluster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Warning {
    /// Fuel level below the low-fuel limit
    LowFuel,
    /// Engine temperature above the overheat limit
    EngineHot,
    /// ABS fault reported
    AbsFault,
    /// Airbag fault reported
    AirbagFault,
    /// Lane departure warning active
    LaneDeparture,
}

impl Warning {
    /// Text shown in the warning panel
    pub fn label(&self) -> &'static str {
        match self {
            Warning::LowFuel => "Low fuel",
            Warning::EngineHot => "Engine overheating",
            Warning::AbsFault => "ABS fault",
            Warning::AirbagFault => "Airbag fault",
            Warning::LaneDeparture => "Lane departure",
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Limits that trigger threshold warnings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WarningThresholds {
    /// Fuel level below which `LowFuel` is raised (%)
    pub low_fuel_percent: f64,
    /// Engine temperature above which `EngineHot` is raised (°C)
    pub engine_hot_celsius: f64,
}

impl Default for WarningThresholds {
    fn default() -> Self {
        Self {
            low_fuel_percent: 15.0,
            engine_hot_celsius: 105.0,
        }
    }
}

/// Derive the active warnings for a reading, in display order
pub fn build_warnings(reading: &VehicleReading, thresholds: &WarningThresholds) -> Vec<Warning> {
    let mut warnings = Vec::new();
    if reading.fuel_level_percent < thresholds.low_fuel_percent {
        warnings.push(Warning::LowFuel);
    }
    if reading.engine_temperature_c > thresholds.engine_hot_celsius {
        warnings.push(Warning::EngineHot);
    }
    if reading.abs_fault {
        warnings.push(Warning::AbsFault);
    }
    if reading.airbags_fault {
        warnings.push(Warning::AirbagFault);
    }
    if reading.lane_departure_warning {
        warnings.push(Warning::LaneDeparture);
    }
    warnings
}

/// Display-ready cluster state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiSnapshot {
    /// Latest vehicle reading
    pub reading: VehicleReading,
    /// Latest navigation event
    pub navigation: NavigationEvent,
    /// Selected display mode
    pub mode: DisplayMode,
    /// Active warnings, in display order
    pub warnings: Vec<Warning>,
}

impl UiSnapshot {
    /// Build a snapshot, deriving its warnings from the reading
    pub fn compose(
        reading: VehicleReading,
        navigation: NavigationEvent,
        mode: DisplayMode,
        thresholds: &WarningThresholds,
    ) -> Self {
        let warnings = build_warnings(&reading, thresholds);
        Self {
            reading,
            navigation,
            mode,
            warnings,
        }
    }

    /// Layout for this snapshot's mode with the default warning limits
    pub fn layout(&self) -> ClusterLayout {
        ClusterLayout::for_mode(self.mode)
    }

    /// Layout for this snapshot's mode with gauge bands from `thresholds`
    pub fn layout_with(&self, thresholds: &WarningThresholds) -> ClusterLayout {
        ClusterLayout::for_mode_with(self.mode, thresholds)
    }

    /// Whether any warning is active
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}
