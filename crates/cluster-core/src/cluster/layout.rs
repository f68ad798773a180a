//! Cluster Layouts
//!
//! Declarative description of what each display mode shows. A renderer takes
//! a [`UiSnapshot`](super::UiSnapshot), looks up its layout and draws each
//! gauge from the reading; positions are fractions of the cluster surface.

use super::{DisplayMode, WarningThresholds};
use crate::vehicle::{Channel, VehicleReading};
use serde::{Deserialize, Serialize};

/// Gauge styles a renderer must support
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum GaugeType {
    /// Round dial with a needle
    #[serde(rename = "analog_dial")]
    AnalogDial,
    /// Numeric readout
    #[serde(rename = "digital_readout")]
    DigitalReadout,
    /// Linear bar
    #[serde(rename = "bar_gauge")]
    BarGauge,
    /// Arc that fills as the value rises
    #[serde(rename = "sweep_gauge")]
    SweepGauge,
}

/// Configuration for a single gauge
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GaugeConfig {
    /// Identifier, unique within a layout
    pub id: String,
    /// Visual style
    pub gauge_type: GaugeType,
    /// Reading channel shown
    pub channel: Channel,
    /// Caption
    pub label: String,
    /// Unit text shown next to the value
    pub units: String,
    /// Left edge as a fraction of surface width
    pub x: f64,
    /// Top edge as a fraction of surface height
    pub y: f64,
    /// Width as a fraction of surface width
    pub width: f64,
    /// Height as a fraction of surface height
    pub height: f64,
    /// Value at the start of the scale
    pub min_value: f64,
    /// Value at the end of the scale
    pub max_value: f64,
    /// Warn when the value drops below this
    #[serde(skip_serializing_if = "Option::is_none")]
    pub low_warning: Option<f64>,
    /// Warn when the value rises above this
    #[serde(skip_serializing_if = "Option::is_none")]
    pub high_warning: Option<f64>,
    /// Decimal places in the readout
    pub decimals: u32,
}

impl GaugeConfig {
    fn new(id: &str, gauge_type: GaugeType, channel: Channel, label: &str, units: &str) -> Self {
        Self {
            id: id.to_string(),
            gauge_type,
            channel,
            label: label.to_string(),
            units: units.to_string(),
            x: 0.0,
            y: 0.0,
            width: 0.2,
            height: 0.2,
            min_value: 0.0,
            max_value: 100.0,
            low_warning: None,
            high_warning: None,
            decimals: 0,
        }
    }

    fn at(mut self, x: f64, y: f64, width: f64, height: f64) -> Self {
        self.x = x;
        self.y = y;
        self.width = width;
        self.height = height;
        self
    }

    fn range(mut self, min_value: f64, max_value: f64) -> Self {
        self.min_value = min_value;
        self.max_value = max_value;
        self
    }

    fn warn_below(mut self, value: f64) -> Self {
        self.low_warning = Some(value);
        self
    }

    fn warn_above(mut self, value: f64) -> Self {
        self.high_warning = Some(value);
        self
    }

    /// Needle/bar position for a reading, clamped to [0, 1]
    pub fn fraction(&self, reading: &VehicleReading) -> f64 {
        let span = self.max_value - self.min_value;
        if span <= 0.0 {
            return 0.0;
        }
        let fraction = (reading.value(self.channel) - self.min_value) / span;
        if fraction.is_nan() {
            0.0
        } else {
            fraction.clamp(0.0, 1.0)
        }
    }

    /// Whether the reading sits in this gauge's warning band
    pub fn is_warning(&self, reading: &VehicleReading) -> bool {
        let value = reading.value(self.channel);
        self.low_warning.is_some_and(|low| value < low)
            || self.high_warning.is_some_and(|high| value > high)
    }

    /// Readout text with the gauge's precision
    pub fn format_value(&self, reading: &VehicleReading) -> String {
        format!(
            "{:.*}",
            self.decimals as usize,
            reading.value(self.channel)
        )
    }
}

/// Everything a display mode draws
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClusterLayout {
    /// Display name
    pub name: String,
    /// Mode this layout renders
    pub mode: DisplayMode,
    /// Gauges, back to front
    pub gauges: Vec<GaugeConfig>,
    /// Whether the navigation tile is shown
    pub shows_navigation: bool,
}

impl Default for ClusterLayout {
    fn default() -> Self {
        Self::for_mode(DisplayMode::default())
    }
}

impl ClusterLayout {
    /// Built-in layout for a display mode with the default warning limits
    pub fn for_mode(mode: DisplayMode) -> Self {
        Self::for_mode_with(mode, &WarningThresholds::default())
    }

    /// Built-in layout for a display mode
    ///
    /// Fuel and engine temperature bands follow `thresholds`, so gauge warnings
    /// agree with the snapshot's warning list.
    pub fn for_mode_with(mode: DisplayMode, thresholds: &WarningThresholds) -> Self {
        match mode {
            DisplayMode::Classic => Self::classic(thresholds),
            DisplayMode::Minimal => Self::minimal(thresholds),
            DisplayMode::Navigation => Self::navigation(thresholds),
            DisplayMode::Neon => Self::neon(),
        }
    }

    /// Find a gauge by id
    pub fn gauge(&self, id: &str) -> Option<&GaugeConfig> {
        self.gauges.iter().find(|g| g.id == id)
    }

    /// Ids of gauges whose reading is in a warning band
    pub fn gauges_in_warning(&self, reading: &VehicleReading) -> Vec<&str> {
        self.gauges
            .iter()
            .filter(|g| g.is_warning(reading))
            .map(|g| g.id.as_str())
            .collect()
    }

    fn classic(thresholds: &WarningThresholds) -> Self {
        Self {
            name: "Classic".to_string(),
            mode: DisplayMode::Classic,
            gauges: vec![
                GaugeConfig::new("rpm", GaugeType::AnalogDial, Channel::Rpm, "RPM", "rpm")
                    .at(0.02, 0.1, 0.3, 0.8)
                    .range(0.0, 8000.0)
                    .warn_above(6500.0),
                GaugeConfig::new("speed", GaugeType::DigitalReadout, Channel::Speed, "Speed", "km/h")
                    .at(0.38, 0.1, 0.24, 0.3)
                    .range(0.0, 220.0),
                GaugeConfig::new("fuel", GaugeType::AnalogDial, Channel::FuelLevel, "Fuel", "%")
                    .at(0.68, 0.1, 0.3, 0.8)
                    .warn_below(thresholds.low_fuel_percent),
            ],
            shows_navigation: true,
        }
    }

    fn minimal(thresholds: &WarningThresholds) -> Self {
        Self {
            name: "Minimal".to_string(),
            mode: DisplayMode::Minimal,
            gauges: vec![
                GaugeConfig::new("speed", GaugeType::DigitalReadout, Channel::Speed, "Speed", "km/h")
                    .at(0.35, 0.05, 0.3, 0.25)
                    .range(0.0, 220.0),
                GaugeConfig::new("speed_bar", GaugeType::BarGauge, Channel::Speed, "Speed", "km/h")
                    .at(0.1, 0.4, 0.8, 0.1)
                    .range(0.0, 220.0),
                GaugeConfig::new("fuel", GaugeType::BarGauge, Channel::FuelLevel, "Fuel", "%")
                    .at(0.1, 0.6, 0.8, 0.1)
                    .warn_below(thresholds.low_fuel_percent),
                GaugeConfig::new(
                    "engine_temp",
                    GaugeType::BarGauge,
                    Channel::EngineTemperature,
                    "Engine temp",
                    "°C",
                )
                .at(0.1, 0.8, 0.8, 0.1)
                .range(0.0, 120.0)
                .warn_above(thresholds.engine_hot_celsius),
            ],
            shows_navigation: false,
        }
    }

    fn navigation(thresholds: &WarningThresholds) -> Self {
        Self {
            name: "Navigation".to_string(),
            mode: DisplayMode::Navigation,
            gauges: vec![
                GaugeConfig::new("speed", GaugeType::DigitalReadout, Channel::Speed, "Speed", "km/h")
                    .at(0.35, 0.02, 0.3, 0.2)
                    .range(0.0, 220.0),
                GaugeConfig::new("fuel", GaugeType::BarGauge, Channel::FuelLevel, "Fuel", "%")
                    .at(0.1, 0.85, 0.8, 0.1)
                    .warn_below(thresholds.low_fuel_percent),
            ],
            shows_navigation: true,
        }
    }

    fn neon() -> Self {
        Self {
            name: "Neon".to_string(),
            mode: DisplayMode::Neon,
            gauges: vec![
                GaugeConfig::new("speed", GaugeType::SweepGauge, Channel::Speed, "Speed", "km/h")
                    .at(0.05, 0.1, 0.4, 0.8)
                    .range(0.0, 220.0),
                GaugeConfig::new("rpm", GaugeType::SweepGauge, Channel::Rpm, "RPM", "rpm")
                    .at(0.55, 0.1, 0.4, 0.8)
                    .range(0.0, 8000.0)
                    .warn_above(6500.0),
                GaugeConfig::new(
                    "battery",
                    GaugeType::DigitalReadout,
                    Channel::BatteryVoltage,
                    "Battery",
                    "V",
                )
                .at(0.42, 0.85, 0.16, 0.1)
                .range(10.0, 16.0)
                .warn_below(11.8),
            ],
            shows_navigation: false,
        }
    }
}
