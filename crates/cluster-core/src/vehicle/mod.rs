//! Vehicle Telemetry
//!
//! Readings produced by a vehicle data source and the pipeline that caches them.

mod provider;
mod repository;
pub mod simulator;

pub use provider::VehicleDataProvider;
pub use repository::VehicleRepository;
pub use simulator::{gear_for_speed, simulate, SimulatedVehicleProvider, SimulatorSettings};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Selected transmission gear
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Gear {
    /// Stationary
    #[default]
    #[serde(rename = "P")]
    Park,
    /// First gear
    #[serde(rename = "1")]
    First,
    /// Second gear
    #[serde(rename = "2")]
    Second,
    /// Third gear
    #[serde(rename = "3")]
    Third,
    /// Fourth gear
    #[serde(rename = "4")]
    Fourth,
    /// Fifth gear
    #[serde(rename = "5")]
    Fifth,
}

impl Gear {
    /// Symbol shown on the gear indicator
    pub fn symbol(&self) -> &'static str {
        match self {
            Gear::Park => "P",
            Gear::First => "1",
            Gear::Second => "2",
            Gear::Third => "3",
            Gear::Fourth => "4",
            Gear::Fifth => "5",
        }
    }
}

impl fmt::Display for Gear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Numeric channels of a reading that a gauge can display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    /// `speed_kph`
    Speed,
    /// `rpm`
    Rpm,
    /// `fuel_level_percent`
    FuelLevel,
    /// `engine_temperature_c`
    EngineTemperature,
    /// `odometer_km`
    Odometer,
    /// `trip_distance_km`
    TripDistance,
    /// `outside_temperature_c`
    OutsideTemperature,
    /// `battery_voltage`
    BatteryVoltage,
}

impl Channel {
    /// Every channel, in display order
    pub const ALL: [Channel; 8] = [
        Channel::Speed,
        Channel::Rpm,
        Channel::FuelLevel,
        Channel::EngineTemperature,
        Channel::Odometer,
        Channel::TripDistance,
        Channel::OutsideTemperature,
        Channel::BatteryVoltage,
    ];
}

/// One immutable snapshot of vehicle telemetry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleReading {
    /// Road speed in km/h
    pub speed_kph: f64,
    /// Engine speed in revolutions per minute
    pub rpm: f64,
    /// Fuel level in percent
    pub fuel_level_percent: f64,
    /// Coolant temperature in °C
    pub engine_temperature_c: f64,
    /// Selected gear
    pub gear: Gear,
    /// Total distance in km
    pub odometer_km: f64,
    /// Distance since the trip counter was reset, in km
    pub trip_distance_km: f64,
    /// Ambient temperature in °C
    pub outside_temperature_c: f64,
    /// Battery voltage in volts
    pub battery_voltage: f64,
    /// Cruise control engaged
    pub cruise_control_active: bool,
    /// Lane departure assist is warning
    pub lane_departure_warning: bool,
    /// Low beams on
    pub headlights_on: bool,
    /// High beams on
    pub high_beams_on: bool,
    /// Left turn indicator lit
    pub left_indicator_on: bool,
    /// Right turn indicator lit
    pub right_indicator_on: bool,
    /// ABS reports a fault
    pub abs_fault: bool,
    /// Airbag system reports a fault
    pub airbags_fault: bool,
}

impl Default for VehicleReading {
    /// Reading shown before any data source has reported
    fn default() -> Self {
        Self {
            speed_kph: 0.0,
            rpm: 0.0,
            fuel_level_percent: 100.0,
            engine_temperature_c: 90.0,
            gear: Gear::Park,
            odometer_km: 0.0,
            trip_distance_km: 0.0,
            outside_temperature_c: 20.0,
            battery_voltage: 12.6,
            cruise_control_active: false,
            lane_departure_warning: false,
            headlights_on: false,
            high_beams_on: false,
            left_indicator_on: false,
            right_indicator_on: false,
            abs_fault: false,
            airbags_fault: false,
        }
    }
}

impl VehicleReading {
    /// Get the value of a numeric channel
    pub fn value(&self, channel: Channel) -> f64 {
        match channel {
            Channel::Speed => self.speed_kph,
            Channel::Rpm => self.rpm,
            Channel::FuelLevel => self.fuel_level_percent,
            Channel::EngineTemperature => self.engine_temperature_c,
            Channel::Odometer => self.odometer_km,
            Channel::TripDistance => self.trip_distance_km,
            Channel::OutsideTemperature => self.outside_temperature_c,
            Channel::BatteryVoltage => self.battery_voltage,
        }
    }

    /// True when every numeric channel holds a finite value
    pub fn is_finite(&self) -> bool {
        Channel::ALL.iter().all(|c| self.value(*c).is_finite())
    }
}
