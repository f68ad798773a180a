//! Display Units
//!
//! Readings are always carried in metric. These helpers convert them for
//! display when the cluster is set to imperial:
//! - Speed: km/h ↔ mph
//! - Temperature: °C ↔ °F
//! - Distance: km ↔ mi

use serde::{Deserialize, Serialize};

const KM_PER_MILE: f64 = 1.609344;

/// Convert Celsius to Fahrenheit
pub fn celsius_to_fahrenheit(c: f64) -> f64 {
    c * 9.0 / 5.0 + 32.0
}

/// Convert Fahrenheit to Celsius
pub fn fahrenheit_to_celsius(f: f64) -> f64 {
    (f - 32.0) * 5.0 / 9.0
}

/// Convert km/h to mph
pub fn kmh_to_mph(kmh: f64) -> f64 {
    kmh / KM_PER_MILE
}

/// Convert mph to km/h
pub fn mph_to_kmh(mph: f64) -> f64 {
    mph * KM_PER_MILE
}

/// Convert kilometers to miles
pub fn km_to_miles(km: f64) -> f64 {
    km / KM_PER_MILE
}

/// Convert miles to kilometers
pub fn miles_to_km(miles: f64) -> f64 {
    miles * KM_PER_MILE
}

/// Unit system used for readouts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    /// km/h, °C, km
    #[default]
    Metric,
    /// mph, °F, mi
    Imperial,
}

impl UnitSystem {
    /// Convert a speed in km/h for display
    pub fn speed(&self, kph: f64) -> f64 {
        match self {
            UnitSystem::Metric => kph,
            UnitSystem::Imperial => kmh_to_mph(kph),
        }
    }

    /// Convert a temperature in °C for display
    pub fn temperature(&self, celsius: f64) -> f64 {
        match self {
            UnitSystem::Metric => celsius,
            UnitSystem::Imperial => celsius_to_fahrenheit(celsius),
        }
    }

    /// Convert a distance in km for display
    pub fn distance(&self, km: f64) -> f64 {
        match self {
            UnitSystem::Metric => km,
            UnitSystem::Imperial => km_to_miles(km),
        }
    }

    /// Unit shown next to speeds
    pub fn speed_label(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "km/h",
            UnitSystem::Imperial => "mph",
        }
    }

    /// Unit shown next to temperatures
    pub fn temperature_label(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "°C",
            UnitSystem::Imperial => "°F",
        }
    }

    /// Unit shown next to distances
    pub fn distance_label(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "km",
            UnitSystem::Imperial => "mi",
        }
    }
}
