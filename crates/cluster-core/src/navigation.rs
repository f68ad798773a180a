//! Navigation State
//!
//! Turn-by-turn guidance pushed in by a navigation source and shown on the
//! cluster's navigation tile.

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::debug;

/// Current guidance instruction
///
/// The default value is the cleared state: no instruction, zero distance and
/// ETA, inactive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationEvent {
    /// Instruction text, e.g. "Turn left onto Main St"
    pub instruction: String,
    /// Distance to the next maneuver in meters
    pub distance_meters: u32,
    /// Estimated time to arrival in minutes
    pub eta_minutes: u32,
    /// Whether guidance is active
    pub is_active: bool,
}

impl NavigationEvent {
    /// Create an active guidance event
    pub fn active(instruction: impl Into<String>, distance_meters: u32, eta_minutes: u32) -> Self {
        Self {
            instruction: instruction.into(),
            distance_meters,
            eta_minutes,
            is_active: true,
        }
    }

    /// The cleared (inactive) event
    pub fn cleared() -> Self {
        Self::default()
    }

    /// Distance and ETA line for the navigation tile
    pub fn summary(&self) -> String {
        if !self.is_active {
            return "No active navigation".to_string();
        }
        format!(
            "{:.1} km · ETA {} min",
            self.distance_meters as f64 / 1000.0,
            self.eta_minutes
        )
    }
}

/// Owns the current navigation event
pub struct NavigationRepository {
    navigation: watch::Sender<NavigationEvent>,
}

impl Default for NavigationRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl NavigationRepository {
    /// Create a repository holding the cleared event
    pub fn new() -> Self {
        let (navigation, _rx) = watch::channel(NavigationEvent::cleared());
        Self { navigation }
    }

    /// Replace the current event
    pub fn on_navigation_update(&self, event: NavigationEvent) {
        debug!(
            "Navigation update: '{}' in {} m",
            event.instruction, event.distance_meters
        );
        self.navigation.send_replace(event);
    }

    /// Reset to the cleared event
    pub fn clear(&self) {
        self.navigation.send_replace(NavigationEvent::cleared());
    }

    /// The current event
    pub fn current(&self) -> NavigationEvent {
        self.navigation.borrow().clone()
    }

    /// Subscribe to navigation updates
    pub fn subscribe(&self) -> watch::Receiver<NavigationEvent> {
        self.navigation.subscribe()
    }
}
