//! Simulated vehicle data source
//!
//! Generates a deterministic drive cycle for running the cluster without a
//! vehicle attached. Every value is a closed-form function of the simulation
//! time `t`, which advances by a fixed step per tick:
//!
//! - speed oscillates between 20 and 80 km/h, rpm between 1200 and 2800
//! - fuel drains linearly and bottoms out at 5 %
//! - cruise control, lane departure, high beams and indicators cycle on
//!   fixed periods

use super::{Gear, VehicleDataProvider, VehicleReading};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace};

/// Lowest fuel level the simulated tank drains to (%)
pub const FUEL_FLOOR_PERCENT: f64 = 5.0;

/// Simulator timing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorSettings {
    /// Wall-clock delay between readings in milliseconds
    pub tick_period_ms: u64,
    /// Simulation time added per reading
    pub time_step: f64,
}

impl Default for SimulatorSettings {
    fn default() -> Self {
        Self {
            tick_period_ms: 100,
            time_step: 0.5,
        }
    }
}

impl SimulatorSettings {
    /// Tick period as a `Duration`
    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_period_ms)
    }
}

/// Map road speed to the gear the simulated gearbox would select
///
/// Total over all inputs; NaN lands in the top bucket.
pub fn gear_for_speed(speed_kph: f64) -> Gear {
    if speed_kph < 2.0 {
        Gear::Park
    } else if speed_kph < 10.0 {
        Gear::First
    } else if speed_kph < 25.0 {
        Gear::Second
    } else if speed_kph < 40.0 {
        Gear::Third
    } else if speed_kph < 60.0 {
        Gear::Fourth
    } else {
        Gear::Fifth
    }
}

/// Compute the simulated reading at time `t`
pub fn simulate(t: f64) -> VehicleReading {
    let speed = 50.0 + 30.0 * t.sin();
    let cruise_phase = t % 60.0;
    let indicator_phase = t % 6.0;

    VehicleReading {
        speed_kph: speed,
        rpm: 2000.0 + 800.0 * (t / 2.0).cos(),
        fuel_level_percent: (70.0 - t / 10.0).max(FUEL_FLOOR_PERCENT),
        engine_temperature_c: 85.0 + 5.0 * (t / 3.0).sin(),
        gear: gear_for_speed(speed),
        odometer_km: t / 10.0,
        trip_distance_km: t / 15.0,
        outside_temperature_c: 18.0 + 4.0 * (t / 10.0).sin(),
        battery_voltage: 12.4,
        cruise_control_active: cruise_phase > 10.0 && cruise_phase < 40.0,
        lane_departure_warning: t % 45.0 > 30.0,
        headlights_on: true,
        high_beams_on: t % 90.0 < 10.0,
        left_indicator_on: indicator_phase < 1.5,
        right_indicator_on: (3.0..=4.5).contains(&indicator_phase),
        abs_fault: false,
        airbags_fault: false,
    }
}

/// In-process provider that emits [`simulate`] readings on a timer
pub struct SimulatedVehicleProvider {
    settings: SimulatorSettings,
    readings: Arc<watch::Sender<Option<VehicleReading>>>,
    /// Token of the running generation task, if any
    running: Mutex<Option<CancellationToken>>,
}

impl Default for SimulatedVehicleProvider {
    fn default() -> Self {
        Self::new(SimulatorSettings::default())
    }
}

impl SimulatedVehicleProvider {
    /// Create a simulator with the given timing
    pub fn new(settings: SimulatorSettings) -> Self {
        let (tx, _rx) = watch::channel(None);
        Self {
            settings,
            readings: Arc::new(tx),
            running: Mutex::new(None),
        }
    }

    /// Timing this simulator was created with
    pub fn settings(&self) -> &SimulatorSettings {
        &self.settings
    }
}

impl VehicleDataProvider for SimulatedVehicleProvider {
    fn connect(&self) {
        let mut running = self.running.lock().unwrap_or_else(PoisonError::into_inner);
        if running.as_ref().is_some_and(|token| !token.is_cancelled()) {
            return;
        }

        let token = CancellationToken::new();
        *running = Some(token.clone());

        let tx = Arc::clone(&self.readings);
        let period = self.settings.tick_period();
        let step = self.settings.time_step;
        info!(
            "Simulator connected (period {:?}, step {})",
            period, step
        );

        tokio::spawn(async move {
            // Simulation time is local to this task and restarts on reconnect
            let mut time = 0.0;
            loop {
                let reading = simulate(time);
                trace!(time, speed = reading.speed_kph, "simulated reading");
                tx.send_replace(Some(reading));
                time += step;

                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = tokio::time::sleep(period) => {}
                }
            }
            debug!("Simulator loop exited at t={}", time);
        });
    }

    fn disconnect(&self) {
        let token = self
            .running
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(token) = token {
            token.cancel();
            info!("Simulator disconnected");
        }
    }

    fn is_connected(&self) -> bool {
        self.running
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|token| !token.is_cancelled())
    }

    fn subscribe(&self) -> watch::Receiver<Option<VehicleReading>> {
        self.readings.subscribe()
    }
}

impl Drop for SimulatedVehicleProvider {
    fn drop(&mut self) {
        let running = self.running.get_mut().unwrap_or_else(PoisonError::into_inner);
        if let Some(token) = running.take() {
            token.cancel();
        }
    }
}
