use super::VehicleReading;
use tokio::sync::watch;

/// Abstraction for vehicle data sources (simulator, CAN bus reader, log replay)
///
/// A provider publishes through a latest-value channel: a receiver created at
/// any time sees the most recent reading, or `None` if nothing has been
/// produced since the provider was created.
pub trait VehicleDataProvider: Send + Sync {
    /// Start producing readings. Calling this while connected has no effect.
    ///
    /// Must be called from within a Tokio runtime.
    fn connect(&self);

    /// Stop producing readings. Safe to call when not connected.
    fn disconnect(&self);

    /// Whether the provider is currently producing readings
    fn is_connected(&self) -> bool;

    /// Subscribe to the latest reading
    fn subscribe(&self) -> watch::Receiver<Option<VehicleReading>>;
}
