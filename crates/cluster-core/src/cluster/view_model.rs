use super::{ClusterLayout, DisplayMode, UiSnapshot, WarningThresholds};
use crate::navigation::{NavigationEvent, NavigationRepository};
use crate::vehicle::{VehicleReading, VehicleRepository};
use std::sync::Arc;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Aggregates vehicle, navigation and mode state into [`UiSnapshot`]s
///
/// A background task recomputes the snapshot whenever the vehicle reading,
/// the navigation event or the mode changes. Mode changes made through
/// [`select_mode`](Self::select_mode) are also applied before it returns.
pub struct ClusterViewModel {
    vehicle: Arc<VehicleRepository>,
    navigation: Arc<NavigationRepository>,
    mode: watch::Sender<DisplayMode>,
    snapshot: Arc<watch::Sender<UiSnapshot>>,
    thresholds: WarningThresholds,
    combiner: Mutex<Option<JoinHandle<()>>>,
}

/// Replace the snapshot if the inputs produce a different one
///
/// Runs under the snapshot channel's write lock, so concurrent publishers
/// serialize and the last one reads the freshest inputs.
fn publish(
    snapshot: &watch::Sender<UiSnapshot>,
    thresholds: &WarningThresholds,
    inputs: impl FnOnce() -> (VehicleReading, NavigationEvent, DisplayMode),
) -> bool {
    snapshot.send_if_modified(|current| {
        let (reading, navigation, mode) = inputs();
        let next = UiSnapshot::compose(reading, navigation, mode, thresholds);
        if *current == next {
            return false;
        }
        *current = next;
        true
    })
}

impl ClusterViewModel {
    /// Start the vehicle repository and begin publishing snapshots
    pub async fn new(
        vehicle: Arc<VehicleRepository>,
        navigation: Arc<NavigationRepository>,
        initial_mode: DisplayMode,
        thresholds: WarningThresholds,
    ) -> Self {
        vehicle.start().await;

        let (mode, mut mode_rx) = watch::channel(initial_mode);
        let mut readings_rx = vehicle.subscribe();
        let mut navigation_rx = navigation.subscribe();

        let initial = UiSnapshot::compose(
            readings_rx.borrow_and_update().clone(),
            navigation_rx.borrow_and_update().clone(),
            *mode_rx.borrow_and_update(),
            &thresholds,
        );
        let (snapshot, _rx) = watch::channel(initial);
        let snapshot = Arc::new(snapshot);

        let tx = Arc::clone(&snapshot);
        let combine_thresholds = thresholds.clone();
        let combiner = tokio::spawn(async move {
            loop {
                let closed = tokio::select! {
                    r = readings_rx.changed() => r.is_err(),
                    r = navigation_rx.changed() => r.is_err(),
                    r = mode_rx.changed() => r.is_err(),
                };
                if closed {
                    break;
                }
                publish(&tx, &combine_thresholds, || {
                    (
                        readings_rx.borrow_and_update().clone(),
                        navigation_rx.borrow_and_update().clone(),
                        *mode_rx.borrow_and_update(),
                    )
                });
            }
            debug!("Cluster combiner exited");
        });

        info!("Cluster view model started in {:?} mode", initial_mode);

        Self {
            vehicle,
            navigation,
            mode,
            snapshot,
            thresholds,
            combiner: Mutex::new(Some(combiner)),
        }
    }

    /// Switch the display mode
    pub fn select_mode(&self, mode: DisplayMode) {
        self.mode.send_replace(mode);
        publish(&self.snapshot, &self.thresholds, || {
            (
                self.vehicle.current(),
                self.navigation.current(),
                *self.mode.borrow(),
            )
        });
        debug!("Display mode set to {:?}", mode);
    }

    /// Forward a navigation update to the navigation repository
    pub fn update_navigation(&self, event: NavigationEvent) {
        self.navigation.on_navigation_update(event);
    }

    /// Currently selected display mode
    pub fn mode(&self) -> DisplayMode {
        *self.mode.borrow()
    }

    /// The current snapshot
    pub fn snapshot(&self) -> UiSnapshot {
        self.snapshot.borrow().clone()
    }

    /// Subscribe to snapshot updates
    pub fn subscribe(&self) -> watch::Receiver<UiSnapshot> {
        self.snapshot.subscribe()
    }

    /// Layout for the selected mode, with gauge bands matching the warnings
    pub fn layout(&self) -> ClusterLayout {
        ClusterLayout::for_mode_with(self.mode(), &self.thresholds)
    }

    /// Limits used to derive warnings
    pub fn thresholds(&self) -> &WarningThresholds {
        &self.thresholds
    }

    /// Vehicle repository feeding this view model
    pub fn vehicle(&self) -> &Arc<VehicleRepository> {
        &self.vehicle
    }

    /// Navigation repository feeding this view model
    pub fn navigation(&self) -> &Arc<NavigationRepository> {
        &self.navigation
    }

    /// Stop recomputing snapshots and release the vehicle data source
    pub async fn shutdown(&self) {
        if let Some(handle) = self.combiner.lock().await.take() {
            handle.abort();
            let _ = handle.await;
        }
        self.vehicle.stop().await;
        info!("Cluster view model shut down");
    }
}

impl Drop for ClusterViewModel {
    fn drop(&mut self) {
        if let Some(handle) = self.combiner.get_mut().take() {
            handle.abort();
        }
        // The repository may be shared, so release the data source explicitly
        if !self.vehicle.try_abort() {
            // A start or stop holds the lock; finish the stop once it is released
            if let Ok(runtime) = tokio::runtime::Handle::try_current() {
                let vehicle = Arc::clone(&self.vehicle);
                runtime.spawn(async move { vehicle.stop().await });
            }
        }
    }
}
