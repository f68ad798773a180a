use super::{VehicleDataProvider, VehicleReading};
use std::sync::Arc;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Owns the current vehicle reading and keeps it in sync with a provider
///
/// The cache always holds a value: [`VehicleReading::default`] until the
/// first reading arrives, then whatever the provider published last.
/// Readings that are superseded before the forwarding task sees them are
/// dropped.
pub struct VehicleRepository {
    provider: Arc<dyn VehicleDataProvider>,
    readings: Arc<watch::Sender<VehicleReading>>,
    subscription: Mutex<Option<JoinHandle<()>>>,
}

impl VehicleRepository {
    /// Create a repository over the given data source
    pub fn new(provider: Arc<dyn VehicleDataProvider>) -> Self {
        let (readings, _rx) = watch::channel(VehicleReading::default());
        Self {
            provider,
            readings: Arc::new(readings),
            subscription: Mutex::new(None),
        }
    }

    /// Connect the provider and start forwarding its readings into the cache
    ///
    /// Does nothing if already started.
    pub async fn start(&self) {
        let mut task_guard = self.subscription.lock().await;
        if task_guard.is_some() {
            return;
        }

        self.provider.connect();
        let mut source = self.provider.subscribe();
        let cache = Arc::clone(&self.readings);

        let handle = tokio::spawn(async move {
            // A provider may already hold a reading from before we subscribed
            source.mark_changed();
            while source.changed().await.is_ok() {
                let latest = source.borrow_and_update().clone();
                if let Some(reading) = latest {
                    cache.send_replace(reading);
                }
            }
            debug!("Vehicle provider closed its channel");
        });

        *task_guard = Some(handle);
        info!("Vehicle repository started");
    }

    /// Stop forwarding readings and disconnect the provider
    ///
    /// Once this returns the cached reading stays frozen until the next
    /// [`start`](Self::start). Safe to call when never started.
    pub async fn stop(&self) {
        let mut task_guard = self.subscription.lock().await;
        if let Some(handle) = task_guard.take() {
            handle.abort();
            // Wait for the abort so no in-flight reading lands after we return
            let _ = handle.await;
            info!("Vehicle repository stopped");
        }
        self.provider.disconnect();
    }

    /// Stop forwarding without waiting, for teardown paths that cannot await
    ///
    /// Returns `false` without doing anything if a `start` or `stop` currently
    /// holds the task lock. Unlike [`stop`](Self::stop), a reading already being
    /// forwarded on another worker may still land in the cache.
    pub fn try_abort(&self) -> bool {
        let Ok(mut task_guard) = self.subscription.try_lock() else {
            return false;
        };
        if let Some(handle) = task_guard.take() {
            handle.abort();
            info!("Vehicle repository aborted");
        }
        self.provider.disconnect();
        true
    }

    /// Whether the forwarding task is running
    pub async fn is_running(&self) -> bool {
        self.subscription.lock().await.is_some()
    }

    /// The most recent reading
    pub fn current(&self) -> VehicleReading {
        self.readings.borrow().clone()
    }

    /// Subscribe to reading updates
    pub fn subscribe(&self) -> watch::Receiver<VehicleReading> {
        self.readings.subscribe()
    }
}

impl Drop for VehicleRepository {
    fn drop(&mut self) {
        if let Some(handle) = self.subscription.get_mut().take() {
            handle.abort();
            self.provider.disconnect();
        }
    }
}
