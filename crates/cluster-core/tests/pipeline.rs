use cluster_core::prelude::*;
use pretty_assertions::assert_eq;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

/// Provider whose readings are pushed by the test
struct MockProvider {
    tx: watch::Sender<Option<VehicleReading>>,
    connects: AtomicUsize,
    disconnects: AtomicUsize,
}

impl MockProvider {
    fn new() -> Arc<Self> {
        let (tx, _rx) = watch::channel(None);
        Arc::new(Self {
            tx,
            connects: AtomicUsize::new(0),
            disconnects: AtomicUsize::new(0),
        })
    }

    fn push(&self, reading: VehicleReading) {
        self.tx.send_replace(Some(reading));
    }

    fn subscribers(&self) -> usize {
        self.tx.receiver_count()
    }

    fn connects(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }
}

impl VehicleDataProvider for MockProvider {
    fn connect(&self) {
        self.connects.fetch_add(1, Ordering::SeqCst);
    }

    fn disconnect(&self) {
        self.disconnects.fetch_add(1, Ordering::SeqCst);
    }

    fn is_connected(&self) -> bool {
        self.connects.load(Ordering::SeqCst) > self.disconnects.load(Ordering::SeqCst)
    }

    fn subscribe(&self) -> watch::Receiver<Option<VehicleReading>> {
        self.tx.subscribe()
    }
}

fn reading_with_speed(speed_kph: f64) -> VehicleReading {
    VehicleReading {
        speed_kph,
        ..VehicleReading::default()
    }
}

async fn wait_for<T>(rx: &mut watch::Receiver<T>, mut f: impl FnMut(&T) -> bool) {
    tokio::time::timeout(Duration::from_secs(5), rx.wait_for(|v| f(v)))
        .await
        .expect("timed out waiting for value")
        .expect("channel closed");
}

// ============================================================================
// Vehicle repository
// ============================================================================

#[tokio::test]
async fn test_repository_default_before_start() {
    let provider = MockProvider::new();
    let repo = VehicleRepository::new(provider.clone());

    assert_eq!(repo.current(), VehicleReading::default());
    assert!(!repo.is_running().await);
    assert_eq!(provider.connects(), 0);
}

#[tokio::test]
async fn test_repository_forwards_latest_reading() {
    let provider = MockProvider::new();
    let repo = VehicleRepository::new(provider.clone());
    repo.start().await;
    assert!(provider.is_connected());

    // Intermediate readings may be skipped; the last one must land
    provider.push(reading_with_speed(10.0));
    provider.push(reading_with_speed(20.0));
    provider.push(reading_with_speed(30.0));

    let mut rx = repo.subscribe();
    wait_for(&mut rx, |r| r.speed_kph == 30.0).await;
    assert_eq!(repo.current(), reading_with_speed(30.0));

    repo.stop().await;
}

#[tokio::test]
async fn test_repository_sees_reading_published_before_start() {
    let provider = MockProvider::new();
    provider.push(reading_with_speed(42.0));

    let repo = VehicleRepository::new(provider.clone());
    repo.start().await;

    let mut rx = repo.subscribe();
    wait_for(&mut rx, |r| r.speed_kph == 42.0).await;
    repo.stop().await;
}

#[tokio::test]
async fn test_repository_start_is_idempotent() {
    let provider = MockProvider::new();
    let repo = VehicleRepository::new(provider.clone());

    repo.start().await;
    repo.start().await;
    repo.start().await;

    assert_eq!(provider.connects(), 1);
    assert_eq!(provider.subscribers(), 1);
    repo.stop().await;
}

#[tokio::test]
async fn test_repository_stop_freezes_cache() {
    let provider = MockProvider::new();
    let repo = VehicleRepository::new(provider.clone());
    repo.start().await;

    provider.push(reading_with_speed(55.0));
    let mut rx = repo.subscribe();
    wait_for(&mut rx, |r| r.speed_kph == 55.0).await;

    repo.stop().await;
    assert!(!provider.is_connected());
    assert_eq!(provider.subscribers(), 0);

    provider.push(reading_with_speed(99.0));
    tokio::time::sleep(Duration::from_millis(50)).await;

    assert_eq!(repo.current(), reading_with_speed(55.0));
    assert!(!rx.has_changed().unwrap());
}

#[tokio::test]
async fn test_repository_stop_without_start() {
    let provider = MockProvider::new();
    let repo = VehicleRepository::new(provider.clone());

    repo.stop().await;
    repo.stop().await;

    assert_eq!(repo.current(), VehicleReading::default());
    assert!(!repo.is_running().await);
}

#[tokio::test]
async fn test_repository_restart_resumes_with_single_subscription() {
    let provider = MockProvider::new();
    let repo = VehicleRepository::new(provider.clone());

    repo.start().await;
    repo.stop().await;
    repo.start().await;

    assert!(repo.is_running().await);
    assert_eq!(provider.connects(), 2);
    assert_eq!(provider.subscribers(), 1);

    provider.push(reading_with_speed(71.0));
    let mut rx = repo.subscribe();
    wait_for(&mut rx, |r| r.speed_kph == 71.0).await;

    repo.stop().await;
    assert_eq!(provider.subscribers(), 0);
}

#[tokio::test]
async fn test_repository_drop_releases_provider() {
    let provider = MockProvider::new();
    {
        let repo = VehicleRepository::new(provider.clone());
        repo.start().await;
        assert!(provider.is_connected());
    }
    assert!(!provider.is_connected());
}

// ============================================================================
// Cluster view model
// ============================================================================

async fn view_model(provider: Arc<MockProvider>) -> ClusterViewModel {
    let vehicle = Arc::new(VehicleRepository::new(provider));
    let navigation = Arc::new(NavigationRepository::new());
    ClusterViewModel::new(
        vehicle,
        navigation,
        DisplayMode::Classic,
        WarningThresholds::default(),
    )
    .await
}

#[tokio::test]
async fn test_view_model_initial_snapshot() {
    let provider = MockProvider::new();
    let vm = view_model(provider.clone()).await;

    let snapshot = vm.snapshot();
    assert_eq!(snapshot.reading, VehicleReading::default());
    assert_eq!(snapshot.navigation, NavigationEvent::cleared());
    assert_eq!(snapshot.mode, DisplayMode::Classic);
    assert!(snapshot.warnings.is_empty());

    // Construction starts the vehicle repository
    assert!(vm.vehicle().is_running().await);
    assert_eq!(provider.connects(), 1);
    vm.shutdown().await;
}

#[tokio::test]
async fn test_select_mode_updates_snapshot_immediately() {
    let provider = MockProvider::new();
    let vm = view_model(provider.clone()).await;

    provider.push(reading_with_speed(64.0));
    let mut rx = vm.subscribe();
    wait_for(&mut rx, |s| s.reading.speed_kph == 64.0).await;

    vm.update_navigation(NavigationEvent::active("Turn left", 300, 12));
    wait_for(&mut rx, |s| s.navigation.is_active).await;

    let before = vm.snapshot();
    vm.select_mode(DisplayMode::Neon);

    let after = vm.snapshot();
    assert_eq!(vm.mode(), DisplayMode::Neon);
    assert_eq!(after.mode, DisplayMode::Neon);
    assert_eq!(after.reading, before.reading);
    assert_eq!(after.navigation, before.navigation);
    assert_eq!(vm.vehicle().current(), reading_with_speed(64.0));
    assert_eq!(
        vm.navigation().current(),
        NavigationEvent::active("Turn left", 300, 12)
    );
    vm.shutdown().await;
}

#[tokio::test]
async fn test_navigation_updates_flow_into_snapshot() {
    let provider = MockProvider::new();
    let vm = view_model(provider).await;
    let mut rx = vm.subscribe();

    vm.update_navigation(NavigationEvent::active("Exit 14 toward Airport", 1800, 22));
    wait_for(&mut rx, |s| s.navigation.instruction == "Exit 14 toward Airport").await;
    assert_eq!(vm.snapshot().navigation.distance_meters, 1800);

    vm.navigation().clear();
    wait_for(&mut rx, |s| !s.navigation.is_active).await;
    assert_eq!(vm.snapshot().navigation, NavigationEvent::cleared());
    vm.shutdown().await;
}

#[tokio::test]
async fn test_warnings_follow_readings() {
    let provider = MockProvider::new();
    let vm = view_model(provider.clone()).await;
    let mut rx = vm.subscribe();

    provider.push(VehicleReading {
        fuel_level_percent: 10.0,
        engine_temperature_c: 90.0,
        ..VehicleReading::default()
    });
    wait_for(&mut rx, |s| s.reading.fuel_level_percent == 10.0).await;
    assert_eq!(vm.snapshot().warnings, vec![Warning::LowFuel]);

    provider.push(VehicleReading {
        fuel_level_percent: 50.0,
        engine_temperature_c: 110.0,
        abs_fault: true,
        ..VehicleReading::default()
    });
    wait_for(&mut rx, |s| s.reading.abs_fault).await;
    assert_eq!(
        vm.snapshot().warnings,
        vec![Warning::EngineHot, Warning::AbsFault]
    );
    vm.shutdown().await;
}

#[tokio::test]
async fn test_shutdown_stops_repository() {
    let provider = MockProvider::new();
    let vm = view_model(provider.clone()).await;

    vm.shutdown().await;

    assert!(!vm.vehicle().is_running().await);
    assert!(!provider.is_connected());
    assert_eq!(provider.subscribers(), 0);

    // Mode selection still works on the frozen state
    vm.select_mode(DisplayMode::Minimal);
    assert_eq!(vm.snapshot().mode, DisplayMode::Minimal);
}

#[tokio::test]
async fn test_dropping_view_model_stops_shared_repository() {
    let provider = MockProvider::new();
    let vehicle = Arc::new(VehicleRepository::new(provider.clone()));
    let vm = ClusterViewModel::new(
        vehicle.clone(),
        Arc::new(NavigationRepository::new()),
        DisplayMode::Classic,
        WarningThresholds::default(),
    )
    .await;

    provider.push(reading_with_speed(40.0));
    let mut rx = vehicle.subscribe();
    wait_for(&mut rx, |r| r.speed_kph == 40.0).await;

    drop(vm);

    // The repository outlives the view model but no longer forwards
    assert!(!provider.is_connected());
    assert!(!vehicle.is_running().await);
    provider.push(reading_with_speed(90.0));
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(vehicle.current(), reading_with_speed(40.0));
}

#[tokio::test(start_paused = true)]
async fn test_dropping_view_model_disconnects_simulator() {
    let provider = Arc::new(SimulatedVehicleProvider::default());
    let vehicle = Arc::new(VehicleRepository::new(provider.clone()));
    let vm = ClusterViewModel::new(
        vehicle.clone(),
        Arc::new(NavigationRepository::new()),
        DisplayMode::Classic,
        WarningThresholds::default(),
    )
    .await;

    let mut rx = vehicle.subscribe();
    wait_for(&mut rx, |r| *r != VehicleReading::default()).await;

    drop(vm);
    let frozen = vehicle.current();
    tokio::time::sleep(Duration::from_millis(500)).await;

    assert!(!provider.is_connected());
    assert!(!vehicle.is_running().await);
    assert_eq!(vehicle.current(), frozen);
}

#[tokio::test]
async fn test_view_model_layout_uses_configured_thresholds() {
    let provider = MockProvider::new();
    let thresholds = WarningThresholds {
        low_fuel_percent: 25.0,
        ..WarningThresholds::default()
    };
    let vm = ClusterViewModel::new(
        Arc::new(VehicleRepository::new(provider.clone())),
        Arc::new(NavigationRepository::new()),
        DisplayMode::Classic,
        thresholds,
    )
    .await;
    let mut rx = vm.subscribe();

    provider.push(VehicleReading {
        fuel_level_percent: 20.0,
        ..VehicleReading::default()
    });
    wait_for(&mut rx, |s| s.reading.fuel_level_percent == 20.0).await;

    // The fuel gauge and the warning panel agree on what counts as low
    let snapshot = vm.snapshot();
    assert_eq!(snapshot.warnings, vec![Warning::LowFuel]);
    assert_eq!(vm.layout().gauges_in_warning(&snapshot.reading), vec!["fuel"]);
    assert_eq!(snapshot.layout_with(vm.thresholds()), vm.layout());
    vm.shutdown().await;
}
