//! Headless Instrument Cluster
//!
//! Runs the simulated cluster pipeline and logs each snapshot in place of a
//! display, cycling through display modes and feeding sample guidance.
//!
//! Usage:
//!   cargo run --example headless_cluster -- [OPTIONS]
//!
//! Options:
//!   --config PATH     Load a JSON cluster configuration
//!   --mode MODE       Start in classic, minimal, navigation or neon
//!   --seconds N       Run time in seconds (default: 10)
//!   --imperial        Show readouts in mph / °F / mi
//!
//! Log verbosity follows RUST_LOG (default: info).

use anyhow::{bail, Context};
use cluster_core::prelude::*;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn parse_mode(name: &str) -> anyhow::Result<DisplayMode> {
    serde_json::from_value(serde_json::Value::String(name.to_lowercase()))
        .with_context(|| format!("unknown display mode '{}'", name))
}

fn parse_seconds(value: &str) -> anyhow::Result<u64> {
    value
        .parse()
        .with_context(|| format!("invalid --seconds value '{}'", value))
}

fn log_snapshot(snapshot: &UiSnapshot, units: UnitSystem) {
    let reading = &snapshot.reading;
    info!(
        "[{}] {:.0} {} | {:.0} rpm | gear {} | fuel {:.0}% | engine {:.0}{} | odo {:.1} {}",
        snapshot.mode.label(),
        units.speed(reading.speed_kph),
        units.speed_label(),
        reading.rpm,
        reading.gear,
        reading.fuel_level_percent,
        units.temperature(reading.engine_temperature_c),
        units.temperature_label(),
        units.distance(reading.odometer_km),
        units.distance_label(),
    );

    let layout = snapshot.layout();
    if layout.shows_navigation {
        info!(
            "  nav: {} ({})",
            snapshot.navigation.instruction,
            snapshot.navigation.summary()
        );
    }
    for warning in &snapshot.warnings {
        warn!("  {}", warning);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();

    let mut config_path: Option<PathBuf> = None;
    let mut mode: Option<DisplayMode> = None;
    let mut seconds = 10u64;
    let mut imperial = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                i += 1;
                if i < args.len() {
                    config_path = Some(PathBuf::from(&args[i]));
                }
            }
            "--mode" | "-m" => {
                i += 1;
                if i < args.len() {
                    mode = Some(parse_mode(&args[i])?);
                }
            }
            "--seconds" | "-s" => {
                i += 1;
                if i < args.len() {
                    seconds = parse_seconds(&args[i])?;
                }
            }
            "--imperial" => imperial = true,
            "--help" | "-h" => {
                println!("Usage: headless_cluster [--config PATH] [--mode MODE] [--seconds N] [--imperial]");
                return Ok(());
            }
            other => bail!("unknown argument '{}'", other),
        }
        i += 1;
    }

    let mut config = match &config_path {
        Some(path) => ClusterConfig::load(path)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => ClusterConfig::default(),
    };
    if let Some(mode) = mode {
        config.initial_mode = mode;
    }
    if imperial {
        config.units = UnitSystem::Imperial;
    }
    let units = config.units;

    let cluster = Cluster::simulated(config).await?;
    let view_model = cluster.view_model();
    let mut snapshots = view_model.subscribe();

    view_model.update_navigation(NavigationEvent::active("Turn left onto Harbour Rd", 450, 14));

    let deadline = tokio::time::sleep(Duration::from_secs(seconds));
    tokio::pin!(deadline);
    let mut mode_timer = tokio::time::interval(Duration::from_secs(3));
    mode_timer.tick().await;
    let mut next_mode = DisplayMode::ALL
        .iter()
        .position(|m| *m == view_model.mode())
        .unwrap_or(0);
    let mut last_log: Option<Instant> = None;

    loop {
        tokio::select! {
            _ = &mut deadline => break,
            _ = mode_timer.tick() => {
                next_mode = (next_mode + 1) % DisplayMode::ALL.len();
                view_model.select_mode(DisplayMode::ALL[next_mode]);
            }
            changed = snapshots.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = snapshots.borrow_and_update().clone();
                // Throttle output to roughly two lines per second
                if last_log.map_or(true, |t| t.elapsed() >= Duration::from_millis(500)) {
                    log_snapshot(&snapshot, units);
                    last_log = Some(Instant::now());
                }
            }
        }
    }

    view_model.navigation().clear();
    cluster.shutdown().await;
    info!("Cluster stopped");
    Ok(())
}
