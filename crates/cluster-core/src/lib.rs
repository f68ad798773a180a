//! # Instrument Cluster Core Library
//!
//! Core functionality for a simulated automotive instrument cluster.

#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//!
//! This library provides:
//! - A simulated vehicle data source producing a deterministic drive cycle
//! - Latest-value repositories for vehicle telemetry and navigation guidance
//! - A view model that combines both with the selected display mode into
//!   render-ready snapshots, including derived warnings
//! - Declarative gauge layouts for each display mode
//!
//! Drawing is left to the presentation layer.
//!
//! ## Display Modes
//!
//! - Classic (round gauges)
//! - Minimal (bars)
//! - Navigation
//! - Neon (sweep gauges)
//!
//! ## Example
//!
//! ```rust,ignore
//! use cluster_core::prelude::*;
//!
//! let cluster = Cluster::simulated(ClusterConfig::default()).await?;
//! let mut snapshots = cluster.view_model().subscribe();
//!
//! cluster.view_model().select_mode(DisplayMode::Navigation);
//! cluster
//!     .view_model()
//!     .update_navigation(NavigationEvent::active("Turn left", 300, 12));
//!
//! snapshots.changed().await?;
//! println!("{} km/h", snapshots.borrow().reading.speed_kph);
//! ```

pub mod cluster;
pub mod config;
pub mod context;
pub mod error;
pub mod navigation;
pub mod units;
pub mod vehicle;

pub use context::Cluster;
pub use error::{ClusterError, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::cluster::{
        build_warnings, ClusterLayout, ClusterViewModel, DisplayMode, GaugeConfig, GaugeType,
        UiSnapshot, Warning, WarningThresholds,
    };
    pub use crate::config::ClusterConfig;
    pub use crate::context::Cluster;
    pub use crate::error::{ClusterError, Result};
    pub use crate::navigation::{NavigationEvent, NavigationRepository};
    pub use crate::units::UnitSystem;
    pub use crate::vehicle::{
        Channel, Gear, SimulatedVehicleProvider, SimulatorSettings, VehicleDataProvider,
        VehicleReading, VehicleRepository,
    };
}

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
