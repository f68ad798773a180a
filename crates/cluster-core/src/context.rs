//! Application context
//!
//! Constructs the provider, repositories and view model once and hands them to
//! whatever owns the display loop.

use crate::cluster::ClusterViewModel;
use crate::config::ClusterConfig;
use crate::error::Result;
use crate::navigation::NavigationRepository;
use crate::vehicle::{SimulatedVehicleProvider, VehicleDataProvider, VehicleRepository};
use std::sync::Arc;

/// A running cluster pipeline
pub struct Cluster {
    config: ClusterConfig,
    view_model: ClusterViewModel,
}

impl Cluster {
    /// Build a cluster fed by the simulator
    pub async fn simulated(config: ClusterConfig) -> Result<Self> {
        let provider = Arc::new(SimulatedVehicleProvider::new(config.simulator.clone()));
        Self::with_provider(config, provider).await
    }

    /// Build a cluster fed by any vehicle data provider
    pub async fn with_provider(
        config: ClusterConfig,
        provider: Arc<dyn VehicleDataProvider>,
    ) -> Result<Self> {
        config.validate()?;

        let vehicle = Arc::new(VehicleRepository::new(provider));
        let navigation = Arc::new(NavigationRepository::new());
        let view_model = ClusterViewModel::new(
            vehicle,
            navigation,
            config.initial_mode,
            config.warnings.clone(),
        )
        .await;

        Ok(Self { config, view_model })
    }

    /// Configuration the cluster was built from
    pub fn config(&self) -> &ClusterConfig {
        &self.config
    }

    /// The cluster's view model
    pub fn view_model(&self) -> &ClusterViewModel {
        &self.view_model
    }

    /// Stop the pipeline
    pub async fn shutdown(&self) {
        self.view_model.shutdown().await;
    }
}
