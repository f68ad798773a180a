//! Cluster errors

use thiserror::Error;

/// Errors that can occur while configuring the cluster
#[derive(Error, Debug)]
pub enum ClusterError {
    /// Reading or writing a configuration file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A configuration file is not valid JSON for [`ClusterConfig`](crate::config::ClusterConfig)
    #[error("Invalid configuration file: {0}")]
    Json(#[from] serde_json::Error),

    /// A configuration value is out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result alias for fallible cluster operations
pub type Result<T> = std::result::Result<T, ClusterError>;
