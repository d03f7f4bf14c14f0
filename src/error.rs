//! Error handling for provisiong.
use std::path::PathBuf;

use thiserror::Error;

/// Defines all possible errors that can occur while provisioning services.
#[derive(Debug, Error)]
pub enum ProvisionError {
    /// Error reading or accessing the configuration file.
    #[error("Failed to read config file: {0}")]
    ConfigReadError(#[from] std::io::Error),

    /// Error parsing JSON configuration.
    #[error("Invalid JSON format: {0}")]
    ConfigParseError(#[from] serde_json::Error),

    /// Configuration parsed but failed validation.
    #[error("Invalid configuration: {0}")]
    ConfigInvalidError(String),

    /// Error installing the service-wrapper executable into the system directory.
    #[error("Failed to install service wrapper from {source_path:?}: {source}")]
    WrapperInstallError {
        /// The wrapper build that was being copied.
        source_path: PathBuf,
        /// The underlying error that occurred.
        #[source]
        source: std::io::Error,
    },

    /// Error deploying a service script into the destination folder.
    #[error("Failed to deploy script for service '{service}': {source}")]
    CopyError {
        /// The service whose script could not be deployed.
        service: String,
        /// The underlying error that occurred.
        #[source]
        source: std::io::Error,
    },

    /// Error launching one of the external service-control tools.
    #[error("Failed to run {tool} for service '{service}': {source}")]
    ServiceCommandError {
        /// The tool that could not be invoked (e.g. `nssm.exe`, `sc`).
        tool: String,
        /// The service the command was operating on.
        service: String,
        /// The underlying error that occurred.
        #[source]
        source: std::io::Error,
    },

    /// Error stopping a running service.
    #[error("Failed to stop service '{service}': {detail}")]
    ServiceStopError {
        /// The service that failed to stop.
        service: String,
        /// Output captured from the failing tool.
        detail: String,
    },

    /// Error deleting a stale service registration.
    #[error("Failed to remove service '{service}': {detail}")]
    ServiceRemoveError {
        /// The service that failed to delete.
        service: String,
        /// Output captured from the failing tool.
        detail: String,
    },

    /// Error installing a service registration with the wrapper tool.
    #[error("Failed to install service '{service}': {detail}")]
    ServiceInstallError {
        /// The service that failed to install.
        service: String,
        /// Output captured from the failing tool.
        detail: String,
    },

    /// Error starting a freshly installed service.
    #[error("Failed to start service '{service}': {detail}")]
    ServiceStartError {
        /// The service that failed to start.
        service: String,
        /// Output captured from the failing tool.
        detail: String,
    },
}

impl ProvisionError {
    /// Whether the error aborts the entire run rather than a single service.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ProvisionError::ConfigReadError(_)
                | ProvisionError::ConfigParseError(_)
                | ProvisionError::ConfigInvalidError(_)
                | ProvisionError::WrapperInstallError { .. }
        )
    }
}
