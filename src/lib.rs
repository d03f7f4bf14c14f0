//! Provisiong is a configuration-driven provisioning tool that registers
//! executable scripts as Windows services. It reads a JSON descriptor,
//! installs the NSSM-style service-wrapper executable into the system
//! directory when absent, then deploys each declared script and brings an
//! OS service wrapping it to a running state.

/// CLI interface.
pub mod cli;

/// Configuration management.
pub mod config;

/// Centralized paths, tool names, and delays.
pub mod constants;

/// Service-control seam over the external tools.
pub mod controller;

/// Script deployment.
pub mod deploy;

/// Error handling.
pub mod error;

/// Provisioning run orchestration.
pub mod provisioner;

/// Per-service registration state machine.
pub mod registrar;

/// Service-wrapper installation.
pub mod wrapper;
