//! Service-control seam over the external wrapper tool and `sc`.
//!
//! Registrar logic talks to a [`ServiceController`] rather than shelling out
//! directly, so the per-service state machine can be exercised against a fake
//! without touching the real OS service registry.

use std::{
    path::{Path, PathBuf},
    process::{Command, Output},
};

use strum_macros::AsRefStr;
use tracing::debug;

use crate::{
    constants::{self, SERVICE_CONTROL_TOOL, WRAPPER_EXE},
    error::ProvisionError,
};

/// Observed state of an OS service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr)]
#[strum(serialize_all = "UPPERCASE")]
pub enum ServiceStatus {
    /// The service exists and is currently running.
    Running,
    /// The service exists but is not running.
    Stopped,
    /// The service registry has no record of the name.
    Absent,
}

/// Operations the provisioner needs from the OS service layer.
///
/// Exit code 0 from the underlying tool means success; everything else is an
/// error carrying the tool's captured output.
pub trait ServiceController {
    /// Queries the current status of `service`.
    fn query_status(&self, service: &str) -> Result<ServiceStatus, ProvisionError>;

    /// Registers `service` to run `executable` as an OS service.
    fn install(&self, service: &str, executable: &Path) -> Result<(), ProvisionError>;

    /// Starts an installed service.
    fn start(&self, service: &str) -> Result<(), ProvisionError>;

    /// Stops a running service.
    fn stop(&self, service: &str) -> Result<(), ProvisionError>;

    /// Deletes the service registration.
    fn remove(&self, service: &str) -> Result<(), ProvisionError>;
}

/// [`ServiceController`] backed by the installed wrapper executable and the
/// OS service-control utility.
pub struct CommandController {
    wrapper_path: PathBuf,
}

impl CommandController {
    /// Creates a controller around a specific wrapper executable.
    pub fn new(wrapper_path: PathBuf) -> Self {
        Self { wrapper_path }
    }

    /// Creates a controller around the wrapper at the well-known system path.
    pub fn from_system_dir() -> Self {
        Self::new(constants::wrapper_path())
    }

    fn run_wrapper(&self, service: &str, args: &[&str]) -> Result<Output, ProvisionError> {
        debug!("Running {} {:?}", self.wrapper_path.display(), args);
        Command::new(&self.wrapper_path).args(args).output().map_err(|e| {
            ProvisionError::ServiceCommandError {
                tool: WRAPPER_EXE.to_string(),
                service: service.to_string(),
                source: e,
            }
        })
    }

    fn run_service_control(
        &self,
        service: &str,
        args: &[&str],
    ) -> Result<Output, ProvisionError> {
        debug!("Running {SERVICE_CONTROL_TOOL} {args:?}");
        Command::new(SERVICE_CONTROL_TOOL)
            .args(args)
            .output()
            .map_err(|e| ProvisionError::ServiceCommandError {
                tool: SERVICE_CONTROL_TOOL.to_string(),
                service: service.to_string(),
                source: e,
            })
    }
}

impl ServiceController for CommandController {
    fn query_status(&self, service: &str) -> Result<ServiceStatus, ProvisionError> {
        let output = self.run_wrapper(service, &["status", service])?;

        // A non-zero exit from the status query means the registry has no
        // record of the name.
        if !output.status.success() {
            return Ok(ServiceStatus::Absent);
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        if stdout.contains("RUNNING") {
            Ok(ServiceStatus::Running)
        } else {
            Ok(ServiceStatus::Stopped)
        }
    }

    fn install(&self, service: &str, executable: &Path) -> Result<(), ProvisionError> {
        let executable = executable.to_string_lossy();
        let output = self.run_wrapper(service, &["install", service, &executable])?;
        if output.status.success() {
            Ok(())
        } else {
            Err(ProvisionError::ServiceInstallError {
                service: service.to_string(),
                detail: output_detail(&output),
            })
        }
    }

    fn start(&self, service: &str) -> Result<(), ProvisionError> {
        let output = self.run_wrapper(service, &["start", service])?;
        if output.status.success() {
            Ok(())
        } else {
            Err(ProvisionError::ServiceStartError {
                service: service.to_string(),
                detail: output_detail(&output),
            })
        }
    }

    fn stop(&self, service: &str) -> Result<(), ProvisionError> {
        let output = self.run_service_control(service, &["stop", service])?;
        if output.status.success() {
            Ok(())
        } else {
            Err(ProvisionError::ServiceStopError {
                service: service.to_string(),
                detail: output_detail(&output),
            })
        }
    }

    fn remove(&self, service: &str) -> Result<(), ProvisionError> {
        let output = self.run_service_control(service, &["delete", service])?;
        if output.status.success() {
            Ok(())
        } else {
            Err(ProvisionError::ServiceRemoveError {
                service: service.to_string(),
                detail: output_detail(&output),
            })
        }
    }
}

/// Best human-readable explanation a failing tool left behind.
fn output_detail(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let trimmed = stderr.trim();
    if !trimmed.is_empty() {
        return trimmed.to_string();
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let trimmed = stdout.trim();
    if !trimmed.is_empty() {
        return trimmed.to_string();
    }

    format!("exited with status {:?}", output.status.code())
}
