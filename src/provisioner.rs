//! Provisioning run orchestration.
//!
//! Config → wrapper install → per-service { deploy, register }. Per-service
//! errors are caught at the loop boundary so one failing service never
//! blocks the rest; only config and wrapper-install errors abort the run.

use std::path::Path;

use tracing::{error, info};

use crate::{
    config::Config,
    controller::ServiceController,
    deploy::deploy_script,
    error::ProvisionError,
    registrar::{ServiceRegistrar, SettleTimings},
    wrapper::WrapperInstaller,
};

/// Outcome of one provisioning run.
#[derive(Debug, Default)]
pub struct RunReport {
    /// Services whose registration sequence ran to completion.
    pub provisioned: Vec<String>,
    /// Services that failed, with the logged reason.
    pub failed: Vec<(String, String)>,
}

impl RunReport {
    /// Number of registration sequences attempted.
    pub fn attempted(&self) -> usize {
        self.provisioned.len() + self.failed.len()
    }

    /// Whether every configured service provisioned successfully.
    pub fn all_succeeded(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Drives a full provisioning run over a loaded configuration.
pub struct Provisioner<'a> {
    config: &'a Config,
    controller: &'a dyn ServiceController,
    installer: WrapperInstaller,
    timings: SettleTimings,
}

impl<'a> Provisioner<'a> {
    /// Creates a provisioner with the default wrapper target and timings.
    pub fn new(config: &'a Config, controller: &'a dyn ServiceController) -> Self {
        let installer = WrapperInstaller::new(&config.nssm_folder);
        Self::with_parts(config, controller, installer, SettleTimings::default())
    }

    /// Test constructor with explicit collaborators.
    pub fn with_parts(
        config: &'a Config,
        controller: &'a dyn ServiceController,
        installer: WrapperInstaller,
        timings: SettleTimings,
    ) -> Self {
        Self {
            config,
            controller,
            installer,
            timings,
        }
    }

    /// Runs the provisioning sequence for every configured service.
    ///
    /// The wrapper install happens exactly once, before the loop; its
    /// failure is fatal since no service can be registered without it.
    pub fn run(&self) -> Result<RunReport, ProvisionError> {
        self.installer.ensure_installed()?;

        let registrar = ServiceRegistrar::with_timings(self.controller, self.timings);
        let dest_folder = Path::new(&self.config.dest_folder);
        let mut report = RunReport::default();

        for spec in &self.config.services {
            let name = spec.service_name.as_str();
            info!("Provisioning service '{name}'...");

            match self.provision_one(&registrar, name, dest_folder, &spec.source_bat_path) {
                Ok(()) => report.provisioned.push(name.to_string()),
                Err(err) => {
                    error!("An error occurred while creating service '{name}': {err}");
                    report.failed.push((name.to_string(), err.to_string()));
                }
            }
        }

        info!(
            "Provisioning finished: {} succeeded, {} failed.",
            report.provisioned.len(),
            report.failed.len()
        );
        Ok(report)
    }

    fn provision_one(
        &self,
        registrar: &ServiceRegistrar<'_>,
        name: &str,
        dest_folder: &Path,
        source_bat_path: &str,
    ) -> Result<(), ProvisionError> {
        let deployed = deploy_script(name, Path::new(source_bat_path), dest_folder)?;
        registrar.register(name, &deployed)
    }
}
