//! Per-service registration state machine.
//!
//! Brings one service to a running state by replacing any prior
//! registration: query, best-effort stop and remove, settle until the OS
//! releases the name, then install and start the new registration.

use std::{
    path::Path,
    thread,
    time::{Duration, Instant},
};

use tracing::{debug, error, info, warn};

use crate::{
    constants::{SETTLE_DELAY, SETTLE_POLL_INTERVAL},
    controller::{ServiceController, ServiceStatus},
    error::ProvisionError,
};

/// Timings for the settling step between remove and install.
///
/// The registry is polled until the removed name stops resolving; if it
/// still resolves when the window closes, one full fixed delay is taken as
/// a last resort.
#[derive(Debug, Clone, Copy)]
pub struct SettleTimings {
    /// Interval between status polls.
    pub poll_interval: Duration,
    /// How long to keep polling before giving up.
    pub poll_window: Duration,
    /// Fixed delay taken when polling never observed the name released.
    pub fallback_delay: Duration,
}

impl Default for SettleTimings {
    fn default() -> Self {
        Self {
            poll_interval: SETTLE_POLL_INTERVAL,
            poll_window: SETTLE_DELAY,
            fallback_delay: SETTLE_DELAY,
        }
    }
}

/// Registers services through a [`ServiceController`].
pub struct ServiceRegistrar<'a> {
    controller: &'a dyn ServiceController,
    timings: SettleTimings,
}

impl<'a> ServiceRegistrar<'a> {
    /// Creates a registrar with the default settle timings.
    pub fn new(controller: &'a dyn ServiceController) -> Self {
        Self::with_timings(controller, SettleTimings::default())
    }

    /// Creates a registrar with explicit settle timings.
    pub fn with_timings(controller: &'a dyn ServiceController, timings: SettleTimings) -> Self {
        Self { controller, timings }
    }

    /// Replaces any existing registration of `service` with one running
    /// `script_path`, and starts it.
    ///
    /// Stop and remove failures are logged and ignored; install and start
    /// failures are fatal for this service and propagate to the caller.
    pub fn register(&self, service: &str, script_path: &Path) -> Result<(), ProvisionError> {
        match self.controller.query_status(service)? {
            ServiceStatus::Absent => {
                debug!("Service '{service}' not registered; skipping stop and remove.");
            }
            status => {
                if status == ServiceStatus::Running {
                    info!("Stopping service '{service}'...");
                    if let Err(err) = self.controller.stop(service) {
                        warn!("Ignoring stop failure for '{service}': {err}");
                    }
                }

                match self.controller.remove(service) {
                    Ok(()) => info!("Service '{service}' removed successfully."),
                    // Best effort: install is still attempted against a
                    // possibly stale registration.
                    Err(err) => error!("Failed to remove service '{service}': {err}"),
                }
            }
        }

        self.settle(service);

        self.controller.install(service, script_path)?;
        info!(
            "Service '{service}' created successfully to run {:?}.",
            script_path
        );

        self.controller.start(service)?;
        info!("Service '{service}' started successfully.");

        Ok(())
    }

    /// Waits for the OS to release the service name after removal.
    fn settle(&self, service: &str) {
        let deadline = Instant::now() + self.timings.poll_window;
        loop {
            match self.controller.query_status(service) {
                Ok(ServiceStatus::Absent) => {
                    debug!("Service '{service}' released; settling complete.");
                    return;
                }
                Ok(status) => {
                    debug!("Service '{service}' still {} while settling.", status.as_ref());
                }
                Err(err) => {
                    debug!("Status poll failed while settling for '{service}': {err}");
                    return;
                }
            }

            if Instant::now() >= deadline {
                break;
            }
            thread::sleep(self.timings.poll_interval);
        }

        warn!(
            "Service '{service}' still registered after {:?}; falling back to fixed settling delay.",
            self.timings.poll_window
        );
        thread::sleep(self.timings.fallback_delay);
    }
}
