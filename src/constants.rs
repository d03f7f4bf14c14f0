//! Constants and configuration values for the provisioner.
//!
//! This module centralizes the magic strings, paths, and delays used
//! throughout the crate so they exist in exactly one place.

use std::{env, path::PathBuf, time::Duration};

/// Default configuration file path, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "config.json";

/// File name of the service-wrapper executable.
pub const WRAPPER_EXE: &str = "nssm.exe";

/// Subfolder of the wrapper-tool folder holding the 64-bit build.
pub const WRAPPER_SUBDIR_64: &str = "win64";

/// Subfolder of the wrapper-tool folder holding the 32-bit build.
pub const WRAPPER_SUBDIR_32: &str = "win32";

/// Name of the OS service-control utility, resolved from `PATH`.
pub const SERVICE_CONTROL_TOOL: &str = "sc";

/// Environment variable overriding the system directory the wrapper is
/// installed into. Used by tests and dry runs on non-Windows hosts.
pub const SYSTEM_DIR_ENV: &str = "PROVISIONG_SYSTEM_DIR";

/// Environment variable holding the Windows installation directory.
pub const WINDIR_ENV: &str = "windir";

/// Fixed settling delay after removing a service, letting the OS release
/// the service name before it is reused.
pub const SETTLE_DELAY: Duration = Duration::from_secs(4);

/// Interval between status polls while waiting for a removed service to
/// disappear from the service registry.
pub const SETTLE_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Resolves the privileged system directory the wrapper executable lives in.
///
/// `PROVISIONG_SYSTEM_DIR` wins when set; otherwise `%windir%\System32`.
/// Falls back to a bare `System32` relative path when neither variable is
/// present, which surfaces as a copy error rather than a panic.
pub fn system_dir() -> PathBuf {
    if let Ok(dir) = env::var(SYSTEM_DIR_ENV) {
        return PathBuf::from(dir);
    }

    match env::var(WINDIR_ENV) {
        Ok(windir) => PathBuf::from(windir).join("System32"),
        Err(_) => PathBuf::from("System32"),
    }
}

/// Full path of the installed wrapper executable.
pub fn wrapper_path() -> PathBuf {
    system_dir().join(WRAPPER_EXE)
}
