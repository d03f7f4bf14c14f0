//! Installs the service-wrapper executable into the system directory.

use std::{fs, path::PathBuf};

use tracing::{debug, info};

use crate::{
    constants::{self, WRAPPER_EXE, WRAPPER_SUBDIR_32, WRAPPER_SUBDIR_64},
    error::ProvisionError,
};

/// Architecture classes the wrapper tool ships builds for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostArch {
    /// 64-bit hosts, served by the `win64` build.
    Bits64,
    /// Everything else, served by the `win32` build.
    Bits32,
}

impl HostArch {
    /// Detects the class of the current host from its pointer width.
    pub fn detect() -> Self {
        if cfg!(target_pointer_width = "64") {
            HostArch::Bits64
        } else {
            HostArch::Bits32
        }
    }

    /// Subfolder of the wrapper-tool folder holding this class's build.
    fn subdir(self) -> &'static str {
        match self {
            HostArch::Bits64 => WRAPPER_SUBDIR_64,
            HostArch::Bits32 => WRAPPER_SUBDIR_32,
        }
    }
}

/// Copies the wrapper executable into the privileged system directory once.
pub struct WrapperInstaller {
    tool_folder: PathBuf,
    system_dir: PathBuf,
    arch: HostArch,
}

impl WrapperInstaller {
    /// Creates an installer reading builds from `tool_folder` and writing to
    /// the well-known system directory.
    pub fn new(tool_folder: impl Into<PathBuf>) -> Self {
        Self {
            tool_folder: tool_folder.into(),
            system_dir: constants::system_dir(),
            arch: HostArch::detect(),
        }
    }

    /// Test constructor with an explicit system directory and architecture.
    pub fn with_target(
        tool_folder: impl Into<PathBuf>,
        system_dir: impl Into<PathBuf>,
        arch: HostArch,
    ) -> Self {
        Self {
            tool_folder: tool_folder.into(),
            system_dir: system_dir.into(),
            arch,
        }
    }

    /// Path the wrapper executable is installed at.
    pub fn installed_path(&self) -> PathBuf {
        self.system_dir.join(WRAPPER_EXE)
    }

    /// Whether the wrapper is already present at the well-known path.
    pub fn is_installed(&self) -> bool {
        self.installed_path().is_file()
    }

    /// The architecture-specific build that would be installed on this host.
    pub fn source_build(&self) -> PathBuf {
        self.tool_folder.join(self.arch.subdir()).join(WRAPPER_EXE)
    }

    /// Ensures the wrapper executable exists at the well-known system path.
    ///
    /// Idempotent: an existing install is left untouched. A copy failure is
    /// fatal for the whole run since no service can be registered without
    /// the wrapper.
    pub fn ensure_installed(&self) -> Result<PathBuf, ProvisionError> {
        let target = self.installed_path();
        if self.is_installed() {
            info!(
                "Service wrapper already installed at {:?}. Skipping installation.",
                target
            );
            return Ok(target);
        }

        let source = self.source_build();
        debug!("Selected wrapper build {:?} for {:?}", source, self.arch);

        fs::copy(&source, &target).map_err(|e| ProvisionError::WrapperInstallError {
            source_path: source.clone(),
            source: e,
        })?;

        info!("Installed service wrapper to {:?} from {:?}.", target, source);
        Ok(target)
    }
}
