//! Copies service scripts into the destination folder.

use std::{fs, io, path::{Path, PathBuf}};

use tracing::info;

use crate::error::ProvisionError;

/// Copies `source` into `dest_folder`, preserving the filename.
///
/// Returns the deployed path on success. Failures (missing source, unwritable
/// destination) are per-service: the caller logs them and moves on.
pub fn deploy_script(
    service: &str,
    source: &Path,
    dest_folder: &Path,
) -> Result<PathBuf, ProvisionError> {
    let file_name = source.file_name().ok_or_else(|| ProvisionError::CopyError {
        service: service.to_string(),
        source: io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("source path '{}' has no filename", source.display()),
        ),
    })?;

    let target = dest_folder.join(file_name);
    fs::copy(source, &target).map_err(|e| ProvisionError::CopyError {
        service: service.to_string(),
        source: e,
    })?;

    info!("Copied {:?} to {:?}.", source, target);
    Ok(target)
}
