//! Configuration management for provisiong.
use std::{collections::HashSet, fs, path::Path};

use regex::Regex;
use serde::Deserialize;

use crate::{constants::DEFAULT_CONFIG_PATH, error::ProvisionError};

/// Maximum length the OS accepts for a service identifier.
const MAX_SERVICE_NAME_LEN: usize = 256;

/// Represents the structure of the configuration file.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Folder containing `win64/` and `win32/` builds of the wrapper tool.
    pub nssm_folder: String,
    /// Folder service scripts are deployed into.
    pub dest_folder: String,
    /// Ordered list of services to provision.
    pub services: Vec<ServiceSpec>,
}

/// Declaration of a single service to provision.
#[derive(Debug, Deserialize, Clone)]
pub struct ServiceSpec {
    /// OS service identifier. Must be unique within the configuration.
    pub service_name: String,
    /// Path of the script the service will run, copied into `dest_folder`.
    pub source_bat_path: String,
}

/// Loads and parses the configuration file, then validates it.
pub fn load_config(config_path: Option<&str>) -> Result<Config, ProvisionError> {
    let config_path = Path::new(config_path.unwrap_or(DEFAULT_CONFIG_PATH));

    let content = fs::read_to_string(config_path).map_err(|e| {
        ProvisionError::ConfigReadError(std::io::Error::new(
            e.kind(),
            format!("{} ({})", e, config_path.display()),
        ))
    })?;

    let config: Config =
        serde_json::from_str(&content).map_err(ProvisionError::ConfigParseError)?;

    validate(&config)?;
    Ok(config)
}

/// Checks the data-model invariants the loader guarantees to the rest of
/// the crate: service names are valid OS service identifiers and unique.
fn validate(config: &Config) -> Result<(), ProvisionError> {
    let name_re = Regex::new(r"^[^/\\\x00-\x1f]+$").expect("valid regex literal");

    let mut seen = HashSet::new();
    for spec in &config.services {
        let name = spec.service_name.as_str();

        if name.is_empty() || name.len() > MAX_SERVICE_NAME_LEN {
            return Err(ProvisionError::ConfigInvalidError(format!(
                "service name '{name}' must be between 1 and {MAX_SERVICE_NAME_LEN} characters"
            )));
        }

        if !name_re.is_match(name) {
            return Err(ProvisionError::ConfigInvalidError(format!(
                "service name '{name}' contains path separators or control characters"
            )));
        }

        if !seen.insert(name) {
            return Err(ProvisionError::ConfigInvalidError(format!(
                "duplicate service name '{name}'"
            )));
        }
    }

    Ok(())
}
