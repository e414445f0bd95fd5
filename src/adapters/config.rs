use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use log::debug;

use crate::adapters::limited_io::read_to_string_with_limit;
use crate::core::config::Config;
use crate::error::VlsmError;

pub const ENV_VLSM_CONFIG: &str = "VLSM_CONFIG";

const CONFIG_READ_LIMIT: usize = 64 * 1024;

// An empty VLSM_CONFIG counts as unset.
pub fn resolve_config_path(
    explicit: Option<&Path>,
    env_value: Option<OsString>,
) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }

    env_value
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

pub fn load_config(explicit: Option<&Path>) -> Result<Config, VlsmError> {
    match resolve_config_path(explicit, env::var_os(ENV_VLSM_CONFIG)) {
        Some(path) => load_config_from_file(&path),
        None => {
            debug!("no config file configured, using defaults");
            Ok(Config::default())
        }
    }
}

pub fn load_config_from_file(path: &Path) -> Result<Config, VlsmError> {
    if !path.exists() {
        return Err(VlsmError::MissingConfigFile {
            path: path.to_path_buf(),
        });
    }

    let contents = read_to_string_with_limit(path, CONFIG_READ_LIMIT).map_err(|err| {
        VlsmError::ConfigRead {
            path: path.to_path_buf(),
            reason: err.to_string(),
        }
    })?;

    debug!("loaded config from {}", path.display());
    Config::from_toml_str(&contents).map_err(VlsmError::from)
}
