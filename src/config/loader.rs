use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use super::settings::AppConfig;
use super::env::apply_env_overrides;
use crate::errors::ConfigError;

pub const CONFIG_FILE_NAME: &str = ".qaroi.toml";

/// Pure function to read config file contents
pub(crate) fn read_config_file(path: &Path) -> Result<String, std::io::Error> {
    let file = fs::File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Pure function to parse and validate config from TOML string
pub fn parse_and_validate_config(contents: &str) -> Result<AppConfig, String> {
    let config = toml::from_str::<AppConfig>(contents)
        .map_err(|e| format!("Failed to parse {CONFIG_FILE_NAME}: {e}"))?;
    config.validate().map_err(|e| e.to_string())?;
    Ok(config)
}

/// Load an explicitly requested config file; unlike discovery, failures are errors.
pub fn load_config_from(path: &Path) -> Result<AppConfig, ConfigError> {
    let contents = read_config_file(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let mut config =
        parse_and_validate_config(&contents).map_err(|message| ConfigError::Parse {
            path: path.to_path_buf(),
            message,
        })?;
    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    Ok(config)
}

fn try_load_config_from_path(config_path: &Path) -> Option<AppConfig> {
    let contents = match read_config_file(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            // Only log actual errors, not "file not found"
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(
                    "Failed to read config file {}: {}",
                    config_path.display(),
                    e
                );
            }
            return None;
        }
    };

    match parse_and_validate_config(&contents) {
        Ok(config) => {
            tracing::debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            tracing::warn!("{}. Using defaults.", e);
            None
        }
    }
}

/// Pure function to generate directory ancestors up to a depth limit
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Find the nearest `.qaroi.toml` above `start`, together with the directory holding it.
pub fn discover_config(start: PathBuf) -> Option<(PathBuf, AppConfig)> {
    const MAX_TRAVERSAL_DEPTH: usize = 10;

    directory_ancestors(start, MAX_TRAVERSAL_DEPTH).find_map(|dir| {
        try_load_config_from_path(&dir.join(CONFIG_FILE_NAME)).map(|config| (dir, config))
    })
}

/// Discovered config (or defaults) with environment overrides applied.
///
/// Returns the directory relative paths in the config resolve against.
pub fn load_config() -> (PathBuf, AppConfig) {
    let current = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            tracing::warn!("Failed to get current directory: {}. Using default config.", e);
            PathBuf::from(".")
        }
    };

    let (base, mut config) = discover_config(current.clone()).unwrap_or_else(|| {
        tracing::debug!("No {} found. Using default config.", CONFIG_FILE_NAME);
        (current, AppConfig::default())
    });
    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    (base, config)
}
