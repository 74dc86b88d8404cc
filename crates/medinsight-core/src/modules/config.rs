//! `config.json` persistence with environment overrides.

use std::fs;
use std::path::{Path, PathBuf};

use medinsight_types::{AppConfig, ConfigError};

const DATA_DIR: &str = ".medinsight";
const CONFIG_FILE: &str = "config.json";

pub const DATA_DIR_ENV: &str = "MEDINSIGHT_DATA_DIR";
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";
pub const BASE_URL_ENV: &str = "GEMINI_BASE_URL";
pub const PORT_ENV: &str = "MEDINSIGHT_PORT";

/// Keys accepted by [`get_value`] and [`set_value`].
pub const SETTABLE_KEYS: [&str; 7] = [
    "gemini.api_key",
    "gemini.base_url",
    "invoker.max_retries",
    "invoker.base_delay_ms",
    "server.port",
    "hospitals.region",
    "hospitals.directory",
];

/// Get the data directory path, creating it if needed.
pub fn get_data_dir() -> Result<PathBuf, ConfigError> {
    let data_dir = if let Ok(custom_dir) = std::env::var(DATA_DIR_ENV) {
        PathBuf::from(custom_dir)
    } else {
        dirs::home_dir()
            .ok_or_else(|| ConfigError::DataDir {
                message: "cannot determine home directory".to_string(),
            })?
            .join(DATA_DIR)
    };

    if !data_dir.exists() {
        fs::create_dir_all(&data_dir).map_err(|e| {
            ConfigError::DataDir {
                message: format!("failed to create {}: {}", data_dir.display(), e),
            }
        })?;
    }

    Ok(data_dir)
}

/// Load from `dir`; a missing file yields defaults.
pub fn load_config_from(dir: &Path) -> Result<AppConfig, ConfigError> {
    let config_path = dir.join(CONFIG_FILE);
    if !config_path.exists() {
        return Ok(AppConfig::new());
    }

    let content = fs::read_to_string(&config_path).map_err(|e| ConfigError::ParseError {
        message: format!("failed to read {}: {}", config_path.display(), e),
    })?;
    let config: AppConfig =
        serde_json::from_str(&content).map_err(|e| ConfigError::from_json_error(&e))?;
    config.validate_all()?;
    Ok(config)
}

/// Validate, then write atomically via a temp file.
pub fn save_config_to(dir: &Path, config: &AppConfig) -> Result<(), ConfigError> {
    config.validate_all()?;

    let config_path = dir.join(CONFIG_FILE);
    let temp_path = dir.join(format!("{}.tmp", CONFIG_FILE));

    let content =
        serde_json::to_string_pretty(config).map_err(|e| ConfigError::from_json_error(&e))?;

    fs::write(&temp_path, content).map_err(|e| ConfigError::from_io_error(&e))?;
    fs::rename(&temp_path, &config_path).map_err(|e| ConfigError::from_io_error(&e))
}

pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from(&get_data_dir()?)
}

pub fn save_config(config: &AppConfig) -> Result<(), ConfigError> {
    save_config_to(&get_data_dir()?, config)
}

/// Load, mutate, save. The closure may reject the change.
pub fn update_config<F>(updater: F) -> Result<AppConfig, ConfigError>
where
    F: FnOnce(&mut AppConfig) -> Result<(), ConfigError>,
{
    let dir = get_data_dir()?;
    let mut config = load_config_from(&dir)?;
    updater(&mut config)?;
    save_config_to(&dir, &config)?;
    Ok(config)
}

/// Load the stored config and layer process environment overrides on top.
pub fn load_effective_config() -> Result<AppConfig, ConfigError> {
    let mut config = load_config()?;
    apply_overrides(&mut config, |name| std::env::var(name).ok())?;
    Ok(config)
}

/// Apply `GEMINI_API_KEY`, `GEMINI_BASE_URL` and `MEDINSIGHT_PORT` from `lookup`.
pub fn apply_overrides<F>(config: &mut AppConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let non_blank = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

    if let Some(key) = non_blank(API_KEY_ENV) {
        config.gemini.api_key = key.trim().to_string();
    }
    if let Some(url) = non_blank(BASE_URL_ENV) {
        config.gemini.base_url = url.trim().to_string();
    }
    if let Some(port) = non_blank(PORT_ENV) {
        config.server.port = port
            .trim()
            .parse()
            .map_err(|_| ConfigError::invalid(PORT_ENV, format!("invalid port: {}", port)))?;
    }
    config.validate_all()
}

/// Read one dotted key as a string.
pub fn get_value(config: &AppConfig, key: &str) -> Result<String, ConfigError> {
    let value = match key {
        "gemini.api_key" => config.gemini.api_key.clone(),
        "gemini.base_url" => config.gemini.base_url.clone(),
        "invoker.max_retries" => config.invoker.max_retries.to_string(),
        "invoker.base_delay_ms" => config.invoker.base_delay_ms.to_string(),
        "server.port" => config.server.port.to_string(),
        "hospitals.region" => config.hospitals.region.clone(),
        "hospitals.directory" => config.hospitals.directory.clone(),
        _ => return Err(ConfigError::UnknownKey { key: key.to_string() }),
    };
    Ok(value)
}

/// Parse and assign one dotted key. `config` is left untouched on error.
pub fn set_value(config: &mut AppConfig, key: &str, value: &str) -> Result<(), ConfigError> {
    let parse_err = |what: &str| ConfigError::invalid(key, format!("invalid {}: {}", what, value));
    let mut updated = config.clone();

    match key {
        "gemini.api_key" => updated.gemini.api_key = value.trim().to_string(),
        "gemini.base_url" => updated.gemini.base_url = value.trim().to_string(),
        "invoker.max_retries" => {
            updated.invoker.max_retries = value.parse().map_err(|_| parse_err("integer"))?;
        },
        "invoker.base_delay_ms" => {
            updated.invoker.base_delay_ms = value.parse().map_err(|_| parse_err("integer"))?;
        },
        "server.port" => updated.server.port = value.parse().map_err(|_| parse_err("port"))?,
        "hospitals.region" => updated.hospitals.region = value.trim().to_string(),
        "hospitals.directory" => updated.hospitals.directory = value.to_string(),
        _ => return Err(ConfigError::UnknownKey { key: key.to_string() }),
    }

    updated.validate_all()?;
    *config = updated;
    Ok(())
}
