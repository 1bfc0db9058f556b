//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If `BONUSPOOL_DB_PATH` is unset or a value is invalid, falls back to a
//!    config file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//! 5. Without any config file, built-in defaults apply
//!
//! ## Environment Variables
//! - `BONUSPOOL_DB_PATH`: Database file path (required for env loading)
//! - `BONUSPOOL_DB_POOL_SIZE`: Connection pool size
//! - `BONUSPOOL_FETCH_TIMEOUT_SECS`: Upper bound for each store call
//! - `BONUSPOOL_MAX_CONCURRENCY`: Employees computed at once in batch runs
//! - `BONUSPOOL_POOL_CACHE_TTL_SECS`: Monthly pool cache time-to-live
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./config.json` or `./config.toml` (current working directory)
//! 2. `./bonuspool.json` or `./bonuspool.toml` (current working directory)
//! 3. `../config.json` or `../config.toml` (parent directory)
//! 4. `../../config.json` or `../../config.toml` (grandparent directory)
//! 5. Relative to executable location

use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use bonuspool_domain::{BonusConfig, BonusPoolError, Config, DatabaseConfig, Result};

/// Load configuration with automatic fallback strategy
///
/// # Errors
/// Returns `BonusPoolError::Config` if a config file was found but could not
/// be read or parsed.
pub fn load() -> Result<Config> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            match probe_config_paths() {
                Some(path) => load_from_file(Some(path)),
                None => {
                    tracing::warn!("No config file found, using built-in defaults");
                    Ok(Config::default())
                }
            }
        }
    }
}

/// Load configuration from environment variables
///
/// `BONUSPOOL_DB_PATH` must be present; every other variable falls back to
/// its default when unset. Currency settings always use defaults.
///
/// # Errors
/// Returns `BonusPoolError::Config` if the database path is missing or a
/// numeric variable has an invalid value.
pub fn load_from_env() -> Result<Config> {
    let defaults = BonusConfig::default();

    let path = env_var("BONUSPOOL_DB_PATH")?;
    let pool_size = env_parse("BONUSPOOL_DB_POOL_SIZE", DatabaseConfig::default().pool_size)?;
    let fetch_timeout_seconds =
        env_parse("BONUSPOOL_FETCH_TIMEOUT_SECS", defaults.fetch_timeout_seconds)?;
    let max_concurrency = env_parse("BONUSPOOL_MAX_CONCURRENCY", defaults.max_concurrency)?;
    let pool_cache_ttl_seconds =
        env_parse("BONUSPOOL_POOL_CACHE_TTL_SECS", defaults.pool_cache_ttl_seconds)?;

    Ok(Config {
        database: DatabaseConfig { path, pool_size },
        bonus: BonusConfig {
            fetch_timeout_seconds,
            max_concurrency,
            pool_cache_ttl_seconds,
            ..defaults
        },
        ..Config::default()
    })
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `BonusPoolError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(BonusPoolError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            BonusPoolError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| BonusPoolError::Config(format!("Failed to read config file: {}", e)))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| BonusPoolError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| BonusPoolError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(BonusPoolError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// Probe multiple paths for configuration files
///
/// Searches for config files in the following locations (in order):
/// 1. Current working directory (`./config.{json,toml}`,
///    `./bonuspool.{json,toml}`)
/// 2. Parent directories (up to 2 levels)
/// 3. Relative to executable location
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(candidates_in(&cwd));
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(candidates_in(exe_dir));
        }
    }

    candidates.into_iter().find(|path| path.exists())
}

fn candidates_in(dir: &Path) -> Vec<PathBuf> {
    vec![
        dir.join("config.json"),
        dir.join("config.toml"),
        dir.join("bonuspool.json"),
        dir.join("bonuspool.toml"),
        dir.join("../config.json"),
        dir.join("../config.toml"),
        dir.join("../../config.json"),
        dir.join("../../config.toml"),
    ]
}

/// Get required environment variable
///
/// # Errors
/// Returns `BonusPoolError::Config` if the variable is not set.
fn env_var(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| {
        BonusPoolError::Config(format!("Missing required environment variable: {}", key))
    })
}

/// Parse an optional environment variable, using `default` when unset.
///
/// # Errors
/// Returns `BonusPoolError::Config` if the variable is set but does not parse.
fn env_parse<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| BonusPoolError::Config(format!("Invalid value for {key}: {e}"))),
        Err(_) => Ok(default),
    }
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
///
/// # Returns
/// The parsed boolean value, or `default` if not set.
pub fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}
