//! Config file discovery, loading, and environment variable overlay.

use crate::{ChoirConfig, ConfigError};
use std::env;
use std::path::{Path, PathBuf};

/// Information about where config values came from.
#[derive(Debug, Clone, Default)]
pub struct ConfigSources {
    /// Config files that were loaded (in order)
    pub files: Vec<PathBuf>,
    /// Environment variables that overrode config values
    pub env_overrides: Vec<String>,
}

/// Discover config files in standard locations.
///
/// Returns paths in load order (system, user, local).
/// Only returns files that exist.
pub fn discover_config_files() -> Vec<PathBuf> {
    discover_config_files_with_override(None)
}

/// Discover config files, optionally with a CLI override path.
///
/// If `cli_path` is provided and exists, it replaces the local override.
pub fn discover_config_files_with_override(cli_path: Option<&Path>) -> Vec<PathBuf> {
    let mut files = Vec::new();

    let system = PathBuf::from("/etc/choir/config.toml");
    if system.exists() {
        files.push(system);
    }

    // XDG_CONFIG_HOME or ~/.config
    if let Some(config_dir) = directories::BaseDirs::new().map(|d| d.config_dir().to_path_buf()) {
        let user = config_dir.join("choir/config.toml");
        if user.exists() {
            files.push(user);
        }
    }

    if let Some(path) = cli_path {
        if path.exists() {
            files.push(path.to_path_buf());
            return files;
        }
    }

    let local = PathBuf::from("choir.toml");
    if local.exists() {
        files.push(local);
    }

    files
}

/// Read a TOML file into a raw table.
pub fn load_from_file(path: &Path) -> Result<toml::Table, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    parse_table(&contents, path)
}

pub(crate) fn parse_table(contents: &str, path: &Path) -> Result<toml::Table, ConfigError> {
    contents.parse().map_err(|e: toml::de::Error| ConfigError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Deserialize a (possibly merged) table; absent keys take their defaults.
pub(crate) fn from_table(table: toml::Table, path: &Path) -> Result<ChoirConfig, ConfigError> {
    toml::Value::Table(table)
        .try_into()
        .map_err(|e: toml::de::Error| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
}

/// Merge `overlay` into `base` key by key. Nested tables merge recursively;
/// any other value in `overlay` replaces the one in `base`.
pub fn merge_tables(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        let incoming = match value {
            toml::Value::Table(incoming) => incoming,
            other => {
                base.insert(key, other);
                continue;
            }
        };

        if let Some(toml::Value::Table(existing)) = base.get_mut(&key) {
            merge_tables(existing, incoming);
            continue;
        }
        base.insert(key, toml::Value::Table(incoming));
    }
}

/// Apply environment variable overrides to config.
pub fn apply_env_overrides(config: &mut ChoirConfig, sources: &mut ConfigSources) {
    apply_overrides_from(config, sources, |name| env::var(name).ok());
}

/// Apply overrides from any variable lookup. Unparseable numbers and
/// booleans are ignored rather than failing the whole load.
pub fn apply_overrides_from<F>(config: &mut ChoirConfig, sources: &mut ConfigSources, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    // Backend
    if let Some(v) = lookup("CHOIR_LLM_ENABLED") {
        if let Some(enabled) = parse_bool(&v) {
            config.backend.enabled = enabled;
            sources.env_overrides.push("CHOIR_LLM_ENABLED".to_string());
        }
    }
    if let Some(v) = lookup("CHOIR_LLM_URL") {
        config.backend.base_url = v;
        sources.env_overrides.push("CHOIR_LLM_URL".to_string());
    }
    if let Some(v) = lookup("CHOIR_LLM_API_KEY") {
        config.backend.api_key = if v.trim().is_empty() { None } else { Some(v) };
        sources.env_overrides.push("CHOIR_LLM_API_KEY".to_string());
    }
    if let Some(v) = lookup("CHOIR_LLM_MODEL") {
        config.backend.model = v;
        sources.env_overrides.push("CHOIR_LLM_MODEL".to_string());
    }

    // Generator
    if let Some(v) = lookup("CHOIR_TIMEOUT_MS") {
        if let Ok(ms) = v.parse() {
            config.generator.timeout_ms = ms;
            sources.env_overrides.push("CHOIR_TIMEOUT_MS".to_string());
        }
    }

    // Telemetry
    if let Some(v) = lookup("CHOIR_LOG_LEVEL") {
        config.telemetry.log_level = v;
        sources.env_overrides.push("CHOIR_LOG_LEVEL".to_string());
    }
    // Also support RUST_LOG
    if let Some(v) = lookup("RUST_LOG") {
        config.telemetry.log_level = v;
        sources.env_overrides.push("RUST_LOG".to_string());
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
