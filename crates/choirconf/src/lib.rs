//! Configuration loading for the choir notation tools.
//!
//! Everything here is plain data: where the completion backend lives, how
//! long the generator waits for it, which generation hints apply when a
//! request omits them, and how loud the logs are.
//!
//! # Config File Locations
//!
//! Files are loaded in order (later wins, key by key):
//! 1. `/etc/choir/config.toml` (system)
//! 2. `~/.config/choir/config.toml` (user)
//! 3. `./choir.toml` (local override) or the path passed with `--config`
//! 4. Environment variables (`CHOIR_*`, `RUST_LOG`)
//!
//! # Example Config
//!
//! ```toml
//! [backend]
//! enabled = true
//! base_url = "https://api.openai.com/v1"
//! model = "gpt-4o-mini"
//!
//! [generator]
//! timeout_ms = 15000
//!
//! [defaults]
//! key = "G"
//! tempo = 96
//! style = "gospel"
//! difficulty = "beginner"
//!
//! [telemetry]
//! log_level = "debug"
//! ```

pub mod backend;
pub mod defaults;
pub mod loader;

pub use backend::{BackendConfig, GeneratorConfig, TelemetryConfig};
pub use defaults::DefaultsConfig;
pub use loader::{discover_config_files_with_override, ConfigSources};

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {message}")]
    Parse { path: PathBuf, message: String },
}

/// Complete configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ChoirConfig {
    #[serde(default)]
    pub backend: BackendConfig,

    #[serde(default)]
    pub generator: GeneratorConfig,

    #[serde(default)]
    pub defaults: DefaultsConfig,

    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl ChoirConfig {
    /// Load configuration from all sources.
    pub fn load() -> Result<Self, ConfigError> {
        let (config, _sources) = Self::load_with_sources_from(None)?;
        Ok(config)
    }

    /// Load configuration, letting `config_path` replace `./choir.toml`.
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let (config, _sources) = Self::load_with_sources_from(config_path)?;
        Ok(config)
    }

    /// Load configuration and report which files and env vars contributed.
    pub fn load_with_sources_from(
        config_path: Option<&Path>,
    ) -> Result<(Self, ConfigSources), ConfigError> {
        let mut sources = ConfigSources::default();
        let mut merged = toml::Table::new();

        for path in loader::discover_config_files_with_override(config_path) {
            let table = loader::load_from_file(&path)?;
            loader::merge_tables(&mut merged, table);
            sources.files.push(path);
        }

        let mut config = loader::from_table(merged, Path::new("<merged>"))?;
        loader::apply_env_overrides(&mut config, &mut sources);

        Ok((config, sources))
    }

    /// Parse a single TOML document; missing keys take their defaults.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let path = Path::new("<string>");
        let table = loader::parse_table(contents, path)?;
        loader::from_table(table, path)
    }

    /// Serialize config to TOML string. The API key is never printed.
    pub fn to_toml(&self) -> String {
        let mut output = String::new();

        output.push_str("# Choir notation configuration\n\n");

        output.push_str("[backend]\n");
        output.push_str(&format!("enabled = {}\n", self.backend.enabled));
        output.push_str(&format!("base_url = {}\n", quoted(&self.backend.base_url)));
        if self.backend.api_key.is_some() {
            output.push_str("api_key = \"<redacted>\"\n");
        }
        output.push_str(&format!("model = {}\n", quoted(&self.backend.model)));
        output.push_str(&format!("temperature = {:?}\n", self.backend.temperature));
        output.push_str(&format!("max_tokens = {}\n", self.backend.max_tokens));

        output.push_str("\n[generator]\n");
        output.push_str(&format!("timeout_ms = {}\n", self.generator.timeout_ms));

        output.push_str("\n[defaults]\n");
        output.push_str(&format!("key = {}\n", quoted(&self.defaults.key)));
        output.push_str(&format!("tempo = {}\n", self.defaults.tempo));
        output.push_str(&format!("style = {}\n", quoted(&self.defaults.style)));
        output.push_str(&format!("difficulty = {}\n", quoted(&self.defaults.difficulty)));

        output.push_str("\n[telemetry]\n");
        output.push_str(&format!("log_level = {}\n", quoted(&self.telemetry.log_level)));

        output
    }
}

/// A TOML basic or literal string, escaped as needed.
fn quoted(value: &str) -> String {
    toml::Value::String(value.to_string()).to_string()
}
