//! Backend configuration - where notation requests go and how long they may take.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// OpenAI-compatible completion backend used for the external notation path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Whether the external path is attempted at all.
    /// Default: false (fallback-only until a backend is configured)
    #[serde(default)]
    pub enabled: bool,

    /// Base URL for the OpenAI-compatible API, including the version prefix.
    /// Default: http://127.0.0.1:11434/v1 (local ollama)
    #[serde(default = "BackendConfig::default_base_url")]
    pub base_url: String,

    /// API key (optional for local models)
    #[serde(default)]
    pub api_key: Option<String>,

    /// Model name sent with every request.
    /// Default: llama3.1
    #[serde(default = "BackendConfig::default_model")]
    pub model: String,

    /// Sampling temperature.
    /// Default: 0.7
    #[serde(default = "BackendConfig::default_temperature")]
    pub temperature: f32,

    /// Maximum tokens for responses.
    /// Default: 2048
    #[serde(default = "BackendConfig::default_max_tokens")]
    pub max_tokens: u32,
}

impl BackendConfig {
    fn default_base_url() -> String {
        "http://127.0.0.1:11434/v1".to_string()
    }

    fn default_model() -> String {
        "llama3.1".to_string()
    }

    fn default_temperature() -> f32 {
        0.7
    }

    fn default_max_tokens() -> u32 {
        2048
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            base_url: Self::default_base_url(),
            api_key: None,
            model: Self::default_model(),
            temperature: Self::default_temperature(),
            max_tokens: Self::default_max_tokens(),
        }
    }
}

/// Generator behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// How long the external call may run before the fallback takes over.
    /// Default: 30000
    #[serde(default = "GeneratorConfig::default_timeout_ms")]
    pub timeout_ms: u64,
}

impl GeneratorConfig {
    fn default_timeout_ms() -> u64 {
        30_000
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            timeout_ms: Self::default_timeout_ms(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Log level or EnvFilter directive (trace, debug, info, warn, error).
    /// Default: info
    #[serde(default = "TelemetryConfig::default_log_level")]
    pub log_level: String,
}

impl TelemetryConfig {
    fn default_log_level() -> String {
        "info".to_string()
    }
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: Self::default_log_level(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_defaults() {
        let backend = BackendConfig::default();
        assert!(!backend.enabled);
        assert_eq!(backend.base_url, "http://127.0.0.1:11434/v1");
        assert!(backend.api_key.is_none());
        assert_eq!(backend.max_tokens, 2048);
    }

    #[test]
    fn test_generator_timeout() {
        let generator = GeneratorConfig { timeout_ms: 1500 };
        assert_eq!(generator.timeout(), Duration::from_millis(1500));
        assert_eq!(GeneratorConfig::default().timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_telemetry_defaults() {
        assert_eq!(TelemetryConfig::default().log_level, "info");
    }
}
