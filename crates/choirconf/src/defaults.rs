//! Default generation hints - seed the options of every request that doesn't set them.

use serde::{Deserialize, Serialize};

/// Generation hints applied when a caller leaves them out.
///
/// Kept as plain strings and numbers so this crate doesn't depend on the
/// notation types; `solfa-cli` converts them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Musical key name.
    /// Default: C
    #[serde(default = "DefaultsConfig::default_key")]
    pub key: String,

    /// Beats per minute.
    /// Default: 120
    #[serde(default = "DefaultsConfig::default_tempo")]
    pub tempo: u16,

    /// Free-form style tag (traditional, modern, gospel, classical).
    /// Default: traditional
    #[serde(default = "DefaultsConfig::default_style")]
    pub style: String,

    /// beginner, intermediate or advanced.
    /// Default: intermediate
    #[serde(default = "DefaultsConfig::default_difficulty")]
    pub difficulty: String,
}

impl DefaultsConfig {
    fn default_key() -> String {
        "C".to_string()
    }

    fn default_tempo() -> u16 {
        120
    }

    fn default_style() -> String {
        "traditional".to_string()
    }

    fn default_difficulty() -> String {
        "intermediate".to_string()
    }
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            key: Self::default_key(),
            tempo: Self::default_tempo(),
            style: Self::default_style(),
            difficulty: Self::default_difficulty(),
        }
    }
}
