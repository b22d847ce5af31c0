//! Advisory generation hints forwarded to the external generator.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

/// Tempo range the hints are expected to fall in. Values outside it are
/// logged and passed through.
pub const TEMPO_RANGE: RangeInclusive<f64> = 40.0..=208.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    #[default]
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown difficulty '{0}' (expected beginner, intermediate or advanced)")]
pub struct UnknownDifficulty(pub String);

impl FromStr for Difficulty {
    type Err = UnknownDifficulty;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "beginner" => Ok(Difficulty::Beginner),
            "intermediate" => Ok(Difficulty::Intermediate),
            "advanced" => Ok(Difficulty::Advanced),
            _ => Err(UnknownDifficulty(s.to_string())),
        }
    }
}

/// Hints for the external generator. The fallback ignores them.
///
/// Deserialization never rejects a hint value: a missing, null or mistyped
/// field takes its default. Only a non-object fails.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawOptions")]
pub struct GenerationOptions {
    /// Musical key name, e.g. "C", "F#", "Bb minor"
    pub key: String,
    /// Beats per minute. Fractional and out-of-range values pass through.
    pub tempo: f64,
    /// Free-form style tag: traditional, modern, gospel, classical, ...
    pub style: String,
    pub difficulty: Difficulty,
}

impl GenerationOptions {
    pub fn tempo_in_range(&self) -> bool {
        TEMPO_RANGE.contains(&self.tempo)
    }
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            key: "C".to_string(),
            tempo: 120.0,
            style: "traditional".to_string(),
            difficulty: Difficulty::Intermediate,
        }
    }
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct RawOptions {
    #[serde(deserialize_with = "lenient")]
    key: Option<String>,
    #[serde(deserialize_with = "lenient_tempo")]
    tempo: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    style: Option<String>,
    #[serde(deserialize_with = "lenient")]
    difficulty: Option<String>,
}

impl From<RawOptions> for GenerationOptions {
    fn from(raw: RawOptions) -> Self {
        let defaults = GenerationOptions::default();
        let difficulty = match raw.difficulty {
            None => defaults.difficulty,
            Some(name) => name.parse().unwrap_or_else(|e: UnknownDifficulty| {
                tracing::warn!(error = %e, "Ignoring difficulty hint");
                defaults.difficulty
            }),
        };
        Self {
            key: raw.key.unwrap_or(defaults.key),
            tempo: raw.tempo.unwrap_or(defaults.tempo),
            style: raw.style.unwrap_or(defaults.style),
            difficulty,
        }
    }
}

/// `Some` when the value has the expected type, `None` for null or anything else.
pub(crate) fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    match serde_json::from_value(value.clone()) {
        Ok(parsed) => Ok(Some(parsed)),
        Err(e) => {
            tracing::warn!(value = %value, error = %e, "Ignoring mistyped hint");
            Ok(None)
        }
    }
}

/// Any JSON number, or a string holding one.
pub(crate) fn lenient_tempo<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let tempo = match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|t| t.is_finite()),
        Value::Null => None,
        other => {
            tracing::warn!(value = %other, "Ignoring mistyped tempo hint");
            None
        }
    };
    Ok(tempo)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = GenerationOptions::default();
        assert_eq!(options.key, "C");
        assert_eq!(options.tempo, 120.0);
        assert_eq!(options.style, "traditional");
        assert_eq!(options.difficulty, Difficulty::Intermediate);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let options: GenerationOptions =
            serde_json::from_str(r#"{"key": "G", "difficulty": "beginner"}"#).unwrap();
        assert_eq!(options.key, "G");
        assert_eq!(options.tempo, 120.0);
        assert_eq!(options.difficulty, Difficulty::Beginner);
    }

    #[test]
    fn test_hints_are_never_rejected() {
        let options: GenerationOptions = serde_json::from_str(
            r#"{"key": null, "tempo": 96.5, "style": 7, "difficulty": "Expert"}"#,
        )
        .unwrap();
        assert_eq!(options.key, "C");
        assert_eq!(options.tempo, 96.5);
        assert_eq!(options.style, "traditional");
        assert_eq!(options.difficulty, Difficulty::Intermediate);

        let wide: GenerationOptions =
            serde_json::from_str(r#"{"tempo": 100000, "difficulty": "ADVANCED"}"#).unwrap();
        assert_eq!(wide.tempo, 100000.0);
        assert!(!wide.tempo_in_range());
        assert_eq!(wide.difficulty, Difficulty::Advanced);

        let quoted: GenerationOptions = serde_json::from_str(r#"{"tempo": "84"}"#).unwrap();
        assert_eq!(quoted.tempo, 84.0);
    }

    #[test]
    fn test_tempo_range() {
        let mut options = GenerationOptions::default();
        assert!(options.tempo_in_range());
        options.tempo = 300.0;
        assert!(!options.tempo_in_range());
        options.tempo = -1.0;
        assert!(!options.tempo_in_range());
        options.tempo = 40.0;
        assert!(options.tempo_in_range());
    }

    #[test]
    fn test_difficulty_from_str() {
        assert_eq!("Advanced".parse::<Difficulty>().unwrap(), Difficulty::Advanced);
        assert!("expert".parse::<Difficulty>().is_err());
    }
}
