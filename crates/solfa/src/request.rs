//! The JSON inbound contract: `{"lyrics", "voiceParts", "options"}`.
//!
//! Callers that hand over untyped JSON (a web route, a queue message) get
//! `InvalidArgument` for the shapes the generator can't accept, instead of a
//! serde error deep in some field.

use serde::Serialize;
use serde_json::Value;

use crate::error::{GenerateError, Result};
use crate::options::GenerationOptions;
use crate::voice::VoicePart;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub lyrics: String,
    pub voice_parts: Vec<VoicePart>,
    pub options: GenerationOptions,
}

impl GenerateRequest {
    pub fn new(lyrics: impl Into<String>, voice_parts: Vec<VoicePart>) -> Self {
        Self {
            lyrics: lyrics.into(),
            voice_parts,
            options: GenerationOptions::default(),
        }
    }

    pub fn with_options(mut self, options: GenerationOptions) -> Self {
        self.options = options;
        self
    }

    pub fn from_json(value: &Value) -> Result<Self> {
        let object = value
            .as_object()
            .ok_or_else(|| GenerateError::invalid(format!("request must be an object, got {}", kind(value))))?;

        let lyrics = match object.get("lyrics") {
            Some(Value::String(lyrics)) => lyrics.clone(),
            Some(other) => {
                return Err(GenerateError::invalid(format!(
                    "lyrics must be a string, got {}",
                    kind(other)
                )))
            }
            None => return Err(GenerateError::invalid("lyrics is required")),
        };

        let voice_parts = match object.get("voiceParts") {
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| match item {
                    Value::String(name) => name.parse::<VoicePart>().map_err(GenerateError::from),
                    other => Err(GenerateError::invalid(format!(
                        "voiceParts entries must be strings, got {}",
                        kind(other)
                    ))),
                })
                .collect::<Result<Vec<_>>>()?,
            Some(other) => {
                return Err(GenerateError::invalid(format!(
                    "voiceParts must be an array, got {}",
                    kind(other)
                )))
            }
            None => return Err(GenerateError::invalid("voiceParts is required")),
        };

        let options = match object.get("options") {
            None | Some(Value::Null) => GenerationOptions::default(),
            Some(raw) => serde_json::from_value(raw.clone())
                .map_err(|e| GenerateError::invalid(format!("options: {e}")))?,
        };

        Ok(Self {
            lyrics,
            voice_parts,
            options,
        })
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
