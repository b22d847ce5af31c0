//! Completion backends for the external notation path.
//!
//! `CompletionProvider` is the seam: the generator only needs "send a system
//! and a user instruction, get four syllable arrays back". `OpenAiProvider`
//! binds it to any OpenAI-compatible chat completions endpoint; tests
//! substitute their own stubs.

use std::time::Duration;

use async_openai::config::OpenAIConfig;
use async_openai::error::OpenAIError;
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs, ResponseFormat,
};
use async_openai::Client;
use async_trait::async_trait;
use choirconf::BackendConfig;
use serde::{Deserialize, Serialize};

use crate::options::{lenient, lenient_tempo, GenerationOptions};
use crate::voice::VoicePart;

/// Raw notation as the service returned it: four string arrays, not yet
/// validated, plus whatever hints the service echoed back. Echoed hints that
/// don't parse are dropped; only the four arrays are required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalNotation {
    pub soprano: Vec<String>,
    pub alto: Vec<String>,
    pub tenor: Vec<String>,
    pub bass: Vec<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default, deserialize_with = "lenient_tempo", skip_serializing_if = "Option::is_none")]
    pub tempo: Option<f64>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
}

impl ExternalNotation {
    /// The four sequences in `VoicePart::ALL` order.
    pub fn sequences(&self) -> [(VoicePart, &[String]); 4] {
        [
            (VoicePart::Soprano, self.soprano.as_slice()),
            (VoicePart::Alto, self.alto.as_slice()),
            (VoicePart::Tenor, self.tenor.as_slice()),
            (VoicePart::Bass, self.bass.as_slice()),
        ]
    }
}

/// Why the external path produced nothing usable.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("completion request failed: {0}")]
    Request(#[from] OpenAIError),

    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("completion response had no content")]
    EmptyResponse,

    #[error("completion response is not notation JSON: {0}")]
    Malformed(String),

    #[error("{0}")]
    Other(String),
}

/// Anything that can turn the two instructions into external notation.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        options: &GenerationOptions,
    ) -> Result<ExternalNotation, ProviderError>;
}

/// Parse assistant content into notation. A surrounding markdown code fence
/// is tolerated since chat models add one even when asked for bare JSON.
pub fn parse_completion(content: &str) -> Result<ExternalNotation, ProviderError> {
    let body = strip_code_fence(content.trim());
    if body.is_empty() {
        return Err(ProviderError::EmptyResponse);
    }
    serde_json::from_str(body).map_err(|e| ProviderError::Malformed(e.to_string()))
}

fn strip_code_fence(content: &str) -> &str {
    let Some(rest) = content.strip_prefix("```") else {
        return content;
    };
    let rest = rest
        .strip_prefix("json")
        .or_else(|| rest.strip_prefix("JSON"))
        .unwrap_or(rest);
    rest.trim_end().strip_suffix("```").unwrap_or(rest).trim()
}

/// OpenAI-compatible chat completions backend.
pub struct OpenAiProvider {
    client: Client<OpenAIConfig>,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl OpenAiProvider {
    /// `timeout` bounds each HTTP request; the generator applies its own
    /// timeout around the whole call as well.
    pub fn new(config: &BackendConfig, timeout: Duration) -> Result<Self, ProviderError> {
        let mut openai = OpenAIConfig::new().with_api_base(config.base_url.trim_end_matches('/'));
        if let Some(key) = &config.api_key {
            openai = openai.with_api_key(key);
        }

        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client: Client::with_config(openai).with_http_client(http),
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl CompletionProvider for OpenAiProvider {
    #[tracing::instrument(
        skip(self, system_prompt, user_prompt, options),
        fields(
            llm.model = %self.model,
            notation.key = %options.key,
            notation.style = %options.style,
        )
    )]
    async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        options: &GenerationOptions,
    ) -> Result<ExternalNotation, ProviderError> {
        let messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(system_prompt)
                .build()?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(user_prompt)
                .build()?
                .into(),
        ];

        #[allow(deprecated)]
        let request = CreateChatCompletionRequestArgs::default()
            .model(self.model.as_str())
            .messages(messages)
            .temperature(self.temperature)
            .max_tokens(self.max_tokens)
            .response_format(ResponseFormat::JsonObject)
            .build()?;

        let response = self.client.chat().create(request).await?;

        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(ProviderError::EmptyResponse)?;

        tracing::debug!(bytes = content.len(), "Received completion");

        parse_completion(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FOUR_PARTS: &str =
        r#"{"soprano":["do"],"alto":["mi"],"tenor":["sol"],"bass":["do"],"key":"G","tempo":90}"#;

    #[test]
    fn test_parse_bare_json() {
        let notation = parse_completion(FOUR_PARTS).unwrap();
        assert_eq!(notation.soprano, vec!["do"]);
        assert_eq!(notation.key.as_deref(), Some("G"));
        assert_eq!(notation.tempo, Some(90.0));
        assert_eq!(notation.style, None);
    }

    #[test]
    fn test_parse_fenced_json() {
        let fenced = format!("```json\n{FOUR_PARTS}\n```");
        let notation = parse_completion(&fenced).unwrap();
        assert_eq!(notation.bass, vec!["do"]);

        let bare_fence = format!("```\n{FOUR_PARTS}\n```\n");
        assert!(parse_completion(&bare_fence).is_ok());
    }

    #[test]
    fn test_parse_tolerates_odd_echoed_hints() {
        let float = parse_completion(
            r#"{"soprano":["do"],"alto":["mi"],"tenor":["sol"],"bass":["do"],"tempo":120.0}"#,
        )
        .unwrap();
        assert_eq!(float.tempo, Some(120.0));

        let quoted = parse_completion(
            r#"{"soprano":["do"],"alto":["mi"],"tenor":["sol"],"bass":["do"],"tempo":"120"}"#,
        )
        .unwrap();
        assert_eq!(quoted.tempo, Some(120.0));

        let junk = parse_completion(
            r#"{"soprano":["do"],"alto":["mi"],"tenor":["sol"],"bass":["do"],
                "key":{"tonic":"G"},"tempo":[1],"style":null}"#,
        )
        .unwrap();
        assert_eq!(junk.key, None);
        assert_eq!(junk.tempo, None);
        assert_eq!(junk.style, None);
        assert_eq!(junk.bass, vec!["do"]);
    }

    #[test]
    fn test_parse_missing_part_is_malformed() {
        let err = parse_completion(r#"{"soprano":["do"],"alto":["mi"],"tenor":["sol"]}"#)
            .unwrap_err();
        assert!(matches!(err, ProviderError::Malformed(_)));
        assert!(err.to_string().contains("bass"));
    }

    #[test]
    fn test_parse_prose_is_malformed() {
        let err = parse_completion("Sure! Here is your notation: do re mi").unwrap_err();
        assert!(matches!(err, ProviderError::Malformed(_)));
    }

    #[test]
    fn test_parse_empty() {
        assert!(matches!(parse_completion("  \n"), Err(ProviderError::EmptyResponse)));
    }

    #[test]
    fn test_sequences_order() {
        let notation = parse_completion(FOUR_PARTS).unwrap();
        let parts: Vec<VoicePart> = notation.sequences().iter().map(|(p, _)| *p).collect();
        assert_eq!(parts, VoicePart::ALL.to_vec());
    }

    #[test]
    fn test_new_provider_from_config() {
        let config = BackendConfig {
            model: "tiny".to_string(),
            ..Default::default()
        };
        let provider = OpenAiProvider::new(&config, Duration::from_secs(1)).unwrap();
        assert_eq!(provider.model(), "tiny");
    }
}
