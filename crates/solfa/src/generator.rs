//! The notation generator: external path first, deterministic fallback always.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use choirconf::ChoirConfig;
use serde_json::Value;

use crate::error::Result;
use crate::fallback::full_fallback;
use crate::notation::{tokenize, NotationResult};
use crate::options::GenerationOptions;
use crate::prompt::{system_prompt, user_prompt};
use crate::provider::{CompletionProvider, OpenAiProvider, ProviderError};
use crate::request::GenerateRequest;
use crate::tables::NotationTables;
use crate::validate::{check_external, ValidationFailure};
use crate::voice::VoicePart;

/// Default bound on the external call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Where a result came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotationSource {
    External,
    Fallback,
}

/// Why the fallback ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackReason {
    /// No completion provider is configured.
    Offline,
    /// No words or no requested parts; the external call can't add anything.
    NothingToGenerate,
    /// The provider failed: network, HTTP status, unparsable content.
    Service(String),
    /// The provider didn't answer within the configured timeout.
    Timeout(Duration),
    /// The provider answered with notation that broke a rule.
    Validation(ValidationFailure),
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FallbackReason::Offline => f.write_str("no completion backend configured"),
            FallbackReason::NothingToGenerate => f.write_str("nothing to generate"),
            FallbackReason::Service(message) => write!(f, "service unavailable: {message}"),
            FallbackReason::Timeout(after) => write!(f, "service timed out after {after:?}"),
            FallbackReason::Validation(failure) => write!(f, "validation failed: {failure}"),
        }
    }
}

/// Hints the external service echoed back alongside its notation.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct EchoedHints {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tempo: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
}

/// A generated result plus how it was produced.
#[derive(Debug, Clone, PartialEq)]
pub struct Generation {
    pub notation: NotationResult,
    pub source: NotationSource,
    /// Set exactly when `source` is `Fallback`.
    pub fallback_reason: Option<FallbackReason>,
    /// Set only for external results.
    pub echoed: Option<EchoedHints>,
}

/// Produces per-part solfa notation from lyrics.
///
/// Stateless apart from immutable tables and an optional provider handle, so
/// one generator can serve concurrent calls.
///
/// Cancellation: dropping the future returned by `generate` abandons any
/// in-flight request; no fallback result is produced for a dropped call.
pub struct NotationGenerator {
    tables: Arc<NotationTables>,
    provider: Option<Arc<dyn CompletionProvider>>,
    timeout: Duration,
    system_prompt: String,
}

impl NotationGenerator {
    /// Generator with an external provider and default tables.
    pub fn new(provider: Arc<dyn CompletionProvider>) -> Self {
        Self::build(Some(provider), NotationTables::default(), DEFAULT_TIMEOUT)
    }

    /// Fallback-only generator. Never touches the network.
    pub fn offline() -> Self {
        Self::build(None, NotationTables::default(), DEFAULT_TIMEOUT)
    }

    /// Build from loaded configuration. The OpenAI-compatible provider is
    /// attached only when `backend.enabled` is set.
    pub fn from_config(config: &ChoirConfig) -> std::result::Result<Self, ProviderError> {
        let timeout = config.generator.timeout();
        let provider: Option<Arc<dyn CompletionProvider>> = if config.backend.enabled {
            Some(Arc::new(OpenAiProvider::new(&config.backend, timeout)?))
        } else {
            None
        };
        Ok(Self::build(provider, NotationTables::default(), timeout))
    }

    fn build(
        provider: Option<Arc<dyn CompletionProvider>>,
        tables: NotationTables,
        timeout: Duration,
    ) -> Self {
        Self {
            system_prompt: system_prompt(tables.ranges()),
            tables: Arc::new(tables),
            provider,
            timeout,
        }
    }

    pub fn with_tables(self, tables: NotationTables) -> Self {
        Self::build(self.provider, tables, self.timeout)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn tables(&self) -> &NotationTables {
        &self.tables
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn is_offline(&self) -> bool {
        self.provider.is_none()
    }

    /// Notation for `lyrics`, keyed by exactly the requested parts.
    pub async fn generate(
        &self,
        lyrics: &str,
        requested: &[VoicePart],
        options: &GenerationOptions,
    ) -> NotationResult {
        self.generate_detailed(lyrics, requested, options).await.notation
    }

    /// Like `generate`, for an already-parsed request.
    pub async fn generate_request(&self, request: &GenerateRequest) -> NotationResult {
        self.generate(&request.lyrics, &request.voice_parts, &request.options)
            .await
    }

    /// Entry point for untyped JSON input. Shapes the typed API can't express
    /// (non-string lyrics, unknown voice parts) come back as `InvalidArgument`.
    pub async fn generate_json(&self, request: &Value) -> Result<NotationResult> {
        let request = GenerateRequest::from_json(request)?;
        Ok(self.generate_request(&request).await)
    }

    /// Notation plus its provenance.
    #[tracing::instrument(
        skip(self, lyrics, options),
        fields(
            notation.words = tracing::field::Empty,
            notation.source = tracing::field::Empty,
        )
    )]
    pub async fn generate_detailed(
        &self,
        lyrics: &str,
        requested: &[VoicePart],
        options: &GenerationOptions,
    ) -> Generation {
        let word_count = tokenize(lyrics).len();
        let requested: BTreeSet<VoicePart> = requested.iter().copied().collect();
        tracing::Span::current().record("notation.words", word_count);

        if !options.tempo_in_range() {
            tracing::warn!(tempo = options.tempo, "Tempo outside 40-208 BPM, passing it through");
        }

        let attempt = match &self.provider {
            None => Err(FallbackReason::Offline),
            Some(_) if word_count == 0 || requested.is_empty() => {
                Err(FallbackReason::NothingToGenerate)
            }
            Some(provider) => {
                self.external(provider.as_ref(), lyrics, word_count, options)
                    .await
            }
        };

        let generation = match attempt {
            Ok((notation, echoed)) => Generation {
                notation: notation.project(&requested),
                source: NotationSource::External,
                fallback_reason: None,
                echoed: Some(echoed),
            },
            Err(reason) => {
                match &reason {
                    FallbackReason::Offline | FallbackReason::NothingToGenerate => {
                        tracing::debug!(reason = %reason, "Using fallback notation");
                    }
                    FallbackReason::Validation(failure) => {
                        tracing::warn!(
                            rule = failure.rule(),
                            part = %failure.part(),
                            error = %failure,
                            "External notation rejected, using fallback"
                        );
                    }
                    FallbackReason::Service(_) | FallbackReason::Timeout(_) => {
                        tracing::warn!(reason = %reason, "External notation unavailable, using fallback");
                    }
                }
                Generation {
                    notation: full_fallback(word_count, &self.tables).project(&requested),
                    source: NotationSource::Fallback,
                    fallback_reason: Some(reason),
                    echoed: None,
                }
            }
        };

        tracing::Span::current().record("notation.source", tracing::field::debug(generation.source));
        generation
    }

    async fn external(
        &self,
        provider: &dyn CompletionProvider,
        lyrics: &str,
        word_count: usize,
        options: &GenerationOptions,
    ) -> std::result::Result<(NotationResult, EchoedHints), FallbackReason> {
        let user_prompt = user_prompt(lyrics, word_count, options);

        let external = match tokio::time::timeout(
            self.timeout,
            provider.complete(&self.system_prompt, &user_prompt, options),
        )
        .await
        {
            Err(_elapsed) => return Err(FallbackReason::Timeout(self.timeout)),
            Ok(Err(e)) => return Err(FallbackReason::Service(e.to_string())),
            Ok(Ok(external)) => external,
        };

        let notation = check_external(&external, word_count, self.tables.ranges())
            .map_err(FallbackReason::Validation)?;

        tracing::debug!(parts = notation.len(), "External notation accepted");

        Ok((
            notation,
            EchoedHints {
                key: external.key,
                tempo: external.tempo,
                style: external.style,
            },
        ))
    }
}

impl Default for NotationGenerator {
    fn default() -> Self {
        Self::offline()
    }
}

impl fmt::Debug for NotationGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotationGenerator")
            .field("tables", &self.tables)
            .field("offline", &self.provider.is_none())
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_default_config_is_offline() {
        let generator = NotationGenerator::from_config(&ChoirConfig::default()).unwrap();
        assert!(generator.is_offline());
        assert_eq!(generator.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_from_enabled_config_has_provider() {
        let mut config = ChoirConfig::default();
        config.backend.enabled = true;
        config.generator.timeout_ms = 250;

        let generator = NotationGenerator::from_config(&config).unwrap();
        assert!(!generator.is_offline());
        assert_eq!(generator.timeout(), Duration::from_millis(250));
    }

    #[test]
    fn test_fallback_reason_display() {
        assert_eq!(FallbackReason::Offline.to_string(), "no completion backend configured");
        assert_eq!(
            FallbackReason::Timeout(Duration::from_millis(1500)).to_string(),
            "service timed out after 1.5s"
        );
    }

    #[tokio::test]
    async fn test_offline_generation_records_reason() {
        let generation = NotationGenerator::offline()
            .generate_detailed("sing", &[VoicePart::Alto], &GenerationOptions::default())
            .await;

        assert_eq!(generation.source, NotationSource::Fallback);
        assert_eq!(generation.fallback_reason, Some(FallbackReason::Offline));
        assert!(generation.echoed.is_none());
    }
}
