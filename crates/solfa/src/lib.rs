//! Lyrics to per-voice solfa notation.
//!
//! Given lyrics and a set of voice parts, the generator produces one solfa
//! syllable per word for each part. It first asks an external completion
//! service (any OpenAI-compatible chat endpoint) and validates the answer;
//! on any failure it uses a deterministic offline pattern instead, so callers
//! always get a well-formed result.
//!
//! # Example
//!
//! ```
//! use solfa::{GenerationOptions, NotationGenerator, Syllable, VoicePart};
//!
//! # tokio_test_block_on(async {
//! let generator = NotationGenerator::offline();
//! let notation = generator
//!     .generate(
//!         "Joyful praise we sing",
//!         &[VoicePart::Soprano, VoicePart::Bass],
//!         &GenerationOptions::default(),
//!     )
//!     .await;
//!
//! use Syllable::*;
//! assert_eq!(notation.get(VoicePart::Soprano), Some(&[Do, Re, Mi, Fa][..]));
//! assert_eq!(notation.get(VoicePart::Bass), Some(&[Ti, Do, Re, Mi][..]));
//! assert!(!notation.contains(VoicePart::Alto));
//! # });
//! # fn tokio_test_block_on<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(f)
//! # }
//! ```

pub mod error;
pub mod fallback;
pub mod generator;
pub mod notation;
pub mod options;
pub mod prompt;
pub mod provider;
pub mod request;
pub mod syllable;
pub mod tables;
pub mod validate;
pub mod voice;

pub use error::{GenerateError, Result};
pub use fallback::{fallback_notation, full_fallback, part_sequence};
pub use generator::{
    EchoedHints, FallbackReason, Generation, NotationGenerator, NotationSource, DEFAULT_TIMEOUT,
};
pub use notation::{tokenize, NotationResult};
pub use options::{Difficulty, GenerationOptions, TEMPO_RANGE};
pub use provider::{parse_completion, CompletionProvider, ExternalNotation, OpenAiProvider, ProviderError};
pub use request::GenerateRequest;
pub use syllable::Syllable;
pub use tables::{NotationTables, CYCLE};
pub use validate::{check_external, validate_syllable_set, validate_voice_range, ValidationFailure};
pub use voice::{DisplayColor, RangeTable, VoicePart, VoiceRange};
