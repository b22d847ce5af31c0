//! Notation rules applied to externally generated notation.
//!
//! The two boolean validators are total and pure. `check_external` runs them
//! (plus the word-count rule) over all four parts and names the first rule
//! that failed, so the generator can log it before falling back.

use crate::notation::NotationResult;
use crate::provider::ExternalNotation;
use crate::syllable::Syllable;
use crate::voice::{RangeTable, VoicePart, VoiceRange};

/// True iff every token, case-folded, is one of the seven syllables.
pub fn validate_syllable_set<S: AsRef<str>>(sequence: &[S]) -> bool {
    first_unknown(sequence).is_none()
}

/// True iff every syllable lies inside the bound configured for `part`.
pub fn validate_voice_range(sequence: &[Syllable], part: VoicePart, ranges: &RangeTable) -> bool {
    first_out_of_range(sequence, ranges.get(part)).is_none()
}

fn first_unknown<S: AsRef<str>>(sequence: &[S]) -> Option<(usize, &str)> {
    sequence
        .iter()
        .map(AsRef::<str>::as_ref)
        .enumerate()
        .find(|(_, token)| Syllable::parse(token).is_none())
}

fn first_out_of_range(sequence: &[Syllable], range: VoiceRange) -> Option<(usize, Syllable)> {
    sequence
        .iter()
        .copied()
        .enumerate()
        .find(|(_, syllable)| !range.contains(*syllable))
}

/// Which rule an external result broke.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationFailure {
    #[error("{part}: token '{token}' at position {position} is not a solfa syllable")]
    UnknownSyllable {
        part: VoicePart,
        position: usize,
        token: String,
    },

    #[error("{part}: '{syllable}' at position {position} is outside the {range} range")]
    OutOfRange {
        part: VoicePart,
        position: usize,
        syllable: Syllable,
        range: VoiceRange,
    },

    #[error("{part}: expected {expected} syllables (one per word), got {actual}")]
    WordCountMismatch {
        part: VoicePart,
        expected: usize,
        actual: usize,
    },
}

impl ValidationFailure {
    /// Short rule name for structured logs.
    pub fn rule(&self) -> &'static str {
        match self {
            ValidationFailure::UnknownSyllable { .. } => "syllable_set",
            ValidationFailure::OutOfRange { .. } => "voice_range",
            ValidationFailure::WordCountMismatch { .. } => "word_count",
        }
    }

    pub fn part(&self) -> VoicePart {
        match self {
            ValidationFailure::UnknownSyllable { part, .. }
            | ValidationFailure::OutOfRange { part, .. }
            | ValidationFailure::WordCountMismatch { part, .. } => *part,
        }
    }
}

/// Validate all four parts of an external result and normalize it.
///
/// All-or-nothing: the first broken rule in any part rejects the whole result.
pub fn check_external(
    external: &ExternalNotation,
    word_count: usize,
    ranges: &RangeTable,
) -> Result<NotationResult, ValidationFailure> {
    let mut notation = NotationResult::new();

    for (part, tokens) in external.sequences() {
        if let Some((position, token)) = first_unknown(tokens) {
            return Err(ValidationFailure::UnknownSyllable {
                part,
                position,
                token: token.to_string(),
            });
        }

        // Every token parsed above, so nothing is dropped here.
        let syllables: Vec<Syllable> = tokens.iter().filter_map(|t| Syllable::parse(t)).collect();

        let range = ranges.get(part);
        if let Some((position, syllable)) = first_out_of_range(&syllables, range) {
            return Err(ValidationFailure::OutOfRange {
                part,
                position,
                syllable,
                range,
            });
        }

        if syllables.len() != word_count {
            return Err(ValidationFailure::WordCountMismatch {
                part,
                expected: word_count,
                actual: syllables.len(),
            });
        }

        notation.insert(part, syllables);
    }

    Ok(notation)
}
