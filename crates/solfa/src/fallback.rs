//! Deterministic offline notation.
//!
//! Each part walks the syllable cycle from its own phase offset: word `i` of
//! part `p` gets `CYCLE[(i + offset[p]) % 7]`. The default offsets
//! (0, 2, 4, 6) are pairwise distinct mod 7, so the parts never start in
//! unison. Pure: same word count and tables, same output.

use std::collections::BTreeSet;

use crate::notation::{tokenize, NotationResult};
use crate::syllable::Syllable;
use crate::tables::{NotationTables, CYCLE};
use crate::voice::VoicePart;

/// The syllable sequence for one part.
pub fn part_sequence(part: VoicePart, word_count: usize, tables: &NotationTables) -> Vec<Syllable> {
    let offset = tables.offset(part);
    (0..word_count)
        .map(|i| CYCLE[(i + offset) % CYCLE.len()])
        .collect()
}

/// All four parts.
pub fn full_fallback(word_count: usize, tables: &NotationTables) -> NotationResult {
    VoicePart::ALL
        .into_iter()
        .map(|part| (part, part_sequence(part, word_count, tables)))
        .collect()
}

/// Fallback notation for `lyrics`, projected to `requested`.
pub fn fallback_notation(
    lyrics: &str,
    requested: &BTreeSet<VoicePart>,
    tables: &NotationTables,
) -> NotationResult {
    full_fallback(tokenize(lyrics).len(), tables).project(requested)
}
