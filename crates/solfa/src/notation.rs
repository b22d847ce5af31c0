//! Notation results and lyric tokenization.

use serde::{Deserialize, Serialize};
use std::collections::btree_map;
use std::collections::{BTreeMap, BTreeSet};

use crate::syllable::Syllable;
use crate::voice::VoicePart;

/// Split lyrics into words on runs of whitespace. Empty tokens never appear.
pub fn tokenize(lyrics: &str) -> Vec<&str> {
    lyrics.split_whitespace().collect()
}

/// Voice part to syllable sequence, one syllable per lyric word.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotationResult {
    parts: BTreeMap<VoicePart, Vec<Syllable>>,
}

impl NotationResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, part: VoicePart, syllables: Vec<Syllable>) {
        self.parts.insert(part, syllables);
    }

    pub fn get(&self, part: VoicePart) -> Option<&[Syllable]> {
        self.parts.get(&part).map(Vec::as_slice)
    }

    pub fn contains(&self, part: VoicePart) -> bool {
        self.parts.contains_key(&part)
    }

    pub fn parts(&self) -> impl Iterator<Item = VoicePart> + '_ {
        self.parts.keys().copied()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, VoicePart, Vec<Syllable>> {
        self.parts.iter()
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Keep exactly the parts in `requested`. Parts not already present are
    /// not invented; callers project from a full four-part result.
    pub fn project(mut self, requested: &BTreeSet<VoicePart>) -> Self {
        self.parts.retain(|part, _| requested.contains(part));
        self
    }

    /// Common sequence length, or `None` if the parts disagree.
    pub fn word_count(&self) -> Option<usize> {
        let mut lengths = self.parts.values().map(Vec::len);
        let first = lengths.next().unwrap_or(0);
        lengths.all(|len| len == first).then_some(first)
    }
}

impl<'a> IntoIterator for &'a NotationResult {
    type Item = (&'a VoicePart, &'a Vec<Syllable>);
    type IntoIter = btree_map::Iter<'a, VoicePart, Vec<Syllable>>;

    fn into_iter(self) -> Self::IntoIter {
        self.parts.iter()
    }
}

impl FromIterator<(VoicePart, Vec<Syllable>)> for NotationResult {
    fn from_iter<I: IntoIterator<Item = (VoicePart, Vec<Syllable>)>>(iter: I) -> Self {
        Self {
            parts: iter.into_iter().collect(),
        }
    }
}
