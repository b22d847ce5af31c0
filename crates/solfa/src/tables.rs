//! Immutable lookup tables shared by the generator, validators and prompts.

use crate::syllable::Syllable;
use crate::voice::{RangeTable, VoicePart};

/// The syllable cycle walked by the fallback generator.
pub const CYCLE: [Syllable; 7] = Syllable::ALL;

/// Everything the generator looks up: per-part phase offsets into the
/// syllable cycle and per-part range bounds.
///
/// Built once and shared (usually behind an `Arc`); nothing mutates it after
/// construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotationTables {
    offsets: [usize; 4],
    ranges: RangeTable,
}

impl NotationTables {
    pub fn new(offsets: [usize; 4], ranges: RangeTable) -> Self {
        Self { offsets, ranges }
    }

    pub fn with_ranges(mut self, ranges: RangeTable) -> Self {
        self.ranges = ranges;
        self
    }

    /// Phase offset into `CYCLE` for a part, indexed in `VoicePart::ALL` order.
    pub fn offset(&self, part: VoicePart) -> usize {
        self.offsets[part as usize]
    }

    pub fn ranges(&self) -> &RangeTable {
        &self.ranges
    }
}

impl Default for NotationTables {
    fn default() -> Self {
        Self {
            offsets: [0, 2, 4, 6],
            ranges: RangeTable::default(),
        }
    }
}
