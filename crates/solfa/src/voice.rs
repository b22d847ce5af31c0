//! Voice parts and the syllable ranges they're allowed to sing.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::syllable::Syllable;

/// One of the four choral voice parts. Ordered high to low.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VoicePart {
    Soprano,
    Alto,
    Tenor,
    Bass,
}

impl VoicePart {
    pub const ALL: [VoicePart; 4] = [
        VoicePart::Soprano,
        VoicePart::Alto,
        VoicePart::Tenor,
        VoicePart::Bass,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            VoicePart::Soprano => "soprano",
            VoicePart::Alto => "alto",
            VoicePart::Tenor => "tenor",
            VoicePart::Bass => "bass",
        }
    }

    /// Display color used when rendering a part. Presentation only.
    pub fn color(self) -> DisplayColor {
        match self {
            VoicePart::Soprano => DisplayColor::new("#ec4899", (0xec, 0x48, 0x99)),
            VoicePart::Alto => DisplayColor::new("#8b5cf6", (0x8b, 0x5c, 0xf6)),
            VoicePart::Tenor => DisplayColor::new("#3b82f6", (0x3b, 0x82, 0xf6)),
            VoicePart::Bass => DisplayColor::new("#10b981", (0x10, 0xb9, 0x81)),
        }
    }
}

impl fmt::Display for VoicePart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A name that isn't soprano, alto, tenor or bass.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown voice part '{0}' (expected soprano, alto, tenor or bass)")]
pub struct UnknownVoicePart(pub String);

impl FromStr for VoicePart {
    type Err = UnknownVoicePart;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        VoicePart::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownVoicePart(s.to_string()))
    }
}

impl<'de> Deserialize<'de> for VoicePart {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// A hex string plus the same color as an RGB triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayColor {
    pub hex: &'static str,
    pub rgb: (u8, u8, u8),
}

impl DisplayColor {
    const fn new(hex: &'static str, rgb: (u8, u8, u8)) -> Self {
        Self { hex, rgb }
    }
}

/// Closed interval of syllable indices, `low..=high`.
///
/// Bounds given in descending order are swapped, so `alto` configured as
/// sol..mi means mi..=sol. There is no wrap-around.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoiceRange {
    low: Syllable,
    high: Syllable,
}

impl VoiceRange {
    pub fn new(a: Syllable, b: Syllable) -> Self {
        if a <= b {
            Self { low: a, high: b }
        } else {
            Self { low: b, high: a }
        }
    }

    pub fn low(&self) -> Syllable {
        self.low
    }

    pub fn high(&self) -> Syllable {
        self.high
    }

    pub fn contains(&self, syllable: Syllable) -> bool {
        (self.low.index()..=self.high.index()).contains(&syllable.index())
    }
}

impl fmt::Display for VoiceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.low, self.high)
    }
}

/// Per-part range bounds. Tunable so the validator never hardcodes them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeTable {
    ranges: [VoiceRange; 4],
}

impl RangeTable {
    pub fn get(&self, part: VoicePart) -> VoiceRange {
        self.ranges[Self::slot(part)]
    }

    /// Replace the bound for one part.
    pub fn with_range(mut self, part: VoicePart, range: VoiceRange) -> Self {
        self.ranges[Self::slot(part)] = range;
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (VoicePart, VoiceRange)> + '_ {
        VoicePart::ALL.into_iter().map(|p| (p, self.get(p)))
    }

    fn slot(part: VoicePart) -> usize {
        part as usize
    }
}

impl Default for RangeTable {
    fn default() -> Self {
        use Syllable::*;
        Self {
            ranges: [
                VoiceRange::new(Do, La),
                VoiceRange::new(Sol, Mi),
                VoiceRange::new(Do, Sol),
                VoiceRange::new(Mi, Do),
            ],
        }
    }
}
