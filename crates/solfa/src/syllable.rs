//! The seven movable-do syllables.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// One solfa syllable. Ordering follows the scale, `Do` lowest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Syllable {
    Do,
    Re,
    Mi,
    Fa,
    Sol,
    La,
    Ti,
}

impl Syllable {
    /// Canonical ordering; position in this array is the syllable index.
    pub const ALL: [Syllable; 7] = [
        Syllable::Do,
        Syllable::Re,
        Syllable::Mi,
        Syllable::Fa,
        Syllable::Sol,
        Syllable::La,
        Syllable::Ti,
    ];

    /// Zero-based index in the canonical ordering.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Syllable at `index`, wrapping around the seven-step cycle.
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % Self::ALL.len()]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Syllable::Do => "do",
            Syllable::Re => "re",
            Syllable::Mi => "mi",
            Syllable::Fa => "fa",
            Syllable::Sol => "sol",
            Syllable::La => "la",
            Syllable::Ti => "ti",
        }
    }

    /// Case-insensitive lookup. Surrounding whitespace is not accepted.
    pub fn parse(token: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|s| s.as_str().eq_ignore_ascii_case(token))
    }
}

impl fmt::Display for Syllable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for tokens outside the seven syllables.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{0}' is not a solfa syllable (expected do, re, mi, fa, sol, la or ti)")]
pub struct UnknownSyllable(pub String);

impl FromStr for Syllable {
    type Err = UnknownSyllable;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| UnknownSyllable(s.to_string()))
    }
}

impl<'de> Deserialize<'de> for Syllable {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_matches_ordering() {
        for (i, s) in Syllable::ALL.iter().enumerate() {
            assert_eq!(s.index(), i);
            assert_eq!(Syllable::from_index(i), *s);
        }
    }

    #[test]
    fn test_from_index_wraps() {
        assert_eq!(Syllable::from_index(7), Syllable::Do);
        assert_eq!(Syllable::from_index(13), Syllable::Ti);
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(Syllable::parse("SOL"), Some(Syllable::Sol));
        assert_eq!(Syllable::parse("Ti"), Some(Syllable::Ti));
        assert_eq!(Syllable::parse("so"), None);
        assert_eq!(Syllable::parse(" do"), None);
        assert_eq!(Syllable::parse(""), None);
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&vec![Syllable::Do, Syllable::Sol]).unwrap();
        assert_eq!(json, r#"["do","sol"]"#);

        let parsed: Vec<Syllable> = serde_json::from_str(r#"["LA","Fa"]"#).unwrap();
        assert_eq!(parsed, vec![Syllable::La, Syllable::Fa]);

        assert!(serde_json::from_str::<Syllable>(r#""si""#).is_err());
    }
}
