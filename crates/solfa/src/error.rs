use thiserror::Error;

use crate::options::UnknownDifficulty;
use crate::syllable::UnknownSyllable;
use crate::voice::UnknownVoicePart;

/// Errors surfaced to callers of the generator.
///
/// Service failures and validation failures never show up here: they are
/// absorbed by the fallback path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl GenerateError {
    pub fn invalid(message: impl Into<String>) -> Self {
        GenerateError::InvalidArgument(message.into())
    }
}

impl From<UnknownVoicePart> for GenerateError {
    fn from(err: UnknownVoicePart) -> Self {
        GenerateError::InvalidArgument(err.to_string())
    }
}

impl From<UnknownSyllable> for GenerateError {
    fn from(err: UnknownSyllable) -> Self {
        GenerateError::InvalidArgument(err.to_string())
    }
}

impl From<UnknownDifficulty> for GenerateError {
    fn from(err: UnknownDifficulty) -> Self {
        GenerateError::InvalidArgument(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, GenerateError>;
