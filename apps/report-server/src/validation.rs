//! Submitted content checks

use thiserror::Error;

pub const MIN_CHARACTERS: usize = 200;
pub const MIN_WORDS: usize = 40;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Content is required")]
    Missing,

    #[error("Content length must have at least 200 characters")]
    TooShort,

    #[error("Content length must be at least 40 words")]
    TooFewWords,
}

/// Check that `content` is long enough to be worth sending for detection.
///
/// Rules apply in order and the first failure wins.
pub fn validate_content(content: &str) -> Result<(), ValidationError> {
    if content.is_empty() {
        return Err(ValidationError::Missing);
    }
    if content.chars().count() < MIN_CHARACTERS {
        return Err(ValidationError::TooShort);
    }
    if content.split_whitespace().count() < MIN_WORDS {
        return Err(ValidationError::TooFewWords);
    }
    Ok(())
}
