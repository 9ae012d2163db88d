//! Error types for the scoring engine

use thiserror::Error;

/// Result type alias using our custom Error
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the scoring engine
///
/// Scoring a snapshot never fails. Everything here is either a malformed
/// configuration (fatal at startup) or reading snapshot files.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Category maxima must sum to 100, got {total}")]
    InvalidCategoryMaxima { total: u64 },

    #[error("Category maximum for {category} must not exceed 100, got {points}")]
    InvalidCategoryMaximum { category: &'static str, points: u32 },

    #[error("Invalid tier thresholds: {0}")]
    InvalidTierThresholds(String),

    #[error("Invalid signal floor for tier {tier}: {floor} exceeds 100")]
    InvalidSignalFloor { tier: char, floor: u32 },

    #[error("Invalid volume surge tiers: {0}")]
    InvalidVolumeTiers(String),

    #[error("Deduction for {flag} must not be positive, got {points}")]
    InvalidDeduction { flag: &'static str, points: i32 },

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    // I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

impl Error {
    /// Check if this error comes from a malformed configuration
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Error::Config(_)
                | Error::InvalidCategoryMaxima { .. }
                | Error::InvalidCategoryMaximum { .. }
                | Error::InvalidTierThresholds(_)
                | Error::InvalidSignalFloor { .. }
                | Error::InvalidVolumeTiers(_)
                | Error::InvalidDeduction { .. }
        )
    }
}

// Conversion from serde_json errors
impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        if e.is_data() || e.is_syntax() || e.is_eof() {
            Error::Deserialization(e.to_string())
        } else {
            Error::Serialization(e.to_string())
        }
    }
}

// Conversion from I/O errors
impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_errors_classified() {
        assert!(Error::InvalidCategoryMaxima { total: 90 }.is_config_error());
        assert!(Error::InvalidTierThresholds("x".into()).is_config_error());
        assert!(!Error::Io("disk".into()).is_config_error());
    }

    #[test]
    fn test_json_syntax_error_is_deserialization() {
        let err: Error = serde_json::from_str::<u32>("{").unwrap_err().into();
        assert!(matches!(err, Error::Deserialization(_)));
    }
}
