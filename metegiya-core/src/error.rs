//! Error types for the Metegiya core library.
//!
//! Everything user-recoverable stays out of this enum: a failed position
//! resolution is an expected outcome carried by
//! [`crate::location::LocationFailure`], and loading persisted preferences
//! is total (corrupt data degrades to an empty list). What remains here are
//! the genuinely fallible operations: writing to storage, serializing, and
//! rejecting invalid user input.

use thiserror::Error;

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in core operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Reading or writing the preference storage failed.
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// Serializing or deserializing persisted data failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A language code outside the supported set.
    #[error("Unknown locale: {0}")]
    UnknownLocale(String),

    /// A map pack name not present in the active catalog.
    #[error("Unknown map pack: {0}")]
    UnknownMapPack(String),

    /// A phone number that cannot be stored or dialed.
    #[error("Invalid phone number: {0}")]
    InvalidNumber(String),
}

impl Error {
    /// Short user-facing description without internal detail.
    pub fn user_message(&self) -> String {
        match self {
            Error::Storage(_) => "Could not access local storage".to_string(),
            Error::Serialization(_) => "Stored data could not be processed".to_string(),
            Error::UnknownLocale(code) => {
                format!("Unsupported language '{}' (expected am, om or ti)", code)
            }
            Error::UnknownMapPack(name) => format!("No map pack named '{}'", name),
            Error::InvalidNumber(number) => format!("'{}' is not a usable phone number", number),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::UnknownLocale("fr".to_string());
        assert_eq!(err.to_string(), "Unknown locale: fr");

        let err = Error::UnknownMapPack("Atlantis".to_string());
        assert_eq!(err.to_string(), "Unknown map pack: Atlantis");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Storage(_)));
        assert!(err.to_string().contains("denied"));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<Vec<String>>("not json").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Serialization(_)));
    }

    #[test]
    fn test_user_messages_hide_internals() {
        let io_err = std::io::Error::new(std::io::ErrorKind::Other, "/secret/path");
        let err: Error = io_err.into();
        assert!(!err.user_message().contains("/secret/path"));

        let err = Error::UnknownLocale("xx".to_string());
        assert!(err.user_message().contains("xx"));
        assert!(err.user_message().contains("am"));
    }
}
