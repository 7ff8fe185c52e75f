//! # Error Handling
//!
//! Provides the unified `AppError` enum used across the workspace.

use derive_more::{Display, From};

/// The Global Error Enum.
///
/// Analysis itself never fails on a bad candidate (it is dropped instead),
/// so these variants only cover loading inputs, writing artifacts and
/// aborting a pass.
#[derive(Debug, Display, From)]
pub enum AppError {
    /// Wrapper for standard IO errors.
    #[display("IO Error: {_0}")]
    Io(std::io::Error),

    /// A type-universe manifest or configuration file could not be decoded.
    /// Ignored for `From<String>` so plain strings land in `General`.
    #[from(ignore)]
    #[display("Manifest Error: {_0}")]
    Manifest(String),

    /// The host cancelled the pass between two candidates.
    #[from(ignore)]
    #[display("Analysis pass cancelled")]
    Cancelled,

    /// Generic errors.
    #[display("General Error: {_0}")]
    General(String),
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for AppError {}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Manifest(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Manifest(err.to_string())
    }
}

/// Helper type alias for Result using AppError.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_io_conversion() {
        let io_err = Error::new(ErrorKind::Other, "test");
        let app_err: AppError = io_err.into();
        assert!(matches!(app_err, AppError::Io(_)));
    }

    #[test]
    fn test_string_conversion() {
        let msg = String::from("something wrong");
        let app_err: AppError = msg.into();
        match app_err {
            AppError::General(s) => assert_eq!(s, "something wrong"),
            _ => panic!("String should convert to AppError::General"),
        }
    }

    #[test]
    fn test_yaml_error_becomes_manifest() {
        let err = serde_yaml::from_str::<Vec<u32>>("{not: [a list").unwrap_err();
        let app_err: AppError = err.into();
        assert!(matches!(app_err, AppError::Manifest(_)));
        assert!(format!("{}", app_err).starts_with("Manifest Error: "));
    }

    #[test]
    fn test_cancelled_display() {
        assert_eq!(format!("{}", AppError::Cancelled), "Analysis pass cancelled");
    }
}
