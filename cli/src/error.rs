#![deny(missing_docs)]

//! # CLI Errors
//!
//! Error types for the CLI crate.

use derive_more::{Display, From};
use disposegen_core::AppError;

/// Main error enum for CLI operations.
#[derive(Debug, Display, From)]
pub enum CliError {
    /// IO Error wrapper.
    #[display("IO Error: {}", _0)]
    Io(std::io::Error),

    /// Failure raised by the generator core.
    #[display("{}", _0)]
    Core(AppError),

    /// General failure message.
    #[display("Operation failed: {}", _0)]
    General(String),
}

impl std::error::Error for CliError {}

/// Result type alias.
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_error_passes_through() {
        let err: CliError = AppError::Manifest("bad yaml".into()).into();
        assert_eq!(format!("{}", err), "Manifest Error: bad yaml");
    }

    #[test]
    fn test_general_display() {
        let err: CliError = String::from("nothing found").into();
        assert_eq!(format!("{}", err), "Operation failed: nothing found");
    }
}
