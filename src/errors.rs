//! Error types for loading crossword inputs, with error codes and helpful messages.
//!
//! # Error Codes
//!
//! Each error variant has a unique code for documentation lookup:
//!
//! - G001: `Io` (Reading a structure or word-list file failed)
//! - G002: `EmptyStructure` (Structure input contains no grid cells)
//!
//! The solver itself never produces a `GridError`: an unsatisfiable puzzle is
//! reported as an explicit absence value (`None`), not as an error.

use std::io;

/// Custom error type for loading and parsing crossword inputs.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Structure input contains no grid cells")]
    EmptyStructure,
}

impl GridError {
    /// Returns the error code for this error variant.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            GridError::Io(_) => "G001",
            GridError::EmptyStructure => "G002",
        }
    }

    /// Returns a short description of this error type (for documentation).
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            GridError::Io(_) => "Reading a structure or word-list file failed",
            GridError::EmptyStructure => "Structure input contains no grid cells",
        }
    }

    /// Returns a helpful suggestion for this error, if one exists.
    #[must_use]
    pub fn help(&self) -> Option<&'static str> {
        match self {
            GridError::Io(_) => Some("Check that the file exists and is readable"),
            GridError::EmptyStructure => {
                Some("The structure file must contain at least one row; use '_' for open cells")
            }
        }
    }

    /// Formats the error with its code and optional help text.
    #[must_use]
    pub fn display_detailed(&self) -> String {
        format_error_with_code_and_help(&self.to_string(), self.code(), self.help())
    }
}

/// Shared formatter: `"[CODE] message"` plus an optional indented help line.
pub(crate) fn format_error_with_code_and_help(
    message: &str,
    code: &str,
    help: Option<&str>,
) -> String {
    match help {
        Some(help_text) => format!("[{code}] {message}\n  help: {help_text}"),
        None => format!("[{code}] {message}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_are_stable() {
        let io_err = GridError::Io(io::Error::new(io::ErrorKind::NotFound, "missing"));
        assert_eq!(io_err.code(), "G001");
        assert_eq!(GridError::EmptyStructure.code(), "G002");
    }

    #[test]
    fn test_display_detailed_includes_code_and_help() {
        let detailed = GridError::EmptyStructure.display_detailed();
        assert!(detailed.contains("G002"));
        assert!(detailed.contains("help:"));
    }

    #[test]
    fn test_io_error_conversion() {
        fn read_missing() -> Result<String, GridError> {
            Ok(std::fs::read_to_string("/nonexistent/gridfill-test")?)
        }
        let err = read_missing().unwrap_err();
        assert!(matches!(err, GridError::Io(_)));
    }
}
