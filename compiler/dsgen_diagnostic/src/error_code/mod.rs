//! Error codes for all generator diagnostics.
//!
//! Format: E#### where the first digit indicates the phase:
//! - E1xxx: Specification parse errors
//! - E2xxx: Transcoding errors
//! - E3xxx: Host template errors
//! - E4xxx: I/O errors
//! - E9xxx: Internal generator errors

use std::fmt;

/// Error codes for all generator diagnostics.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Specification Errors (E1xxx)
    /// Malformed header, doc line or block tag
    E1001,
    /// More than 26 parameters declared
    E1002,

    // Transcoding Errors (E2xxx)
    /// Expression references an undeclared temporary
    E2001,

    // Host Template Errors (E3xxx)
    /// Host template is missing a required marker line
    E3001,

    // I/O Errors (E4xxx)
    /// Input file could not be read
    E4001,

    // Internal Errors (E9xxx)
    /// Driver reached an unrecognized state transition
    E9001,
}

impl ErrorCode {
    /// Every error code, in numeric order.
    pub const ALL: &[ErrorCode] = &[
        ErrorCode::E1001,
        ErrorCode::E1002,
        ErrorCode::E2001,
        ErrorCode::E3001,
        ErrorCode::E4001,
        ErrorCode::E9001,
    ];

    /// Get the string representation of this error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E2001 => "E2001",
            ErrorCode::E3001 => "E3001",
            ErrorCode::E4001 => "E4001",
            ErrorCode::E9001 => "E9001",
        }
    }

    /// Check if this is a specification (user input) error.
    pub fn is_spec_error(&self) -> bool {
        matches!(self, ErrorCode::E1001 | ErrorCode::E1002)
    }

    /// Check if this is an internal defect rather than bad input.
    pub fn is_internal_error(&self) -> bool {
        matches!(self, ErrorCode::E9001)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parse an error code string like `"E1001"`. Case-insensitive.
impl std::str::FromStr for ErrorCode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ErrorCode::ALL
            .iter()
            .copied()
            .find(|code| code.as_str().eq_ignore_ascii_case(s))
            .ok_or(())
    }
}
