//! The generator's single error type.
//!
//! None of these are recovered locally. The driver propagates them with `?`
//! up to the CLI, which reports the error and exits without writing output.

use std::fmt;

use thiserror::Error;

use crate::ErrorCode;

/// Result type used across every generator phase.
pub type GenResult<T> = Result<T, GenError>;

/// What went wrong.
#[derive(Debug, Error)]
pub enum GenErrorKind {
    /// Header, doc line or block tag is structurally invalid.
    #[error("malformed specification: {reason}")]
    MalformedSpec { reason: String },

    /// More parameters than there are parameter letters.
    #[error("number of parameters ({count}) is greater than the supported 26")]
    ParameterCountExceeded { count: usize },

    /// A statement references a temporary that no prior assignment declared.
    #[error("cannot find declaration of temporary `{name}` in line: {statement}")]
    UnknownTemporary { name: String, statement: String },

    /// The driver state machine was asked for a transition it does not know.
    #[error("invalid driver transition from {state}: {detail}")]
    DriverInvariant { state: &'static str, detail: String },

    /// The host template ended before a required marker line.
    #[error("host template is missing the marker line `{marker}`")]
    MissingShellMarker { marker: String },

    /// An input file could not be read.
    #[error("cannot read `{path}`")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl GenErrorKind {
    /// The stable error code for this kind.
    pub fn code(&self) -> ErrorCode {
        match self {
            GenErrorKind::MalformedSpec { .. } => ErrorCode::E1001,
            GenErrorKind::ParameterCountExceeded { .. } => ErrorCode::E1002,
            GenErrorKind::UnknownTemporary { .. } => ErrorCode::E2001,
            GenErrorKind::MissingShellMarker { .. } => ErrorCode::E3001,
            GenErrorKind::Io { .. } => ErrorCode::E4001,
            GenErrorKind::DriverInvariant { .. } => ErrorCode::E9001,
        }
    }
}

/// A fatal generator error with optional spec line context.
#[derive(Debug)]
pub struct GenError {
    /// WHAT went wrong.
    pub kind: GenErrorKind,
    /// WHERE it went wrong (1-based line in the specification file).
    pub line: Option<u32>,
}

impl GenError {
    pub fn new(kind: GenErrorKind) -> Self {
        GenError { kind, line: None }
    }

    pub fn malformed_spec(reason: impl Into<String>) -> Self {
        Self::new(GenErrorKind::MalformedSpec {
            reason: reason.into(),
        })
    }

    pub fn parameter_count_exceeded(count: usize) -> Self {
        Self::new(GenErrorKind::ParameterCountExceeded { count })
    }

    pub fn unknown_temporary(name: impl Into<String>, statement: impl Into<String>) -> Self {
        Self::new(GenErrorKind::UnknownTemporary {
            name: name.into(),
            statement: statement.into(),
        })
    }

    pub fn driver_invariant(state: &'static str, detail: impl Into<String>) -> Self {
        Self::new(GenErrorKind::DriverInvariant {
            state,
            detail: detail.into(),
        })
    }

    pub fn missing_shell_marker(marker: impl Into<String>) -> Self {
        Self::new(GenErrorKind::MissingShellMarker {
            marker: marker.into(),
        })
    }

    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::new(GenErrorKind::Io {
            path: path.into(),
            source,
        })
    }

    /// Attach a spec line, keeping the innermost one if already set.
    #[must_use]
    pub fn at_line(mut self, line: u32) -> Self {
        self.line.get_or_insert(line);
        self
    }

    pub fn code(&self) -> ErrorCode {
        self.kind.code()
    }

    /// The error followed by its chain of causes, one per line.
    pub fn report(&self) -> String {
        let mut report = self.to_string();
        let mut cause = std::error::Error::source(self);
        while let Some(err) = cause {
            report.push_str(&format!("\n  caused by: {err}"));
            cause = err.source();
        }
        report
    }
}

impl fmt::Display for GenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error[{}]: {}", self.code(), self.kind)?;
        if let Some(line) = self.line {
            write!(f, " (line {line})")?;
        }
        Ok(())
    }
}

impl std::error::Error for GenError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(&self.kind)
    }
}
