//! Error reporting for the dataset function generator.
//!
//! Generation is all-or-nothing: every error aborts the run and no partial
//! output is written. Errors carry:
//! - an [`ErrorCode`] for searchability
//! - a [`GenErrorKind`] saying what went wrong
//! - the 1-based spec line where it went wrong, when one is known

mod error;
mod error_code;

pub use error::{GenError, GenErrorKind, GenResult};
pub use error_code::ErrorCode;
