//! Intermediate representation for the dataset function generator.
//!
//! # Architecture
//!
//! ```text
//! spec text ──► OperationRecord ──► (per CodeBlock) ──► KindDescriptor × Statement
//! ```
//!
//! - [`OperationRecord`]: one `func:`/`biop:` declaration with its code blocks
//! - [`CodeBlock`]: statements for one kind tag (`integer:`, `real:` ...)
//! - [`Statement`]: one line of the arithmetic micro-language
//! - [`KindDescriptor`]: a concrete numeric storage kind, from the static catalog

mod kinds;
mod record;

pub use kinds::{KindDescriptor, KindFamily, MAX_PARAMETERS};
pub use record::{
    CodeBlock, KindTag, OperationFlags, OperationKind, OperationRecord, Signedness, Statement,
};
