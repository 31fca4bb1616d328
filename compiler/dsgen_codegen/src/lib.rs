//! Java emission for the dataset function generator.
//!
//! # Architecture
//!
//! ```text
//! CodeBlock + KindFamily
//!        ↓
//!    Expansion     (one `case` branch per kind, loop nest per shape)
//!        ↓
//!    Transcoder    (statements re-typed for each element type)
//!        ↓
//!  OperationUnit   (overloads, prologue, branches, epilogue)
//!        ↓
//!     Printer      (tab-indented text)
//! ```

mod expansion;
mod node;
mod printer;
mod transcoder;
mod unit;

pub use expansion::expand_block;
pub use node::Node;
pub use printer::Printer;
pub use transcoder::{transcode, Pass, TranscoderContext};
pub use unit::{ordinal, OperationUnit};
