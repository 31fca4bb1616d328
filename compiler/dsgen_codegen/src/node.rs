//! Structured emission nodes.
//!
//! Expansion builds a tree of these instead of writing text directly, so
//! nesting is expressed by structure and indentation is decided once by the
//! [`Printer`](crate::Printer).

/// One piece of emitted Java.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum Node {
    /// A single line at the current indentation.
    Line(String),
    /// An empty line, written without indentation.
    Blank,
    /// Children one level deeper than the current indentation.
    Nested(Vec<Node>),
    /// A brace-delimited construct with one or more arms.
    ///
    /// Each arm is a head line (`if (...) {`, `} else if (...) {`,
    /// `} else {`) followed by its indented body; `close` ends the chain.
    Block {
        arms: Vec<(String, Vec<Node>)>,
        close: String,
    },
}

impl Node {
    pub fn line(text: impl Into<String>) -> Self {
        Node::Line(text.into())
    }

    /// Single-armed block closed with `}`.
    pub fn block(head: impl Into<String>, body: Vec<Node>) -> Self {
        Node::Block {
            arms: vec![(head.into(), body)],
            close: "}".to_string(),
        }
    }

    /// Multi-armed `if`/`else` chain closed with `}`.
    pub fn chain(arms: Vec<(String, Vec<Node>)>) -> Self {
        Node::Block {
            arms,
            close: "}".to_string(),
        }
    }
}
