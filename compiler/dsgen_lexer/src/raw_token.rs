//! Raw Token Definition
//!
//! The `RawToken` enum is the logos-derived tokenizer output before
//! identifiers are resolved against their call position.

use logos::Logos;

/// Raw token from logos.
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\r\n]+")]
pub(crate) enum RawToken {
    // `3`, `1.5e-3`, `.5`, `42L`, `0xffL`
    #[regex(r"([0-9]+(\.[0-9]*)?|\.[0-9]+)([eE][+-]?[0-9]+)?[a-zA-Z0-9]*")]
    Number,

    #[regex(r#""([^"\\\n\r]|\\.)*"|'([^'\\\n\r]|\\.)'"#)]
    Text,

    // `ix`, `Math.sin`, `tz.getReal`, `Long.MAX_VALUE`
    #[regex(r"[a-zA-Z_$][a-zA-Z0-9_$]*(\.[a-zA-Z_$][a-zA-Z0-9_$]*)*")]
    Path,

    // `.sin` after a closing paren
    #[regex(r"\.[a-zA-Z_$][a-zA-Z0-9_$]*")]
    Member,

    #[token("(")]
    LParen,

    #[regex(r"[-+*/%&|^~!<>=?:,;\[\]{})]")]
    Punct,
}
