//! Tokenizer for the arithmetic micro-language used in code blocks.
//!
//! Right-hand sides like `Math.sin(ix) * pax + 1.5` are split into lexemes
//! with logos, then every identifier is classified so the transcoder can
//! decide casts from token classes instead of string patterns.

mod classify;
mod raw_token;

use logos::Logos;

use raw_token::RawToken;

pub use classify::{classify, ClassifiedIdent, IdentClass};

/// Lexeme category.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum LexemeKind {
    Number,
    /// String or char literal.
    Text,
    /// Identifier or dotted path. `called` when directly followed by `(`.
    Ident { called: bool },
    /// `.member` following a non-identifier, e.g. `).sin`.
    Member,
    Punct,
    /// Byte sequence logos did not recognize.
    Unknown,
}

/// One lexeme borrowed from the expression text.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Lexeme<'src> {
    pub kind: LexemeKind,
    pub text: &'src str,
}

/// Split an expression into lexemes.
pub fn tokenize(expr: &str) -> Vec<Lexeme<'_>> {
    let mut lexemes: Vec<Lexeme<'_>> = Vec::new();
    let mut logos = RawToken::lexer(expr);

    while let Some(token_result) = logos.next() {
        let text = logos.slice();
        let kind = match token_result {
            Ok(RawToken::Number) => LexemeKind::Number,
            Ok(RawToken::Text) => LexemeKind::Text,
            Ok(RawToken::Path) => LexemeKind::Ident { called: false },
            Ok(RawToken::Member) => LexemeKind::Member,
            Ok(RawToken::LParen) => {
                if let Some(Lexeme {
                    kind: LexemeKind::Ident { called },
                    ..
                }) = lexemes.last_mut()
                {
                    *called = true;
                }
                LexemeKind::Punct
            }
            Ok(RawToken::Punct) => LexemeKind::Punct,
            Err(()) => LexemeKind::Unknown,
        };
        lexemes.push(Lexeme { kind, text });
    }

    lexemes
}
