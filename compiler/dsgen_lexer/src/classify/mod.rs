//! Identifier classification.
//!
//! Every identifier in a right-hand side falls into exactly one
//! [`IdentClass`]. The transcoder's cast rules and the undeclared-temporary
//! check are both total functions over these classes.

use crate::{tokenize, LexemeKind};

/// What an identifier in an expression refers to.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum IdentClass {
    /// Declared by an assignment earlier in the block.
    Temporary,
    /// Loop-provided operand lane: `ix`, `iy`, `iax`, `iay`, `ibx`, `iby`.
    InputLane,
    /// Real part of a scalar parameter: `pax`, `pbx`, ...
    ParamReal,
    /// Imaginary part of a scalar parameter: `pay`, `pby`, ...
    ParamImag,
    /// Member of a `*Math` class, e.g. `Math.sin` or `FastMath.log`.
    MathCall,
    /// Any other call or qualified constant, e.g. `toLong(...)`, `Long.MAX_VALUE`.
    ExternalCall,
    /// Local provided by the generated method, e.g. `unsignedMask`.
    Ambient,
    /// Language keyword or primitive type name.
    Keyword,
    /// Bare identifier that nothing declares.
    Undeclared,
}

impl IdentClass {
    /// Whether the identifier is derived from a scalar parameter.
    #[inline]
    pub fn is_parameter(self) -> bool {
        matches!(self, IdentClass::ParamReal | IdentClass::ParamImag)
    }
}

/// An identifier with its classification.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct ClassifiedIdent<'src> {
    pub text: &'src str,
    pub class: IdentClass,
}

const INPUT_LANES: &[&str] = &["ix", "iy", "iax", "iay", "ibx", "iby"];

const AMBIENT: &[&str] = &[
    "unsignedMask",
    "it",
    "da",
    "db",
    "result",
    "is",
    "as",
    "bs",
    "dt",
    "j",
];

const KEYWORDS: &[&str] = &[
    "true",
    "false",
    "null",
    "new",
    "instanceof",
    "this",
    "byte",
    "short",
    "int",
    "long",
    "float",
    "double",
    "boolean",
    "char",
];

/// Classify every identifier in `expr`.
///
/// `is_temporary` answers whether a bare name was declared by a prior
/// assignment in the current block.
pub fn classify<'src>(
    expr: &'src str,
    is_temporary: impl Fn(&str) -> bool,
) -> Vec<ClassifiedIdent<'src>> {
    tokenize(expr)
        .into_iter()
        .filter_map(|lexeme| match lexeme.kind {
            LexemeKind::Ident { called } => Some(ClassifiedIdent {
                text: lexeme.text,
                class: classify_one(lexeme.text, called, &is_temporary),
            }),
            _ => None,
        })
        .collect()
}

fn classify_one(text: &str, called: bool, is_temporary: &impl Fn(&str) -> bool) -> IdentClass {
    let (root, qualified) = match text.split_once('.') {
        Some((root, _)) => (root, true),
        None => (text, false),
    };

    if qualified && root.ends_with("Math") {
        return IdentClass::MathCall;
    }
    if is_temporary(root) {
        return IdentClass::Temporary;
    }
    if INPUT_LANES.contains(&root) {
        return IdentClass::InputLane;
    }
    if let Some(class) = parameter_part(root) {
        return class;
    }
    if AMBIENT.contains(&root) {
        return IdentClass::Ambient;
    }
    if KEYWORDS.contains(&root) {
        return IdentClass::Keyword;
    }
    if called || root.starts_with(|c: char| c.is_ascii_uppercase()) {
        return IdentClass::ExternalCall;
    }
    IdentClass::Undeclared
}

/// `p<letter>x` is a real part, `p<letter>y` an imaginary part.
fn parameter_part(name: &str) -> Option<IdentClass> {
    match name.as_bytes() {
        [b'p', letter, b'x'] if letter.is_ascii_lowercase() => Some(IdentClass::ParamReal),
        [b'p', letter, b'y'] if letter.is_ascii_lowercase() => Some(IdentClass::ParamImag),
        _ => None,
    }
}
