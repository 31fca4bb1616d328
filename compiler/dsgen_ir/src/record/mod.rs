//! Operation records parsed from the specification.
//!
//! A record is created when a `func:`/`biop:` header is read, is complete once
//! the next header (or end of input) is reached, and is consumed once by the
//! driver.

use bitflags::bitflags;
use smallvec::SmallVec;

use crate::KindFamily;

/// Whether an operation takes one operand or two.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum OperationKind {
    /// `func:`: one dataset operand.
    Unary,
    /// `biop:`: two dataset operands.
    Binary,
}

/// Declared signedness of a parameter.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum Signedness {
    #[default]
    Signed,
    Unsigned,
}

bitflags! {
    /// Per-operation switches that shape every emitted branch.
    ///
    /// Threaded explicitly through expansion; never global.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct OperationFlags: u8 {
        /// Two dataset operands (`biop`).
        const BINARY = 1 << 0;
        /// Integer-typed output permitted (`ifunc`/`ibiop`).
        const ALLOW_INTS = 1 << 1;
        /// Some parameter is unsigned, so branches declare `unsignedMask`.
        const UNSIGNED_MASK = 1 << 2;
    }
}

/// Tag introducing a code block.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum KindTag {
    Integer,
    IntegerWithReals,
    Real,
    Complex,
}

impl KindTag {
    pub const ALL: [KindTag; 4] = [
        KindTag::Integer,
        KindTag::IntegerWithReals,
        KindTag::Real,
        KindTag::Complex,
    ];

    /// Look up a tag by its spelling before the colon.
    pub fn from_name(name: &str) -> Option<Self> {
        KindTag::ALL.into_iter().find(|tag| tag.as_str() == name)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            KindTag::Integer => "integer",
            KindTag::IntegerWithReals => "integer_with_reals",
            KindTag::Real => "real",
            KindTag::Complex => "complex",
        }
    }

    #[inline]
    pub fn is_integer_family(self) -> bool {
        matches!(self, KindTag::Integer | KindTag::IntegerWithReals)
    }

    /// Families expanded for this tag, in emission order.
    ///
    /// `real` does not include the promoted integer families; the driver
    /// adds those when no integer block was declared.
    pub fn families(self) -> &'static [KindFamily] {
        match self {
            KindTag::Integer | KindTag::IntegerWithReals => {
                &[KindFamily::Integer, KindFamily::CompoundInteger]
            }
            KindTag::Real => &[KindFamily::Real, KindFamily::CompoundReal],
            KindTag::Complex => &[KindFamily::Complex],
        }
    }
}

/// One line of a code block.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum Statement {
    /// `lhs = rhs;`, with `rhs` is kept without its trailing semicolon.
    Assign { lhs: String, rhs: String },
    /// `lhs = new Class(...)...;` declares `lhs` as `Class`, emitted as written.
    Construct {
        lhs: String,
        class: String,
        line: String,
    },
    /// Any other line, passed through untouched.
    Verbatim(String),
}

impl Statement {
    /// The temporary this statement declares, if any.
    pub fn declared_name(&self) -> Option<&str> {
        match self {
            Statement::Assign { lhs, .. } | Statement::Construct { lhs, .. } => Some(lhs),
            Statement::Verbatim(_) => None,
        }
    }
}

/// Statements for one kind tag.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct CodeBlock {
    pub tag: KindTag,
    pub statements: Vec<Statement>,
    /// `complex: real`: only the real output lane is written.
    pub is_complex_real_only: bool,
    /// Statements after `complex_b_real;`, used when the second operand is real.
    pub complex_b_real_override: Option<Vec<Statement>>,
    /// 1-based line of the tag.
    pub line: u32,
}

impl CodeBlock {
    pub fn new(tag: KindTag, line: u32) -> Self {
        CodeBlock {
            tag,
            statements: Vec::new(),
            is_complex_real_only: false,
            complex_b_real_override: None,
            line,
        }
    }
}

/// One declared operation.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct OperationRecord {
    pub name: String,
    pub kind: OperationKind,
    /// Number of scalar parameters (`pa`, `pb`, ...), at most 26.
    pub parameter_count: usize,
    pub signedness: SmallVec<[Signedness; 4]>,
    /// Declared with `ifunc`/`ibiop`.
    pub allow_ints: bool,
    /// Doc text before the first `;`.
    pub doc_summary: String,
    /// Doc fragments after each `;`, trimmed.
    pub doc_extra_lines: Vec<String>,
    pub code_blocks: Vec<CodeBlock>,
    /// 1-based line of the header.
    pub line: u32,
}

impl OperationRecord {
    #[inline]
    pub fn is_binary(&self) -> bool {
        self.kind == OperationKind::Binary
    }

    pub fn requires_unsigned_mask(&self) -> bool {
        self.signedness.contains(&Signedness::Unsigned)
    }

    pub fn flags(&self) -> OperationFlags {
        let mut flags = OperationFlags::empty();
        flags.set(OperationFlags::BINARY, self.is_binary());
        flags.set(OperationFlags::ALLOW_INTS, self.allow_ints);
        flags.set(OperationFlags::UNSIGNED_MASK, self.requires_unsigned_mask());
        flags
    }

    /// Parameter names `pa`, `pb`, ... in declaration order.
    pub fn parameter_names(&self) -> Vec<String> {
        (b'a'..=b'z')
            .take(self.parameter_count)
            .map(|letter| format!("p{}", char::from(letter)))
            .collect()
    }

    /// Summary as it appears in doc comments.
    ///
    /// A summary with exactly one comma is an expression followed by prose,
    /// e.g. `a + b, addition of a and b`; the expression part is wrapped in
    /// `{@code ...}`. Any other comma count is kept verbatim.
    pub fn doc_headline(&self) -> String {
        let parts: Vec<&str> = self.doc_summary.split(',').collect();
        match parts.as_slice() {
            [expr, prose] => format!("{{@code {expr}}},{prose}"),
            _ => self.doc_summary.clone(),
        }
    }

    /// Operator symbol for binary operations: the second word of the summary.
    pub fn operator_symbol(&self) -> Option<&str> {
        self.doc_summary.split_whitespace().nth(1)
    }
}

#[cfg(test)]
mod tests;
