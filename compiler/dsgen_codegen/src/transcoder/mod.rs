//! Statement transcoder.
//!
//! Re-emits the micro-language statements of a code block for one concrete
//! element type and accumulator kind. Temporaries are declared up front with
//! the element type (or the constructed class), then each assignment's
//! right-hand side is wrapped in the conversion its target requires:
//!
//! | rhs        | declared type            | emitted                        |
//! |------------|--------------------------|--------------------------------|
//! | `0`        | any                      | `x = 0;`                       |
//! | expr       | accumulator primitive    | `x = conv(expr);`              |
//! | expr       | floating element         | `x = (expr);` or `x = (T) (expr);` |
//! | expr       | `long` element           | `x = conv(expr);`              |
//! | expr       | other integer element    | `x = (T) conv(expr);`          |
//!
//! `conv` is empty or `toLong` depending on the pass.

use dsgen_diagnostic::{GenError, GenResult};
use dsgen_ir::Statement;
use dsgen_lexer::{classify, IdentClass};
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::trace;

use crate::Node;

/// Declared temporaries for one emitted loop body.
///
/// Shared between a loop head and the per-lane inner loop that repeats the
/// same statements; otherwise fresh per loop. Grows monotonically: a
/// temporary's type never changes once declared.
pub struct TranscoderContext {
    declared: FxHashMap<String, String>,
    is_binary: bool,
}

impl TranscoderContext {
    pub fn new(is_binary: bool) -> Self {
        TranscoderContext {
            declared: FxHashMap::default(),
            is_binary,
        }
    }

    /// Type of a declared temporary.
    pub fn declared_type(&self, name: &str) -> Option<&str> {
        self.declared.get(name).map(String::as_str)
    }

    pub fn is_declared(&self, name: &str) -> bool {
        self.declared.contains_key(name)
    }

    fn declare(&mut self, name: &str, ty: &str) -> bool {
        if self.is_declared(name) {
            return false;
        }
        self.declared.insert(name.to_string(), ty.to_string());
        true
    }
}

/// Accumulator settings for one transcoding pass.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Pass<'a> {
    /// Primitive element type of the output buffer, e.g. `short` or `double`.
    pub element_type: &'a str,
    /// Accumulate in `long` rather than `double`.
    pub integer_arith: bool,
    /// Integer output computed through floating arithmetic.
    pub override_long: bool,
    /// Operands were read as `long`.
    pub use_long: bool,
}

impl<'a> Pass<'a> {
    /// Pass over operands read as `double`.
    pub fn floating(element_type: &'a str, override_long: bool) -> Self {
        Pass {
            element_type,
            integer_arith: false,
            override_long,
            use_long: false,
        }
    }

    /// Pass over operands read as `long`.
    pub fn long(element_type: &'a str, integer_arith: bool, override_long: bool) -> Self {
        Pass {
            element_type,
            integer_arith,
            override_long,
            use_long: true,
        }
    }

    fn is_real(&self) -> bool {
        (self.element_type == "float" && !self.integer_arith) || self.element_type == "double"
    }
}

/// Transcode `statements` for one pass, declaring new temporaries in `ctx`.
pub fn transcode(
    statements: &[Statement],
    pass: Pass<'_>,
    ctx: &mut TranscoderContext,
) -> GenResult<Vec<Node>> {
    let mut visible: FxHashSet<String> = ctx.declared.keys().cloned().collect();
    let mut lines = Vec::with_capacity(statements.len() * 2);

    for statement in statements {
        let Some(name) = statement.declared_name() else {
            continue;
        };
        let ty = match statement {
            Statement::Construct { class, .. } => class.as_str(),
            _ => pass.element_type,
        };
        if ctx.declare(name, ty) {
            lines.push(Node::line(format!("{ty} {name};")));
        }
    }

    let is_real = pass.is_real();
    let (accumulator, conversion) = if pass.integer_arith {
        let conversion = if ctx.is_binary && !pass.override_long {
            ""
        } else {
            "toLong"
        };
        ("long", conversion)
    } else {
        ("double", if is_real { "" } else { "toLong" })
    };

    for statement in statements {
        let text = match statement {
            Statement::Assign { lhs, rhs } => {
                visible.insert(lhs.clone());
                check_identifiers(lhs, rhs, &visible)?;
                let ty = ctx.declared_type(lhs).unwrap_or(pass.element_type);
                if rhs == "0" {
                    format!("{lhs} = 0;")
                } else if ty == accumulator {
                    format!("{lhs} = {conversion}({rhs});")
                } else if is_real {
                    if pass.use_long && !needs_cast(rhs, &visible) {
                        format!("{lhs} = ({rhs});")
                    } else {
                        format!("{lhs} = ({ty}) ({rhs});")
                    }
                } else if pass.element_type == "long" {
                    format!("{lhs} = {conversion}({rhs});")
                } else {
                    format!("{lhs} = ({ty}) {conversion}({rhs});")
                }
            }
            Statement::Construct { lhs, line, .. } => {
                visible.insert(lhs.clone());
                line.clone()
            }
            Statement::Verbatim(line) => line.clone(),
        };
        trace!(statement = %text, element = pass.element_type, "transcoded");
        lines.push(Node::Line(text));
    }

    Ok(lines)
}

/// Transcendental calls and parameter lanes keep their cast on `long` passes.
fn needs_cast(rhs: &str, visible: &FxHashSet<String>) -> bool {
    classify(rhs, |name| visible.contains(name))
        .iter()
        .any(|ident| ident.class == IdentClass::MathCall || ident.class.is_parameter())
}

fn check_identifiers(lhs: &str, rhs: &str, visible: &FxHashSet<String>) -> GenResult<()> {
    match classify(rhs, |name| visible.contains(name))
        .into_iter()
        .find(|ident| ident.class == IdentClass::Undeclared)
    {
        Some(ident) => Err(GenError::unknown_temporary(
            ident.text,
            format!("{lhs} = {rhs};"),
        )),
        None => Ok(()),
    }
}
