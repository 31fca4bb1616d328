//! Code block body lines.
//!
//! A body line is an assignment `ident = expression;`, an object
//! construction `ident = new Class(...)...;`, or anything else, which is
//! passed through verbatim.

use dsgen_diagnostic::{GenError, GenResult};
use dsgen_ir::Statement;

/// Marker separating the default complex statements from the override used
/// when the second operand is real.
pub(crate) const COMPLEX_B_REAL_MARKER: &str = "complex_b_real;";

pub(crate) fn parse_statement(line: &str) -> GenResult<Statement> {
    let text = line.trim();

    let Some((lhs, rhs)) = text.split_once(" = ") else {
        return Ok(Statement::Verbatim(text.to_string()));
    };
    let lhs = lhs.trim();
    if !is_identifier(lhs) {
        return Ok(Statement::Verbatim(text.to_string()));
    }

    if text.contains(" new") {
        let class = text
            .split_once(" new ")
            .and_then(|(_, rest)| rest.split_once('('))
            .map(|(class, _)| class.trim())
            .filter(|class| !class.is_empty())
            .ok_or_else(|| {
                GenError::malformed_spec(format!(
                    "cannot find class of new variable in line: {text}"
                ))
            })?;
        return Ok(Statement::Construct {
            lhs: lhs.to_string(),
            class: class.to_string(),
            line: text.to_string(),
        });
    }

    let rhs = rhs.trim();
    let rhs = rhs.strip_suffix(';').unwrap_or(rhs).trim_end();
    Ok(Statement::Assign {
        lhs: lhs.to_string(),
        rhs: rhs.to_string(),
    })
}

pub(crate) fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
