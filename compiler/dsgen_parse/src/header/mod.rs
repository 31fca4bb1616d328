//! Header and doc line parsing.
//!
//! ```text
//! func: <n> [s|u ...]      unary function
//! biop: <n> [s|u ...]      binary operator
//! ifunc: / ibiop:          same, integer output permitted
//! name - summary[; extra[; extra...]]
//! ```

use dsgen_diagnostic::{GenError, GenResult};
use dsgen_ir::{OperationKind, Signedness, MAX_PARAMETERS};
use smallvec::SmallVec;

/// Parsed `func:`/`biop:` line.
#[derive(Clone, Eq, PartialEq, Debug)]
pub(crate) struct Header {
    pub kind: OperationKind,
    pub allow_ints: bool,
    pub parameter_count: usize,
    pub signedness: SmallVec<[Signedness; 4]>,
}

/// Parsed `name - summary; extra` line.
#[derive(Clone, Eq, PartialEq, Debug)]
pub(crate) struct DocLine {
    pub name: String,
    pub summary: String,
    pub extra_lines: Vec<String>,
}

/// Whether a line starts a new record.
pub(crate) fn is_header(line: &str) -> bool {
    line.contains("func:") || line.contains("biop:")
}

pub(crate) fn parse_header(line: &str) -> GenResult<Header> {
    let (kind, allow_ints, params) = if let Some((_, params)) = line.split_once("func:") {
        (OperationKind::Unary, line.contains("ifunc"), params)
    } else if let Some((_, params)) = line.split_once("biop:") {
        (OperationKind::Binary, line.contains("ibiop"), params)
    } else {
        return Err(GenError::malformed_spec(format!(
            "line is not a function definition: {}",
            line.trim()
        )));
    };

    let mut words = params.split_whitespace();
    let parameter_count = match words.next() {
        None => 0,
        Some(word) => word.parse::<usize>().map_err(|_| {
            GenError::malformed_spec(format!("invalid parameter count `{word}`"))
        })?,
    };
    if parameter_count > MAX_PARAMETERS {
        return Err(GenError::parameter_count_exceeded(parameter_count));
    }

    let signedness = words
        .map(|word| match word {
            "s" => Ok(Signedness::Signed),
            "u" => Ok(Signedness::Unsigned),
            other => Err(GenError::malformed_spec(format!(
                "signedness must be `s` or `u`, found `{other}`"
            ))),
        })
        .collect::<GenResult<SmallVec<[Signedness; 4]>>>()?;

    Ok(Header {
        kind,
        allow_ints,
        parameter_count,
        signedness,
    })
}

pub(crate) fn parse_doc_line(line: &str) -> GenResult<DocLine> {
    let Some((name, doc)) = line.split_once(" - ") else {
        return Err(GenError::malformed_spec(format!(
            "doc line has no ` - ` separator: {}",
            line.trim()
        )));
    };
    let name = name.trim();
    if name.is_empty() {
        return Err(GenError::malformed_spec("doc line has no operation name"));
    }

    let mut parts = doc.trim().split(';');
    let summary = parts.next().unwrap_or_default().trim().to_string();
    if summary.is_empty() {
        return Err(GenError::malformed_spec(format!(
            "doc line for `{name}` has an empty summary"
        )));
    }
    let extra_lines = parts.map(|part| part.trim().to_string()).collect();

    Ok(DocLine {
        name: name.to_string(),
        summary,
        extra_lines,
    })
}
