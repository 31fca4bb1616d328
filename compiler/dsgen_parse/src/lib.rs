//! Specification parser.
//!
//! Reads the line-oriented operation specification and yields one
//! [`OperationRecord`] at a time:
//!
//! ```text
//! biop: 2 u                      header
//!   add - a + b; @since 2.1      doc line
//! integer:                       block tag
//!   ox = iax + ibx;              statement
//! real:
//!   ox = iax + ibx;
//! ```
//!
//! A record's block list ends at a blank line, the next header, or end of
//! input. Parsing fails closed: the first malformed line aborts the stream.

mod header;
mod statement;

use std::iter::{Enumerate, Peekable};
use std::str::Lines;

use dsgen_diagnostic::{GenError, GenResult};
use dsgen_ir::{CodeBlock, KindTag, OperationRecord};
use tracing::debug;

use header::{is_header, parse_doc_line, parse_header};
use statement::{is_identifier, parse_statement, COMPLEX_B_REAL_MARKER};

/// Streaming parser over specification text.
pub struct SpecParser<'src> {
    lines: Peekable<Enumerate<Lines<'src>>>,
    failed: bool,
}

impl<'src> SpecParser<'src> {
    pub fn new(source: &'src str) -> Self {
        SpecParser {
            lines: source.lines().enumerate().peekable(),
            failed: false,
        }
    }

    /// Parse the next record, or `None` at end of input.
    pub fn next_record(&mut self) -> GenResult<Option<OperationRecord>> {
        let Some((line_no, header_line)) = self.next_non_blank() else {
            return Ok(None);
        };
        if !is_header(header_line) {
            return Err(GenError::malformed_spec(format!(
                "line is not a function definition: {}",
                header_line.trim()
            ))
            .at_line(line_no));
        }
        let header = parse_header(header_line).map_err(|e| e.at_line(line_no))?;

        let doc_line = match self.next_non_blank() {
            Some((doc_no, line)) if !is_header(line) => {
                parse_doc_line(line).map_err(|e| e.at_line(doc_no))?
            }
            _ => {
                return Err(
                    GenError::malformed_spec("header is not followed by a doc line")
                        .at_line(line_no),
                );
            }
        };

        let code_blocks = self.parse_blocks()?;

        let record = OperationRecord {
            name: doc_line.name,
            kind: header.kind,
            parameter_count: header.parameter_count,
            signedness: header.signedness,
            allow_ints: header.allow_ints,
            doc_summary: doc_line.summary,
            doc_extra_lines: doc_line.extra_lines,
            code_blocks,
            line: line_no,
        };
        debug!(
            name = %record.name,
            kind = ?record.kind,
            blocks = record.code_blocks.len(),
            "parsed operation record"
        );
        Ok(Some(record))
    }

    fn parse_blocks(&mut self) -> GenResult<Vec<CodeBlock>> {
        let mut blocks: Vec<CodeBlock> = Vec::new();

        while let Some(&(index, line)) = self.lines.peek() {
            if is_header(line) {
                break;
            }
            self.lines.next();
            let line_no = line_number(index);
            if line.trim().is_empty() {
                break;
            }

            if let Some((name, rest)) = tag_line(line) {
                let Some(tag) = KindTag::from_name(name) else {
                    return Err(GenError::malformed_spec(format!(
                        "unrecognized block tag `{name}:`"
                    ))
                    .at_line(line_no));
                };
                check_block_order(&blocks, tag).map_err(|e| e.at_line(line_no))?;
                let mut block = CodeBlock::new(tag, line_no);
                block.is_complex_real_only = tag == KindTag::Complex && rest.contains("real");
                blocks.push(block);
                continue;
            }

            let Some(block) = blocks.last_mut() else {
                return Err(GenError::malformed_spec(format!(
                    "statement outside of a code block: {}",
                    line.trim()
                ))
                .at_line(line_no));
            };

            if line.trim().starts_with(COMPLEX_B_REAL_MARKER) {
                if block.tag != KindTag::Complex || block.complex_b_real_override.is_some() {
                    return Err(GenError::malformed_spec(
                        "`complex_b_real;` may appear once, inside a `complex:` block",
                    )
                    .at_line(line_no));
                }
                block.complex_b_real_override = Some(Vec::new());
                continue;
            }

            let statement = parse_statement(line).map_err(|e| e.at_line(line_no))?;
            match block.complex_b_real_override.as_mut() {
                Some(overrides) => overrides.push(statement),
                None => block.statements.push(statement),
            }
        }

        for block in &mut blocks {
            if block
                .complex_b_real_override
                .as_ref()
                .is_some_and(Vec::is_empty)
            {
                block.complex_b_real_override = None;
            }
        }
        Ok(blocks)
    }

    fn next_non_blank(&mut self) -> Option<(u32, &'src str)> {
        self.lines
            .by_ref()
            .find(|(_, line)| !line.trim().is_empty())
            .map(|(index, line)| (line_number(index), line))
    }
}

impl Iterator for SpecParser<'_> {
    type Item = GenResult<OperationRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let next = self.next_record().transpose();
        if matches!(next, Some(Err(_))) {
            self.failed = true;
        }
        next
    }
}

/// Parse a whole specification.
pub fn parse_spec(source: &str) -> GenResult<Vec<OperationRecord>> {
    SpecParser::new(source).collect()
}

/// `name:` at the start of a line, with the text after the colon.
fn tag_line(line: &str) -> Option<(&str, &str)> {
    let (name, rest) = line.trim().split_once(':')?;
    is_identifier(name).then_some((name, rest))
}

fn check_block_order(blocks: &[CodeBlock], tag: KindTag) -> GenResult<()> {
    if blocks.iter().any(|block| block.tag == tag) {
        return Err(GenError::malformed_spec(format!(
            "duplicate `{}:` block",
            tag.as_str()
        )));
    }
    if tag.is_integer_family() {
        if blocks.iter().any(|block| block.tag.is_integer_family()) {
            return Err(GenError::malformed_spec(
                "`integer:` and `integer_with_reals:` cannot both be declared",
            ));
        }
        if blocks.iter().any(|block| block.tag == KindTag::Real) {
            return Err(GenError::malformed_spec(format!(
                "`{}:` must come before the `real:` block",
                tag.as_str()
            )));
        }
    }
    Ok(())
}

fn line_number(index: usize) -> u32 {
    u32::try_from(index + 1).unwrap_or(u32::MAX)
}
