//! Host template stitching.
//!
//! The host template is copied line by line. Marker lines, matched by
//! prefix, rewrite the package, replace the omitted-import block, rename the
//! class and receive the generated body between the generated-code markers.

use dsgen_diagnostic::{GenError, GenResult};

/// Marker prefixes and their replacements.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct ShellMarkers {
    pub package_prefix: String,
    pub package_line: String,
    /// First line of the import block dropped from the output.
    pub imports_start: String,
    /// Written in place of the dropped import block.
    pub imports_replacement: String,
    pub imports_end: String,
    pub class_prefix: String,
    pub class_line: String,
    /// Kept; the generated body follows it.
    pub generated_start: String,
    /// Kept; everything between the two generated-code markers is replaced.
    pub generated_end: String,
}

impl Default for ShellMarkers {
    fn default() -> Self {
        ShellMarkers {
            package_prefix: "package org.eclipse.january.dataset.internal.template;".to_string(),
            package_line: "package org.eclipse.january.dataset;".to_string(),
            imports_start: "// start of imports that will be omitted in derived class".to_string(),
            imports_replacement: "import org.apache.commons.math3.complex.Complex;".to_string(),
            imports_end: "// end of imports that will be omitted in derived class".to_string(),
            class_prefix: "class MathsPreface {".to_string(),
            class_line: "public class Maths {".to_string(),
            generated_start: "// Start of generated code".to_string(),
            generated_end: "// End of generated code".to_string(),
        }
    }
}

/// Splice `body` into `shell`.
pub fn stitch(shell: &str, body: &str, markers: &ShellMarkers) -> GenResult<String> {
    let mut lines = shell.split_inclusive('\n');
    let mut out = String::with_capacity(shell.len() + body.len());

    copy_until(&mut lines, Some(&mut out), &markers.package_prefix)?;
    push_line(&mut out, &markers.package_line);

    copy_until(&mut lines, Some(&mut out), &markers.imports_start)?;
    push_line(&mut out, &markers.imports_replacement);
    copy_until(&mut lines, None, &markers.imports_end)?;

    copy_until(&mut lines, Some(&mut out), &markers.class_prefix)?;
    push_line(&mut out, &markers.class_line);

    let start = copy_until(&mut lines, Some(&mut out), &markers.generated_start)?;
    out.push_str(start);
    out.push_str(body);

    let end = copy_until(&mut lines, None, &markers.generated_end)?;
    out.push_str(end);
    out.extend(lines);
    Ok(out)
}

/// Advance to the line starting with `prefix`, copying skipped lines into
/// `out` when given. Returns the marker line itself.
fn copy_until<'s>(
    lines: &mut impl Iterator<Item = &'s str>,
    mut out: Option<&mut String>,
    prefix: &str,
) -> GenResult<&'s str> {
    for line in lines {
        if line.starts_with(prefix) {
            return Ok(line);
        }
        if let Some(out) = out.as_mut() {
            out.push_str(line);
        }
    }
    Err(GenError::missing_shell_marker(prefix))
}

fn push_line(out: &mut String, line: &str) {
    out.push_str(line);
    out.push('\n');
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
