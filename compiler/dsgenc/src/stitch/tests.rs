use dsgen_diagnostic::{ErrorCode, GenErrorKind};
use pretty_assertions::assert_eq;

use super::*;

const SHELL: &str = "\
/* header */
package org.eclipse.january.dataset.internal.template;

import java.util.List;
// start of imports that will be omitted in derived class
import org.eclipse.january.dataset.Dataset;
// end of imports that will be omitted in derived class

/**
 * Mathematics
 */
class MathsPreface {
\tprivate static int helper() {
\t\treturn 0;
\t}

// Start of generated code
\tstale();
// End of generated code

\tprivate static int tail() {
\t\treturn 1;
\t}
}
";

#[test]
fn stitches_stock_template() {
    let out = stitch(SHELL, "\tgenerated();\n", &ShellMarkers::default()).unwrap();
    let expected = "\
/* header */
package org.eclipse.january.dataset;

import java.util.List;
import org.apache.commons.math3.complex.Complex;

/**
 * Mathematics
 */
public class Maths {
\tprivate static int helper() {
\t\treturn 0;
\t}

// Start of generated code
\tgenerated();
// End of generated code

\tprivate static int tail() {
\t\treturn 1;
\t}
}
";
    assert_eq!(out, expected);
}

#[test]
fn missing_marker_is_reported() {
    let shell = "package org.eclipse.january.dataset.internal.template;\nclass MathsPreface {\n";
    let err = stitch(shell, "", &ShellMarkers::default()).unwrap_err();
    assert_eq!(err.code(), ErrorCode::E3001);
    match err.kind {
        GenErrorKind::MissingShellMarker { marker } => {
            assert_eq!(marker, "// start of imports that will be omitted in derived class");
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn missing_end_marker_is_reported() {
    let truncated = SHELL
        .split_once("// End of generated code")
        .map(|(head, _)| head)
        .unwrap();
    let err = stitch(truncated, "", &ShellMarkers::default()).unwrap_err();
    assert_eq!(err.code(), ErrorCode::E3001);
}

#[test]
fn custom_markers() {
    let markers = ShellMarkers {
        package_prefix: "package a;".to_string(),
        package_line: "package b;".to_string(),
        imports_start: "//<".to_string(),
        imports_replacement: "import c;".to_string(),
        imports_end: "//>".to_string(),
        class_prefix: "class T".to_string(),
        class_line: "public class U {".to_string(),
        generated_start: "//{".to_string(),
        generated_end: "//}".to_string(),
    };
    let shell = "package a;\n//<\nimport x;\n//>\nclass T {\n//{\n//}\n}\n";
    let out = stitch(shell, "body\n", &markers).unwrap();
    assert_eq!(
        out,
        "package b;\nimport c;\npublic class U {\n//{\nbody\n//}\n}\n"
    );
}
