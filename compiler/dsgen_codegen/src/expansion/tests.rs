use dsgen_diagnostic::ErrorCode;
use dsgen_ir::{CodeBlock, KindFamily, KindTag, OperationFlags, Statement};
use pretty_assertions::assert_eq;

use super::*;
use crate::Printer;

fn assign(lhs: &str, rhs: &str) -> Statement {
    Statement::Assign {
        lhs: lhs.to_string(),
        rhs: rhs.to_string(),
    }
}

fn block(tag: KindTag, statements: Vec<Statement>) -> CodeBlock {
    let mut block = CodeBlock::new(tag, 1);
    block.statements = statements;
    block
}

fn render(nodes: &[Node]) -> String {
    let mut printer = Printer::with_indent(2);
    printer.print_all(nodes);
    printer.take_output()
}

fn expand(block: &CodeBlock, family: KindFamily, flags: OperationFlags) -> String {
    render(&expand_block(block, family, flags).unwrap())
}

#[test]
fn unary_float_branch() {
    let real = block(KindTag::Real, vec![assign("ox", "-ix")]);
    let nodes = expand_block(&real, KindFamily::Real, OperationFlags::empty()).unwrap();
    // one label and one body per kind
    assert_eq!(nodes.len(), 4);
    let expected = "\
\t\tcase Dataset.FLOAT32:
\t\t\tfinal float[] of32data = ((FloatDataset) result).getData();
\t\t\tif (it.isOutputDouble()) {
\t\t\t\twhile (it.hasNext()) {
\t\t\t\t\tfinal double ix = it.aDouble;
\t\t\t\t\tfloat ox;
\t\t\t\t\tox = (float) (-ix);
\t\t\t\t\tof32data[it.oIndex] = ox;
\t\t\t\t}
\t\t\t} else {
\t\t\t\twhile (it.hasNext()) {
\t\t\t\t\tfinal long ix = it.aLong;
\t\t\t\t\tfloat ox;
\t\t\t\t\tox = (-ix);
\t\t\t\t\tof32data[it.oIndex] = ox;
\t\t\t\t}
\t\t\t}
\t\t\tbreak;
";
    assert_eq!(render(&nodes[..2]), expected);
}

#[test]
fn allow_ints_emits_long_loop_only() {
    let integer = block(KindTag::Integer, vec![assign("ox", "iax + ibx")]);
    let text = expand(
        &integer,
        KindFamily::Integer,
        OperationFlags::BINARY | OperationFlags::ALLOW_INTS,
    );
    assert!(!text.contains("isOutputDouble"));
    assert!(text.contains("\t\t\t{\n\t\t\t\twhile (it.hasNext()) {\n"));
    assert!(text.contains("ox = (byte) (iax + ibx);"));
    assert!(text.contains("ox = (iax + ibx);"));
}

#[test]
fn integer_branches_in_width_order() {
    let integer = block(KindTag::Integer, vec![assign("ox", "iax + ibx")]);
    let text = expand(&integer, KindFamily::Integer, OperationFlags::BINARY);
    let labels: Vec<&str> = text
        .lines()
        .filter(|line| line.starts_with("\t\tcase "))
        .collect();
    assert_eq!(
        labels,
        vec![
            "\t\tcase Dataset.INT8:",
            "\t\tcase Dataset.INT16:",
            "\t\tcase Dataset.INT32:",
            "\t\tcase Dataset.INT64:",
        ]
    );
    assert!(text.contains("final int[] oi32data = ((IntegerDataset) result).getData();"));
}

#[test]
fn unsigned_mask_per_width() {
    let integer = block(KindTag::Integer, vec![assign("ox", "iax + ibx")]);
    let flags = OperationFlags::BINARY | OperationFlags::UNSIGNED_MASK;
    let text = expand(&integer, KindFamily::Integer, flags);
    for mask in [
        "0xffL",
        "0xffffL",
        "0xffffffffL",
        "0xffffffffffffffffL",
    ] {
        let line = format!("\t\t\tunsignedMask = {mask};\n");
        assert_eq!(text.matches(&line).count(), 1, "missing {mask}");
    }

    let compound = expand(&integer, KindFamily::CompoundInteger, flags);
    assert_eq!(compound.matches("unsignedMask = ").count(), 4);

    let real = block(KindTag::Real, vec![assign("ox", "iax + ibx")]);
    assert!(!expand(&real, KindFamily::Real, flags).contains("unsignedMask"));
}

#[test]
fn mask_follows_output_buffer() {
    let integer = block(KindTag::Integer, vec![assign("ox", "ix")]);
    let text = expand(&integer, KindFamily::Integer, OperationFlags::UNSIGNED_MASK);
    assert!(text.contains(
        "final short[] oi16data = ((ShortDataset) result).getData();\n\t\t\tunsignedMask = 0xffffL;\n"
    ));
}

#[test]
fn integer_with_reals_converts_through_long() {
    let integer = block(KindTag::IntegerWithReals, vec![assign("ox", "iax / ibx")]);
    let text = expand(&integer, KindFamily::Integer, OperationFlags::BINARY);
    assert!(text.contains("ox = (short) toLong(iax / ibx);"));
    assert!(!text.contains("ox = (short) (iax / ibx);"));
}

#[test]
fn promoted_integer_uses_native_long_loop() {
    let real = block(KindTag::Real, vec![assign("ox", "-ix")]);
    let text = expand(&real, KindFamily::Integer, OperationFlags::empty());
    assert!(text.contains("ox = (byte) toLong(-ix);"));
    assert!(text.contains("final long ix = it.aLong;"));
}

#[test]
fn binary_compound_shapes() {
    let real = block(KindTag::Real, vec![assign("ox", "iax + ibx")]);
    let text = expand(&real, KindFamily::CompoundReal, OperationFlags::BINARY);
    let heads: Vec<&str> = text
        .lines()
        .filter(|line| line.starts_with("\t\t\t") && !line.starts_with("\t\t\t\t"))
        .filter(|line| line.contains("is == 1") || line.contains("as "))
        .collect();
    assert_eq!(
        heads,
        vec![
            "\t\t\tif (is == 1) {",
            "\t\t\t} else if (as < bs) {",
            "\t\t\t} else if (as > bs) {",
            "\t\t\t} else if (as == 1) {",
            "\t\t\tif (is == 1) {",
            "\t\t\t} else if (as < bs) {",
            "\t\t\t} else if (as > bs) {",
            "\t\t\t} else if (as == 1) {",
        ]
    );
    assert!(text.contains("\t\t\t\t\t\tdouble ibx = it.bDouble;\n"));
    assert!(text.contains("\t\t\t\t\t\t\tibx = db.getElementDoubleAbs(it.bIndex + j);\n"));
    assert!(text.contains("\t\t\t\t\t\t\tiax = da.getElementLongAbs(it.aIndex + j);\n"));
    assert!(text.contains("\t\t\t\t\t\t\toaf64data[it.oIndex + j] = ox;\n"));
}

#[test]
fn lane_loop_reuses_declarations() {
    let real = block(KindTag::Real, vec![assign("ox", "iax + ibx")]);
    let text = expand(&real, KindFamily::CompoundReal, OperationFlags::BINARY);
    let expected = "\
\t\t\t} else if (as < bs) {
\t\t\t\tif (it.isOutputDouble()) {
\t\t\t\t\twhile (it.hasNext()) {
\t\t\t\t\t\tfinal double iax = it.aDouble;
\t\t\t\t\t\tdouble ibx = it.bDouble;
\t\t\t\t\t\tfloat ox;
\t\t\t\t\t\tox = (float) (iax + ibx);
\t\t\t\t\t\toaf32data[it.oIndex] = ox;
\t\t\t\t\t\tfor (int j = 1; j < is; j++) {
\t\t\t\t\t\t\tibx = db.getElementDoubleAbs(it.bIndex + j);
\t\t\t\t\t\t\tox = (float) (iax + ibx);
\t\t\t\t\t\t\toaf32data[it.oIndex + j] = ox;
\t\t\t\t\t\t}
\t\t\t\t\t}
";
    assert!(text.contains(expected), "{text}");
}

#[test]
fn unary_compound_shapes() {
    let real = block(KindTag::Real, vec![assign("ox", "-ix")]);
    let text = expand(&real, KindFamily::CompoundReal, OperationFlags::empty());
    assert!(!text.contains("as < bs"));
    assert!(text.contains("\t\t\t} else if (as == 1) {\n"));
    assert!(text.contains("\t\t\t\t\t\tfor (int j = 0; j < is; j++) {\n\t\t\t\t\t\t\tfinal double ix = da.getElementDoubleAbs(it.aIndex + j);\n"));
}

fn multiply() -> CodeBlock {
    let mut complex = block(
        KindTag::Complex,
        vec![
            assign("ox", "iax * ibx - iay * iby"),
            assign("oy", "iax * iby + iay * ibx"),
        ],
    );
    complex.complex_b_real_override = Some(vec![
        assign("ox", "iax * ibx"),
        assign("oy", "iay * ibx"),
    ]);
    complex
}

#[test]
fn complex_binary_sub_cases() {
    let text = expand(&multiply(), KindFamily::Complex, OperationFlags::BINARY);
    let labels: Vec<&str> = text
        .lines()
        .filter(|line| line.starts_with("\t\tcase "))
        .collect();
    assert_eq!(
        labels,
        vec!["\t\tcase Dataset.COMPLEX64:", "\t\tcase Dataset.COMPLEX128:"]
    );
    for head in [
        "\t\t\tif (!da.isComplex()) {\n\t\t\t\tfinal double iay = 0;\n",
        "\t\t\t\tif (db.isComplex()) {\n",
        "\t\t\t} else if (!db.isComplex()) {\n\t\t\t\tfinal double iby = 0;\n",
    ] {
        assert_eq!(text.matches(head).count(), 2, "{head}");
    }
    assert!(text.contains("final float[] oc64data = ((ComplexFloatDataset) result).getData();"));
    assert!(text.contains("oc128data[it.oIndex + 1] = oy;"));
}

#[test]
fn complex_binary_reads_only_doubles_without_integer_output() {
    let text = expand(&multiply(), KindFamily::Complex, OperationFlags::BINARY);
    assert!(!text.contains("isOutputDouble"));
    assert!(!text.contains("it.aLong"));
    assert!(!text.contains("final long iay = 0;"));
}

#[test]
fn complex_binary_long_loop_with_integer_output() {
    let flags = OperationFlags::BINARY | OperationFlags::ALLOW_INTS;
    let text = expand(&multiply(), KindFamily::Complex, flags);
    for head in [
        "\t\t\t\tif (it.isOutputDouble()) {\n\t\t\t\t\tfinal double iay = 0;\n",
        "\t\t\t\t\tif (db.isComplex()) {\n",
        "\t\t\t\t} else {\n\t\t\t\t\tfinal long iay = 0;\n",
    ] {
        assert_eq!(text.matches(head).count(), 2, "{head}");
    }
    assert!(text.contains("\t\t\t\t\t\tfinal long ibx = it.bLong;\n\t\t\t\t\t\tfinal long iby = 0;\n"));
}

#[test]
fn complex_override_replaces_second_operand_real_cases() {
    let text = expand(&multiply(), KindFamily::Complex, OperationFlags::BINARY);
    // default statements: b complex and both complex, per width
    assert_eq!(text.matches("(iax * ibx - iay * iby);").count(), 4);
    // override: a real b real and a complex b real, per width
    assert_eq!(text.matches("(iax * ibx);").count(), 4);
    assert!(text.contains("\t\t\t\t\t\tfinal double iby = 0;\n"));

    let flags = OperationFlags::BINARY | OperationFlags::ALLOW_INTS;
    let text = expand(&multiply(), KindFamily::Complex, flags);
    assert_eq!(text.matches("(iax * ibx - iay * iby);").count(), 4);
    // plus the long loop of a real b real
    assert_eq!(text.matches("(iax * ibx);").count(), 6);
}

#[test]
fn complex_without_override_zeroes_imaginary_lane() {
    let mut complex = multiply();
    complex.complex_b_real_override = None;
    let text = expand(&complex, KindFamily::Complex, OperationFlags::BINARY);
    assert!(!text.contains("(iax * ibx);"));
    assert_eq!(text.matches("final double iby = 0;").count(), 4);
}

#[test]
fn complex_real_only_skips_imaginary_store() {
    let mut complex = block(KindTag::Complex, vec![assign("ox", "Math.hypot(ix, iy)")]);
    complex.is_complex_real_only = true;
    let text = expand(&complex, KindFamily::Complex, OperationFlags::empty());
    assert!(!text.contains("= oy;"));
    assert_eq!(text.matches("[it.oIndex] = ox;").count(), 4);

    let text = expand(&complex, KindFamily::Complex, OperationFlags::ALLOW_INTS);
    assert!(!text.contains("= oy;"));
    assert_eq!(text.matches("[it.oIndex] = ox;").count(), 6);
}

fn conjugate() -> CodeBlock {
    block(
        KindTag::Complex,
        vec![assign("ox", "ix"), assign("oy", "-iy")],
    )
}

#[test]
fn complex_unary_shape() {
    let text = expand(&conjugate(), KindFamily::Complex, OperationFlags::empty());
    assert!(text.contains("\t\t\tif (!da.isComplex()) {\n\t\t\t\tfinal double iy = 0;\n"));
    assert!(text.contains(
        "\t\t\t\t\tfinal double ix = it.aDouble;\n\t\t\t\t\tfinal double iy = da.getElementDoubleAbs(it.aIndex + 1);\n"
    ));
    assert!(text.contains("ox = (float) (ix);"));
    assert!(!text.contains("isOutputDouble"));
    assert!(!text.contains("it.aLong"));
}

#[test]
fn complex_unary_long_loop_with_integer_output() {
    let text = expand(&conjugate(), KindFamily::Complex, OperationFlags::ALLOW_INTS);
    assert!(text.contains("\t\t\t\tif (it.isOutputDouble()) {\n\t\t\t\t\tfinal double iy = 0;\n"));
    assert!(text.contains("\t\t\t\t} else {\n\t\t\t\t\tfinal long iy = 0;\n"));
    assert!(text.contains("\t\t\t\t\t\tfinal long ix = it.aLong;\n"));
    assert!(text.contains("ox = (float) toLong(ix);"));
}

#[test]
fn unknown_temporary_propagates() {
    let real = block(KindTag::Real, vec![assign("ox", "ix + missing")]);
    let err = expand_block(&real, KindFamily::Real, OperationFlags::empty()).unwrap_err();
    assert_eq!(err.code(), ErrorCode::E2001);
}
