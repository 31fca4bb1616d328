use pretty_assertions::assert_eq;
use smallvec::smallvec;

use super::*;

fn record(kind: OperationKind, signedness: SmallVec<[Signedness; 4]>) -> OperationRecord {
    OperationRecord {
        name: "add".to_string(),
        kind,
        parameter_count: 3,
        signedness,
        allow_ints: false,
        doc_summary: "a + b".to_string(),
        doc_extra_lines: Vec::new(),
        code_blocks: vec![CodeBlock::new(KindTag::Integer, 3)],
        line: 1,
    }
}

#[test]
fn kind_tag_lookup() {
    assert_eq!(KindTag::from_name("integer"), Some(KindTag::Integer));
    assert_eq!(
        KindTag::from_name("integer_with_reals"),
        Some(KindTag::IntegerWithReals)
    );
    assert_eq!(KindTag::from_name("complex"), Some(KindTag::Complex));
    assert_eq!(KindTag::from_name("boolean"), None);
}

#[test]
fn kind_tag_families() {
    assert_eq!(
        KindTag::IntegerWithReals.families(),
        &[KindFamily::Integer, KindFamily::CompoundInteger]
    );
    assert_eq!(KindTag::Complex.families(), &[KindFamily::Complex]);
    assert!(KindTag::Integer.is_integer_family());
    assert!(!KindTag::Real.is_integer_family());
}

#[test]
fn parameter_names_follow_letters() {
    let rec = record(OperationKind::Unary, smallvec![]);
    assert_eq!(rec.parameter_names(), vec!["pa", "pb", "pc"]);
}

#[test]
fn flags_reflect_record() {
    let rec = record(
        OperationKind::Binary,
        smallvec![Signedness::Signed, Signedness::Unsigned],
    );
    let flags = rec.flags();
    assert!(flags.contains(OperationFlags::BINARY | OperationFlags::UNSIGNED_MASK));
    assert!(!flags.contains(OperationFlags::ALLOW_INTS));

    let unary = record(OperationKind::Unary, smallvec![Signedness::Signed]);
    assert_eq!(unary.flags(), OperationFlags::empty());
}

#[test]
fn statement_declared_name() {
    let assign = Statement::Assign {
        lhs: "ox".to_string(),
        rhs: "ix".to_string(),
    };
    assert_eq!(assign.declared_name(), Some("ox"));
    assert_eq!(Statement::Verbatim("if (ix > 0) {".to_string()).declared_name(), None);
}

#[test]
fn doc_headline_escapes_single_comma_expression() {
    let mut rec = record(OperationKind::Binary, smallvec![]);
    rec.doc_summary = "a + b, addition of a and b".to_string();
    assert_eq!(rec.doc_headline(), "{@code a + b}, addition of a and b");
    assert_eq!(rec.operator_symbol(), Some("+"));

    rec.doc_summary = "one, two, three".to_string();
    assert_eq!(rec.doc_headline(), "one, two, three");

    rec.doc_summary = "negate".to_string();
    assert_eq!(rec.doc_headline(), "negate");
    assert_eq!(rec.operator_symbol(), None);
}
