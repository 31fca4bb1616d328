use dsgen_diagnostic::ErrorCode;
use pretty_assertions::assert_eq;

use super::*;

#[test]
fn assignment_drops_semicolon() {
    assert_eq!(
        parse_statement("  ox = iax + ibx;").unwrap(),
        Statement::Assign {
            lhs: "ox".to_string(),
            rhs: "iax + ibx".to_string(),
        }
    );
}

#[test]
fn assignment_keeps_ternary_colon() {
    assert_eq!(
        parse_statement("ox = ibx == 0 ? 0 : iax / ibx;").unwrap(),
        Statement::Assign {
            lhs: "ox".to_string(),
            rhs: "ibx == 0 ? 0 : iax / ibx".to_string(),
        }
    );
}

#[test]
fn construction_records_class() {
    assert_eq!(
        parse_statement("tz = new Complex(ix, iy).sin();").unwrap(),
        Statement::Construct {
            lhs: "tz".to_string(),
            class: "Complex".to_string(),
            line: "tz = new Complex(ix, iy).sin();".to_string(),
        }
    );
}

#[test]
fn construction_without_class_is_malformed() {
    let err = parse_statement("tz = new (ix);").unwrap_err();
    assert_eq!(err.code(), ErrorCode::E1001);
}

#[test]
fn non_assignments_are_verbatim() {
    for line in ["if (ibx == 0) {", "}", "ox += 1;", "double t = ix;"] {
        assert_eq!(
            parse_statement(line).unwrap(),
            Statement::Verbatim(line.to_string())
        );
    }
}

#[test]
fn identifier_shape() {
    assert!(is_identifier("ox"));
    assert!(is_identifier("_t1"));
    assert!(!is_identifier("1t"));
    assert!(!is_identifier("double t"));
    assert!(!is_identifier(""));
}
