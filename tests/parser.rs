//! Parser edge cases and error tests.

mod common;

use basic_rs::{BinaryOperator, DiagnosticKind, Node, UnaryOperator, format};
use common::parse_input;

// -----------------------------------------------------------
// Tree shape.
// -----------------------------------------------------------

#[test]
fn parse_literal() {
    let node = parse_input("42").expect("parse");
    assert!(matches!(node, Node::NumberLiteral { .. }));
}

#[test]
fn parse_nested_unary() {
    let node = parse_input("-+x").expect("parse");
    let Node::UnaryOp {
        operator, operand, ..
    } = node
    else {
        panic!("expected unary op");
    };
    assert_eq!(operator, UnaryOperator::Minus);
    assert!(matches!(
        *operand,
        Node::UnaryOp {
            operator: UnaryOperator::Plus,
            ..
        }
    ));
}

#[test]
fn parse_unary_binds_looser_than_power() {
    assert_eq!(format(&parse_input("-2 ^ 2").expect("parse")), "(-(2 ^ 2))");
}

#[test]
fn parse_power_right_operand_may_be_unary() {
    assert_eq!(format(&parse_input("2 ^ -1").expect("parse")), "(2 ^ (-1))");
}

#[test]
fn parse_division_left_associative() {
    let node = parse_input("8 / 4 / 2").expect("parse");
    let Node::BinaryOp { left, operator, .. } = node else {
        panic!("expected binary op");
    };
    assert_eq!(operator, BinaryOperator::Divide);
    assert!(matches!(
        *left,
        Node::BinaryOp {
            operator: BinaryOperator::Divide,
            ..
        }
    ));
}

#[test]
fn parse_chained_assignment() {
    assert_eq!(
        format(&parse_input("var a = var b = 3").expect("parse")),
        "var a = var b = 3"
    );
}

// -----------------------------------------------------------
// Spans.
// -----------------------------------------------------------

#[test]
fn span_binary_covers_operands() {
    let span = parse_input("(1 + 22) * 3").expect("parse").span();
    // parentheses are not part of the tree
    assert_eq!(span.start.offset, 1);
    assert_eq!(span.end.offset, 12);
}

#[test]
fn span_unary_starts_at_operator() {
    let span = parse_input("  -7").expect("parse").span();
    assert_eq!((span.start.offset, span.end.offset), (2, 4));
}

#[test]
fn span_assignment_is_name() {
    let span = parse_input("var abc = 1 + 2").expect("parse").span();
    assert_eq!((span.start.offset, span.end.offset), (4, 7));
}

// -----------------------------------------------------------
// Parser errors.
// -----------------------------------------------------------

#[test]
fn parse_error_unclosed_paren() {
    let err = parse_input("(1 + 2").unwrap_err();
    assert_eq!(err.kind, DiagnosticKind::InvalidSyntax);
    assert!(err.message.contains("')'"));
    assert_eq!(err.span.start.offset, 6);
}

#[test]
fn parse_error_var_without_identifier() {
    let err = parse_input("var 5 = 1").unwrap_err();
    assert_eq!(err.message, "Expected identifier");
    assert_eq!(err.span.start.offset, 4);
}

#[test]
fn parse_error_var_without_equals() {
    let err = parse_input("var x 1").unwrap_err();
    assert_eq!(err.message, "Expected '='");
    assert_eq!(err.span.start.offset, 6);
}

#[test]
fn parse_error_var_without_value() {
    let err = parse_input("var x =").unwrap_err();
    assert_eq!(
        err.message,
        "Expected 'var', int, float, identifier, '+', '-' or '('"
    );
    assert_eq!(err.span.start.offset, 7);
}

#[test]
fn parse_error_empty_input() {
    let err = parse_input("").unwrap_err();
    assert_eq!(err.kind, DiagnosticKind::InvalidSyntax);
    assert_eq!(err.span.start.offset, 0);
}

#[test]
fn parse_error_inside_parens_is_reported_there() {
    let err = parse_input("1 + (2 *)").unwrap_err();
    assert_eq!(err.span.start.offset, 8);
    assert_eq!(
        err.message,
        "Expected int, float, identifier, '+', '-' or '('"
    );
}

#[test]
fn parse_error_empty_parens() {
    let err = parse_input("3 * ()").unwrap_err();
    assert_eq!(err.span.start.offset, 5);
    assert!(err.message.starts_with("Expected 'var'"));
}

#[test]
fn parse_error_trailing_operator() {
    let err = parse_input("1 +").unwrap_err();
    assert_eq!(err.span.start.offset, 3);
}

#[test]
fn parse_error_leftover_token() {
    let err = parse_input("1 + 2 )").unwrap_err();
    assert_eq!(err.message, "Expected '+', '-', '*', '/' or '^'");
    assert_eq!(err.span.start.offset, 6);
}

#[test]
fn parse_error_comparison_not_in_grammar() {
    let err = parse_input("1 == 1").unwrap_err();
    assert_eq!(err.kind, DiagnosticKind::InvalidSyntax);
    assert_eq!(err.span.start.offset, 2);

    let err = parse_input("not 1").unwrap_err();
    assert_eq!(err.span.start.offset, 0);
}
