//! Pretty-printer that serializes an expression tree back into source text.
//!
//! Every operation is parenthesized, so the output re-parses into a tree
//! with the same shape regardless of precedence.

use std::fmt;
use std::fmt::Write as _;

use crate::ast::Node;
use crate::value::Number;

/// Format an expression tree as fully parenthesized source text.
///
/// An assignment is written bare at the top level and in the value
/// position of another assignment, and parenthesized as an operand.
#[must_use]
pub fn format(node: &Node) -> String {
    let mut out = String::new();
    format_node(&mut out, node, false);
    out
}

fn format_node(out: &mut String, node: &Node, nested: bool) {
    match node {
        Node::NumberLiteral { value, token } => match value {
            // an overflowing literal has no finite spelling; reuse its digits
            Number::Float(v) if !v.is_finite() => out.push_str(&token.span.text()),
            _ => {
                let _ = write!(out, "{value}");
            }
        },
        Node::VarAccess { name, .. } => out.push_str(name),
        Node::VarAssign { name, value, .. } => {
            if nested {
                out.push('(');
            }
            out.push_str("var ");
            out.push_str(name);
            out.push_str(" = ");
            format_node(out, value, false);
            if nested {
                out.push(')');
            }
        }
        Node::BinaryOp {
            left,
            operator,
            right,
            ..
        } => {
            out.push('(');
            format_node(out, left, true);
            out.push(' ');
            out.push_str(operator.symbol());
            out.push(' ');
            format_node(out, right, true);
            out.push(')');
        }
        Node::UnaryOp {
            operator, operand, ..
        } => {
            out.push('(');
            out.push_str(operator.symbol());
            format_node(out, operand, true);
            out.push(')');
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format(self))
    }
}
