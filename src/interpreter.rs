use crate::ast::{BinaryOperator, Node, UnaryOperator};
use crate::context::Context;
use crate::diagnostic::Diagnostic;
use crate::token::Span;
use crate::value::{Number, Value};

/// Tree-walking evaluator.
///
/// Children are evaluated left to right and the first diagnostic
/// aborts the rest of the walk.
#[derive(Debug, Default, Clone, Copy)]
pub struct Interpreter;

impl Interpreter {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Evaluate `node` against `context`.
    ///
    /// # Errors
    ///
    /// Returns a `Runtime Error` diagnostic for an undefined variable
    /// or a division by zero.
    pub fn visit(&self, node: &Node, context: &Context<'_>) -> Result<Value, Diagnostic> {
        match node {
            Node::NumberLiteral { value, .. } => Ok(Value::new(*value).with_span(node.span())),
            Node::VarAccess { name, .. } => Self::visit_var_access(node, name, context),
            Node::VarAssign { name, value, .. } => self.visit_var_assign(name, value, context),
            Node::BinaryOp {
                left,
                operator,
                right,
                ..
            } => self.visit_binary_op(node, left, *operator, right, context),
            Node::UnaryOp {
                operator, operand, ..
            } => self.visit_unary_op(node, *operator, operand, context),
        }
    }

    fn visit_var_access(node: &Node, name: &str, context: &Context<'_>) -> Result<Value, Diagnostic> {
        let found = context.symbols.borrow().get(name);
        match found {
            Some(value) => Ok(value.with_span(node.span())),
            None => Err(runtime_error(
                node.span(),
                format!("'{name}' is not defined"),
                context,
            )),
        }
    }

    fn visit_var_assign(
        &self,
        name: &str,
        value: &Node,
        context: &Context<'_>,
    ) -> Result<Value, Diagnostic> {
        let value = self.visit(value, context)?;
        tracing::trace!(name, value = %value, "assign");
        context.symbols.borrow_mut().set(name, value.clone());
        Ok(value)
    }

    fn visit_binary_op(
        &self,
        node: &Node,
        left: &Node,
        operator: BinaryOperator,
        right: &Node,
        context: &Context<'_>,
    ) -> Result<Value, Diagnostic> {
        let lhs = self.visit(left, context)?;
        let rhs = self.visit(right, context)?;

        let number = match operator {
            BinaryOperator::Add => lhs.number + rhs.number,
            BinaryOperator::Subtract => lhs.number - rhs.number,
            BinaryOperator::Multiply => lhs.number * rhs.number,
            BinaryOperator::Divide => {
                if rhs.number.is_zero() {
                    return Err(runtime_error(right.span(), "Division by Zero", context));
                }
                lhs.number / rhs.number
            }
            BinaryOperator::Power => lhs.number.pow(rhs.number),
        };

        Ok(Value::new(number).with_span(node.span()))
    }

    fn visit_unary_op(
        &self,
        node: &Node,
        operator: UnaryOperator,
        operand: &Node,
        context: &Context<'_>,
    ) -> Result<Value, Diagnostic> {
        let value = self.visit(operand, context)?;
        let number = match operator {
            UnaryOperator::Minus => value.number * Number::Int(-1),
            UnaryOperator::Plus => value.number,
        };
        Ok(Value::new(number).with_span(node.span()))
    }
}

fn runtime_error(span: Span, message: impl Into<String>, context: &Context<'_>) -> Diagnostic {
    let traceback = context.traceback(&span.start);
    Diagnostic::runtime(span, message, traceback)
}
