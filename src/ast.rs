use crate::token::{Span, Token, TokenKind};
use crate::value::Number;

/// Arithmetic binary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
}

impl BinaryOperator {
    #[must_use]
    pub const fn from_token(kind: &TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Plus => Some(Self::Add),
            TokenKind::Minus => Some(Self::Subtract),
            TokenKind::Multiply => Some(Self::Multiply),
            TokenKind::Divide => Some(Self::Divide),
            TokenKind::Power => Some(Self::Power),
            _ => None,
        }
    }

    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Power => "^",
        }
    }
}

/// Prefix operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Plus,
    Minus,
}

impl UnaryOperator {
    #[must_use]
    pub const fn from_token(kind: &TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Plus => Some(Self::Plus),
            TokenKind::Minus => Some(Self::Minus),
            _ => None,
        }
    }

    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Plus => "+",
            Self::Minus => "-",
        }
    }
}

/// Expression tree for one input.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    NumberLiteral { value: Number, token: Token },
    BinaryOp {
        left: Box<Self>,
        operator: BinaryOperator,
        operator_token: Token,
        right: Box<Self>,
    },
    UnaryOp {
        operator: UnaryOperator,
        operator_token: Token,
        operand: Box<Self>,
    },
    /// `var name = value`
    VarAssign {
        name: String,
        name_token: Token,
        value: Box<Self>,
    },
    VarAccess { name: String, name_token: Token },
}

impl Node {
    /// Source range covered by this node.
    ///
    /// Binary operations run from the left operand to the right,
    /// unary operations from the operator to the operand, and
    /// variable nodes cover just the name.
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            Self::NumberLiteral { token, .. } => token.span.clone(),
            Self::BinaryOp { left, right, .. } => left.span().to(&right.span()),
            Self::UnaryOp {
                operator_token,
                operand,
                ..
            } => operator_token.span.to(&operand.span()),
            Self::VarAssign { name_token, .. } | Self::VarAccess { name_token, .. } => {
                name_token.span.clone()
            }
        }
    }
}
