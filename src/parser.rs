use crate::ast::{BinaryOperator, Node, UnaryOperator};
use crate::diagnostic::Diagnostic;
use crate::token::{Keyword, Position, Source, Span, Token, TokenKind};
use crate::value::Number;

const EXPECTED_ATOM: &str = "Expected int, float, identifier, '+', '-' or '('";
const EXPECTED_EXPR: &str = "Expected 'var', int, float, identifier, '+', '-' or '('";
const EXPECTED_OPERATOR: &str = "Expected '+', '-', '*', '/' or '^'";
const EXPECTED_EOF: &str = "Expected token stream to end with end-of-input";

type ParseResult = Result<Node, Diagnostic>;

/// Parse a token stream (as produced by `tokenize`) into a single
/// expression tree.
///
/// Grammar, lowest precedence first:
///
/// ```text
/// expr   := 'var' IDENTIFIER '=' expr | term (('+' | '-') term)*
/// term   := factor (('*' | '/') factor)*
/// factor := ('+' | '-') factor | power
/// power  := atom ('^' factor)*
/// atom   := INT | FLOAT | IDENTIFIER | '(' expr ')'
/// ```
///
/// # Errors
///
/// Returns an `Invalid Syntax` diagnostic at the first token that
/// does not fit the grammar, or at the first token left over after a
/// complete expression. A stream that is empty or does not end with
/// `Eof` is rejected up front.
pub fn parse(tokens: &[Token]) -> ParseResult {
    match tokens.last() {
        None => {
            let start = Position::start(Source::new("<empty>", ""));
            Err(Diagnostic::invalid_syntax(
                Span::point(start),
                EXPECTED_EOF,
            ))
        }
        Some(last) if last.kind != TokenKind::Eof => Err(Diagnostic::invalid_syntax(
            Span::point(last.span.end.clone()),
            EXPECTED_EOF,
        )),
        Some(_) => Parser::new(tokens).parse(),
    }
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Parser<'a> {
    const fn new(tokens: &'a [Token]) -> Self {
        Self { tokens, pos: 0 }
    }

    fn parse(mut self) -> ParseResult {
        let node = self.expr()?;
        let token = self.current();
        if token.kind != TokenKind::Eof {
            return Err(Diagnostic::invalid_syntax(
                token.span.clone(),
                EXPECTED_OPERATOR,
            ));
        }
        Ok(node)
    }

    fn current(&self) -> &'a Token {
        let last = self.tokens.len() - 1;
        &self.tokens[self.pos.min(last)]
    }

    /// Step to the next token, staying on the final `Eof`.
    const fn advance(&mut self) {
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
    }

    /// Run `rule`. A failure raised before `rule` consumed any token
    /// is replaced by `fallback` at the current token; a failure after
    /// progress is kept, so the deepest error is the one reported.
    fn attempt(&mut self, rule: fn(&mut Self) -> ParseResult, fallback: &str) -> ParseResult {
        let start = self.pos;
        rule(self).map_err(|err| {
            if self.pos == start {
                Diagnostic::invalid_syntax(self.current().span.clone(), fallback)
            } else {
                err
            }
        })
    }

    fn expr(&mut self) -> ParseResult {
        self.attempt(Self::expr_body, EXPECTED_EXPR)
    }

    fn expr_body(&mut self) -> ParseResult {
        if self.current().kind.is_keyword(Keyword::Var) {
            return self.var_assign();
        }
        self.binary_op(
            Self::term,
            &[BinaryOperator::Add, BinaryOperator::Subtract],
            Self::term,
        )
    }

    fn var_assign(&mut self) -> ParseResult {
        self.advance();

        let name_token = self.current();
        let TokenKind::Identifier(name) = &name_token.kind else {
            return Err(Diagnostic::invalid_syntax(
                name_token.span.clone(),
                "Expected identifier",
            ));
        };
        self.advance();

        let token = self.current();
        if token.kind != TokenKind::Assign {
            return Err(Diagnostic::invalid_syntax(
                token.span.clone(),
                "Expected '='",
            ));
        }
        self.advance();

        let value = self.expr()?;
        Ok(Node::VarAssign {
            name: name.clone(),
            name_token: name_token.clone(),
            value: Box::new(value),
        })
    }

    fn term(&mut self) -> ParseResult {
        self.binary_op(
            Self::factor,
            &[BinaryOperator::Multiply, BinaryOperator::Divide],
            Self::factor,
        )
    }

    fn factor(&mut self) -> ParseResult {
        let token = self.current();
        if let Some(operator) = UnaryOperator::from_token(&token.kind) {
            self.advance();
            let operand = self.factor()?;
            return Ok(Node::UnaryOp {
                operator,
                operator_token: token.clone(),
                operand: Box::new(operand),
            });
        }
        self.power()
    }

    /// `^` takes a `factor` on its right, which makes it bind to the
    /// right: `2 ^ 3 ^ 2` is `2 ^ (3 ^ 2)`.
    fn power(&mut self) -> ParseResult {
        self.binary_op(Self::atom, &[BinaryOperator::Power], Self::factor)
    }

    fn atom(&mut self) -> ParseResult {
        let token = self.current();
        match &token.kind {
            TokenKind::Int(v) => {
                self.advance();
                Ok(Node::NumberLiteral {
                    value: Number::Int(*v),
                    token: token.clone(),
                })
            }
            TokenKind::Float(v) => {
                self.advance();
                Ok(Node::NumberLiteral {
                    value: Number::Float(*v),
                    token: token.clone(),
                })
            }
            TokenKind::Identifier(name) => {
                self.advance();
                Ok(Node::VarAccess {
                    name: name.clone(),
                    name_token: token.clone(),
                })
            }
            TokenKind::LeftParen => {
                self.advance();
                let inner = self.expr()?;
                let closing = self.current();
                if closing.kind != TokenKind::RightParen {
                    return Err(Diagnostic::invalid_syntax(
                        closing.span.clone(),
                        "Expected ')'",
                    ));
                }
                self.advance();
                Ok(inner)
            }
            _ => Err(Diagnostic::invalid_syntax(
                token.span.clone(),
                EXPECTED_ATOM,
            )),
        }
    }

    /// Left-associative loop: `left (op right)*`.
    fn binary_op(
        &mut self,
        left_rule: fn(&mut Self) -> ParseResult,
        operators: &[BinaryOperator],
        right_rule: fn(&mut Self) -> ParseResult,
    ) -> ParseResult {
        let mut left = left_rule(self)?;

        loop {
            let operator_token = self.current();
            let Some(operator) = BinaryOperator::from_token(&operator_token.kind)
                .filter(|op| operators.contains(op))
            else {
                break;
            };
            self.advance();
            let right = right_rule(self)?;
            left = Node::BinaryOp {
                left: Box::new(left),
                operator,
                operator_token: operator_token.clone(),
                right: Box::new(right),
            };
        }

        Ok(left)
    }
}
