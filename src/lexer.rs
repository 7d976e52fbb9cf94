use std::rc::Rc;

use crate::diagnostic::Diagnostic;
use crate::token::{Keyword, Position, Source, Span, Token, TokenKind};

/// Tokenize `text` read from `file_name` into a sequence of tokens
/// ending with a single `Eof` token.
///
/// # Errors
///
/// Returns an `Illegal Character` diagnostic for any character that
/// cannot start a token, and an `Expected Character` diagnostic for a
/// `!` not followed by `=`. Lexing stops at the first diagnostic.
pub fn tokenize(text: &str, file_name: &str) -> Result<Vec<Token>, Diagnostic> {
    Lexer::new(Source::new(file_name, text)).tokenize()
}

struct Lexer {
    chars: Vec<char>,
    pos: Position,
}

impl Lexer {
    fn new(source: Rc<Source>) -> Self {
        Self {
            chars: source.text.chars().collect(),
            pos: Position::start(source),
        }
    }

    fn tokenize(mut self) -> Result<Vec<Token>, Diagnostic> {
        let mut tokens = Vec::new();

        while let Some(ch) = self.current() {
            match ch {
                ' ' | '\t' => self.advance(),
                '0'..='9' => tokens.push(self.read_number()),
                'a'..='z' | 'A'..='Z' => tokens.push(self.read_word()),
                '+' => tokens.push(self.single(TokenKind::Plus)),
                '-' => tokens.push(self.single(TokenKind::Minus)),
                '*' => tokens.push(self.single(TokenKind::Multiply)),
                '/' => tokens.push(self.single(TokenKind::Divide)),
                '^' => tokens.push(self.single(TokenKind::Power)),
                '(' => tokens.push(self.single(TokenKind::LeftParen)),
                ')' => tokens.push(self.single(TokenKind::RightParen)),
                '=' => tokens.push(self.maybe_equals(TokenKind::Assign, TokenKind::Equal)),
                '>' => tokens.push(self.maybe_equals(TokenKind::Greater, TokenKind::GreaterEqual)),
                '<' => tokens.push(self.maybe_equals(TokenKind::Less, TokenKind::LessEqual)),
                '!' => tokens.push(self.read_not_equals()?),
                other => {
                    let start = self.pos.clone();
                    self.advance();
                    return Err(Diagnostic::illegal_character(
                        Span::new(start, self.pos.clone()),
                        format!("'{other}'"),
                    ));
                }
            }
        }

        tokens.push(Token::new(TokenKind::Eof, Span::point(self.pos.clone())));
        Ok(tokens)
    }

    fn current(&self) -> Option<char> {
        self.chars.get(self.pos.offset).copied()
    }

    fn advance(&mut self) {
        if let Some(ch) = self.current() {
            self.pos.advance(ch);
        }
    }

    fn single(&mut self, kind: TokenKind) -> Token {
        let start = self.pos.clone();
        self.advance();
        Token::new(kind, Span::new(start, self.pos.clone()))
    }

    /// `plain`, or `with_equals` when the next character is `=`.
    fn maybe_equals(&mut self, plain: TokenKind, with_equals: TokenKind) -> Token {
        let start = self.pos.clone();
        self.advance();
        let kind = if self.current() == Some('=') {
            self.advance();
            with_equals
        } else {
            plain
        };
        Token::new(kind, Span::new(start, self.pos.clone()))
    }

    fn read_not_equals(&mut self) -> Result<Token, Diagnostic> {
        let start = self.pos.clone();
        self.advance();

        if self.current() == Some('=') {
            self.advance();
            return Ok(Token::new(
                TokenKind::NotEqual,
                Span::new(start, self.pos.clone()),
            ));
        }

        // the offending character is included in the span
        self.advance();
        Err(Diagnostic::expected_character(
            Span::new(start, self.pos.clone()),
            "'=' (after '!')",
        ))
    }

    /// Digits with at most one decimal point. A second point ends the
    /// number and is left for the next token.
    fn read_number(&mut self) -> Token {
        let start = self.pos.clone();
        let mut text = String::new();
        let mut seen_dot = false;

        while let Some(ch) = self.current() {
            match ch {
                '0'..='9' => text.push(ch),
                '.' if !seen_dot => {
                    seen_dot = true;
                    text.push(ch);
                }
                _ => break,
            }
            self.advance();
        }

        let kind = if seen_dot {
            TokenKind::Float(parse_float(&text))
        } else {
            text.parse::<i64>()
                .map_or_else(|_| TokenKind::Float(parse_float(&text)), TokenKind::Int)
        };

        Token::new(kind, Span::new(start, self.pos.clone()))
    }

    fn read_word(&mut self) -> Token {
        let start = self.pos.clone();
        let mut word = String::new();

        while let Some(ch) = self.current() {
            if !(ch.is_ascii_alphanumeric() || ch == '_') {
                break;
            }
            word.push(ch);
            self.advance();
        }

        let kind = Keyword::from_word(&word).map_or(TokenKind::Identifier(word), TokenKind::Keyword);
        Token::new(kind, Span::new(start, self.pos.clone()))
    }
}

/// `text` is digits with at most one point, so parsing only fails on
/// a trailing point, which is completed with a zero.
fn parse_float(text: &str) -> f64 {
    let mut digits = text.to_string();
    if digits.ends_with('.') {
        digits.push('0');
    }
    digits.parse().unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::DiagnosticKind;

    fn kinds(input: &str) -> Vec<TokenKind> {
        tokenize(input, "<test>")
            .expect("should tokenize")
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn arithmetic() {
        assert_eq!(
            kinds("1 + 2.5*x"),
            vec![
                TokenKind::Int(1),
                TokenKind::Plus,
                TokenKind::Float(2.5),
                TokenKind::Multiply,
                TokenKind::Identifier("x".into()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn keywords() {
        assert_eq!(
            kinds("var not variable"),
            vec![
                TokenKind::Keyword(Keyword::Var),
                TokenKind::Keyword(Keyword::Not),
                TokenKind::Identifier("variable".into()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn comparison_operators() {
        assert_eq!(
            kinds("= == != > >= < <="),
            vec![
                TokenKind::Assign,
                TokenKind::Equal,
                TokenKind::NotEqual,
                TokenKind::Greater,
                TokenKind::GreaterEqual,
                TokenKind::Less,
                TokenKind::LessEqual,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn second_dot_starts_next_token() {
        let err = tokenize("1.2.3", "<test>").unwrap_err();
        assert_eq!(err.kind, DiagnosticKind::IllegalCharacter);
        assert_eq!(err.span.start.offset, 3);
        assert_eq!(err.message, "'.'");
    }

    #[test]
    fn trailing_dot_is_float() {
        assert_eq!(kinds("7."), vec![TokenKind::Float(7.0), TokenKind::Eof]);
    }

    #[test]
    fn oversized_int_becomes_float() {
        let tokens = kinds("99999999999999999999");
        assert!(matches!(tokens[0], TokenKind::Float(v) if v > 9.0e19));
    }

    #[test]
    fn eof_is_zero_width_at_end() {
        let tokens = tokenize("12 ", "<test>").expect("should tokenize");
        let eof = tokens.last().expect("eof");
        assert_eq!(eof.kind, TokenKind::Eof);
        assert_eq!(eof.span.start.offset, 3);
        assert_eq!(eof.span.end.offset, 3);
    }

    #[test]
    fn bang_without_equals() {
        let err = tokenize("1 !2", "<test>").unwrap_err();
        assert_eq!(err.kind, DiagnosticKind::ExpectedCharacter);
        assert_eq!(err.message, "'=' (after '!')");
        assert_eq!(err.span.start.offset, 2);
        assert_eq!(err.span.end.offset, 4);
    }

    #[test]
    fn bang_at_end_of_input() {
        let err = tokenize("!", "<test>").unwrap_err();
        assert_eq!(err.kind, DiagnosticKind::ExpectedCharacter);
        assert_eq!(err.span.end.offset, 1);
    }

    #[test]
    fn spans_cover_token_text() {
        let tokens = tokenize("ab >= 10", "<test>").expect("should tokenize");
        let offsets: Vec<_> = tokens
            .iter()
            .map(|t| (t.span.start.offset, t.span.end.offset))
            .collect();
        assert_eq!(offsets, vec![(0, 2), (3, 5), (6, 8), (8, 8)]);
    }
}
