//! Lexer, parser, and tree-walking evaluator for a small arithmetic
//! expression language.
//!
//! Source text goes through three stages, each returning either its
//! output or a positioned [`Diagnostic`]:
//! [`tokenize`] → [`parse`] → [`Interpreter::visit`].
//!
//! # Quick start
//!
//! ```
//! use basic_rs::{SymbolTable, run};
//!
//! let env = SymbolTable::global();
//! run("<stdin>", "var x = 2 ^ 3", &env).unwrap();
//! let value = run("<stdin>", "x * (1 + 0.5)", &env).unwrap();
//! assert_eq!(value.to_string(), "12.0");
//! ```
//!
//! ## Rendering a diagnostic
//!
//! ```
//! use basic_rs::{SymbolTable, run};
//!
//! let err = run("<stdin>", "10 / 0", &SymbolTable::global()).unwrap_err();
//! assert_eq!(
//!     err.render(),
//!     "Traceback (most recent call last):\n  File <stdin>, line 1, in <program>\n\
//!      Runtime Error, Division by Zero \n\n10 / 0\n     ^",
//! );
//! ```

// Allow noisy pedantic lints that don't add value for
// a library crate.
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod ast;
pub mod context;
pub mod diagnostic;
pub mod formatter;
pub mod interpreter;
pub mod lexer;
pub mod parser;
pub mod token;
pub mod value;

pub use ast::{BinaryOperator, Node, UnaryOperator};
pub use context::{Context, Environment, SymbolTable};
pub use diagnostic::{Diagnostic, DiagnosticKind, Frame, render_excerpt};
pub use formatter::format;
pub use interpreter::Interpreter;
pub use lexer::tokenize;
pub use parser::parse;
pub use token::{Keyword, Position, Source, Span, Token, TokenKind};
pub use value::{Number, Value};

/// Display name of the root context used by [`run`].
pub const PROGRAM_CONTEXT: &str = "<program>";

/// Tokenize, parse, and evaluate `text` in one step.
///
/// Variables are read from and written to `environment`; reuse the
/// same handle across calls to keep bindings between inputs.
pub fn run(file_name: &str, text: &str, environment: &Environment) -> Result<Value, Diagnostic> {
    let tokens = tokenize(text, file_name)?;
    tracing::debug!(file_name, tokens = tokens.len(), "tokenized");

    let ast = parse(&tokens)?;
    tracing::debug!(file_name, ast = %ast, "parsed");

    let context = Context::new(PROGRAM_CONTEXT, std::rc::Rc::clone(environment));
    let value = Interpreter::new().visit(&ast, &context)?;
    tracing::debug!(file_name, value = %value, "evaluated");
    Ok(value)
}

/// Run every non-blank line of `text` in order against
/// `environment`, stopping at the first diagnostic.
///
/// Returns the value of the last line, or `None` when `text` has no
/// non-blank lines.
pub fn run_program(
    file_name: &str,
    text: &str,
    environment: &Environment,
) -> Result<Option<Value>, Diagnostic> {
    run_program_with(file_name, text, environment, |_, _| {})
}

/// Like [`run_program`], calling `on_value` with each line and its
/// value as soon as the line has been evaluated.
pub fn run_program_with<F>(
    file_name: &str,
    text: &str,
    environment: &Environment,
    mut on_value: F,
) -> Result<Option<Value>, Diagnostic>
where
    F: FnMut(&str, &Value),
{
    let mut last = None;
    for line in text.lines().filter(|line| !line.trim().is_empty()) {
        let value = run(file_name, line, environment)?;
        on_value(line, &value);
        last = Some(value);
    }
    Ok(last)
}
