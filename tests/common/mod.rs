#![allow(dead_code)]

use basic_rs::{Diagnostic, Environment, Node, SymbolTable, Value, parse, run, tokenize};

pub const FILE: &str = "<stdin>";

/// Evaluate `input` in a fresh global environment.
pub fn eval(input: &str) -> Result<Value, Diagnostic> {
    run(FILE, input, &SymbolTable::global())
}

/// Run every line but the last as setup, then return the environment
/// and the result of the last line.
pub fn eval_lines(lines: &[&str]) -> (Environment, Result<Value, Diagnostic>) {
    let env = SymbolTable::global();
    let (last, setup) = lines.split_last().expect("at least one line");
    for line in setup {
        run(FILE, line, &env).unwrap_or_else(|e| panic!("setup `{line}` failed: {e}"));
    }
    let result = run(FILE, last, &env);
    (env, result)
}

pub fn parse_input(input: &str) -> Result<Node, Diagnostic> {
    let tokens = tokenize(input, FILE).expect("tokenize failed");
    parse(&tokens)
}

/// Rendered diagnostic for an input that must fail.
pub fn render_error(input: &str) -> String {
    match eval(input) {
        Ok(value) => panic!("expected `{input}` to fail, got {value}"),
        Err(e) => e.render(),
    }
}
