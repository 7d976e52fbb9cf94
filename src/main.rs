//! Interactive shell and script runner for the expression language.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::{self, ExitCode};

use basic_rs::{Environment, SymbolTable, format, parse, run, run_program_with, tokenize};
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

/// Evaluate arithmetic expressions with variables.
///
/// With no FILE and no --eval, starts an interactive prompt. Variables
/// assigned on one line stay visible on later lines.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Script to run, one expression per line.
    file: Option<PathBuf>,

    /// Evaluate a single expression and exit.
    #[arg(short, long, conflicts_with = "file")]
    eval: Option<String>,

    /// File name shown in diagnostics for prompt and --eval input.
    #[arg(long, default_value = "<stdin>")]
    name: String,

    /// Prompt printed before each interactive line.
    #[arg(long, default_value = "REPL > ")]
    prompt: String,

    /// Print the token stream of each input.
    #[arg(long)]
    tokens: bool,

    /// Print the parsed expression tree of each input.
    #[arg(long)]
    ast: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing();

    let env = SymbolTable::global();

    if let Some(expr) = &args.eval {
        return if evaluate(&args, &args.name, expr, &env) {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        };
    }

    if let Some(path) = &args.file {
        return run_file(&args, path, &env);
    }

    repl(&args, &env)
}

/// Log level comes from `BASIC_LOG`, then `RUST_LOG`, default `warn`.
fn init_tracing() {
    let filter = EnvFilter::try_from_env("BASIC_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run_file(args: &Args, path: &Path, env: &Environment) -> ExitCode {
    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{}: {e}", path.display());
            return ExitCode::FAILURE;
        }
    };

    let file_name = path.display().to_string();
    let result = run_program_with(&file_name, &content, env, |line, value| {
        dump(args, &file_name, line);
        println!("{value}");
    });
    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            dump(args, &file_name, &e.span.start.source.text);
            println!("{}", e.render());
            ExitCode::FAILURE
        }
    }
}

const TERMINATED: &str = "\nProgram terminated!";

fn repl(args: &Args, env: &Environment) -> ExitCode {
    if let Err(e) = ctrlc::set_handler(|| {
        println!("{TERMINATED}");
        process::exit(0);
    }) {
        tracing::warn!(error = %e, "could not install Ctrl-C handler");
    }

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("{}", args.prompt);
        let _ = io::stdout().flush();

        let line = match lines.next() {
            Some(Ok(line)) => line,
            Some(Err(e)) => {
                eprintln!("{e}");
                return ExitCode::FAILURE;
            }
            None => {
                println!("{TERMINATED}");
                return ExitCode::SUCCESS;
            }
        };

        let text = line.trim();
        if text.is_empty() {
            continue;
        }
        evaluate(args, &args.name, text, env);
    }
}

/// Run one input, printing the value or the rendered diagnostic.
/// Returns whether it succeeded.
fn evaluate(args: &Args, file_name: &str, text: &str, env: &Environment) -> bool {
    dump(args, file_name, text);

    match run(file_name, text, env) {
        Ok(value) => {
            println!("{value}");
            true
        }
        Err(e) => {
            println!("{}", e.render());
            false
        }
    }
}

fn dump(args: &Args, file_name: &str, text: &str) {
    if !(args.tokens || args.ast) {
        return;
    }
    let Ok(tokens) = tokenize(text, file_name) else {
        return;
    };
    if args.tokens {
        let shown: Vec<String> = tokens.iter().map(ToString::to_string).collect();
        println!("[{}]", shown.join(", "));
    }
    if args.ast {
        if let Ok(node) = parse(&tokens) {
            println!("{}", format(&node));
        }
    }
}
