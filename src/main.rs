use std::{
    fs,
    io::{self, BufRead, Write},
    path::{Path, PathBuf},
    process,
};

use clap::Parser;
use lox::Lox;

/// lox runs scripts written in a small dynamically typed language, or starts
/// an interactive prompt when no script is given.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Writes each parsed program in prefix form before running it.
    #[arg(long)]
    print_ast: bool,

    /// The script to run. Without one, lines are read from standard input.
    script: Option<PathBuf>,
}

/// Installs a stderr subscriber filtered by `RUST_LOG`, if it is set.
fn init_tracing() {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry().with(fmt::layer().with_writer(io::stderr)
                                                        .with_target(true)
                                                        .with_level(true))
                                      .with(EnvFilter::from_default_env())
                                      .init();
    }
}

fn main() {
    init_tracing();
    let args = Args::parse();
    let mut lox = Lox::new(io::stdout()).print_ast(args.print_ast);

    match args.script {
        Some(path) => run_file(&mut lox, &path),
        None => run_prompt(&mut lox),
    }
}

fn run_file(lox: &mut Lox<io::Stdout>, path: &Path) {
    let source = fs::read_to_string(path).unwrap_or_else(|_| {
                     eprintln!("Failed to read the input file '{}'. Perhaps this file does not \
                                exist?",
                               path.display());
                     process::exit(1);
                 });

    let diagnostics = lox.run(&source);
    if !diagnostics.is_empty() {
        eprintln!("{diagnostics}");
    }

    let code = diagnostics.exit_code();
    if code != 0 {
        process::exit(code);
    }
}

/// Reads and runs one line at a time until a blank line or end of input.
///
/// Globals persist from line to line; errors are printed and the prompt
/// carries on.
fn run_prompt(lox: &mut Lox<io::Stdout>) {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("> ");
        if io::stdout().flush().is_err() {
            break;
        }

        let Some(Ok(line)) = lines.next() else {
            break;
        };
        if line.trim().is_empty() {
            break;
        }

        let diagnostics = lox.run(&line);
        if !diagnostics.is_empty() {
            eprintln!("{diagnostics}");
        }
    }
}
