use std::io::{self, Write};
use std::process;

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use rlox::error::{ConsoleReporter, Reporter};
use rlox::{exit_code, Lox};

const USAGE: &str = "Usage: rlox [-h|--help] [script]";

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();

    if args.iter().any(|arg| arg == "-h" || arg == "--help") {
        println!("{USAGE}");
        process::exit(0);
    }

    match args.len() {
        0 => run_prompt(),
        1 => run_file(&args[0]),
        _ => {
            eprintln!("{USAGE}");
            process::exit(exit_code::USAGE);
        },
    }
}

/// Reads `path`, runs it to completion, and maps the outcome to the exit
/// codes spec §6 fixes: 65 for a compile error, 70 for a runtime error, 0
/// otherwise.
fn run_file(path: &str) {
    let mut lox = Lox::new();
    let mut reporter = ConsoleReporter::new();
    let stdout = io::stdout();
    let mut handle = stdout.lock();

    lox.run_file(path, &mut reporter, &mut handle);

    if reporter.had_error() {
        process::exit(exit_code::COMPILE_ERROR);
    }
    if reporter.had_runtime_error() {
        process::exit(exit_code::RUNTIME_ERROR);
    }
}

/// One prompt per line, persisting the interpreter (and its globals) across
/// lines while giving each line its own diagnostics sink (spec §6, "REPL").
/// An empty line ends the session.
fn run_prompt() {
    let mut lox = Lox::new();
    let history_path = home::home_dir().map(|home| home.join(".rlox_history"));

    let mut editor = DefaultEditor::new().expect("line editor initializes");
    if let Some(path) = &history_path {
        let _ = editor.load_history(path);
    }

    loop {
        match editor.readline("> ") {
            Ok(line) => {
                if line.is_empty() {
                    break;
                }
                let _ = editor.add_history_entry(line.as_str());

                let mut reporter = ConsoleReporter::new();
                let stdout = io::stdout();
                let mut handle = stdout.lock();
                lox.run_line(&line, &mut reporter, &mut handle);
            },
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(err) => {
                eprintln!("Readline error: {err}");
                break;
            },
        }
    }

    if let Some(path) = &history_path {
        let _ = editor.save_history(path);
    }
}
