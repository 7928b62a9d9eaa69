#![allow(clippy::needless_return)]

//! `rlox` is a tree-walking interpreter for Lox, the small dynamically-typed,
//! class-based scripting language from Bob Nystrom's
//! [Crafting Interpreters](https://craftinginterpreters.com/). It supports
//! variables, first-class functions and closures, classes with methods and
//! `init`, and the usual arithmetic/control-flow/string/boolean/nil
//! vocabulary.
//!
//! ## Pipeline
//! Source text moves through four stages, leaf to root:
//!
//! 1. **Scanning** ([`scanner`]) turns the raw source into a flat token
//!    stream, reporting lexical errors (an unterminated string, a stray
//!    character) without stopping the scan.
//! 2. **Parsing** ([`parser`]) turns tokens into [`Stmt`](stmt::Stmt)/
//!    [`Expr`](expr::Expr) trees via recursive descent, recovering from a
//!    malformed statement by synchronizing at the next statement boundary
//!    rather than aborting the whole parse.
//! 3. **Resolving** ([`resolver`]) walks the tree once before evaluation to
//!    bind every variable reference and `this` to a hop count — how many
//!    enclosing block scopes to skip to find its declaration — which is
//!    what makes closures see the binding they captured rather than
//!    whatever a later declaration of the same name shadows it with.
//! 4. **Interpreting** ([`interpreter`]) walks the tree a second time,
//!    evaluating it against a chain of [`Environment`](environment::Environment)s
//!    rooted in a persistent `globals` scope.
//!
//! Diagnostics (scan/parse/resolve/runtime errors) flow out through a
//! [`Reporter`](error::Reporter) rather than a global flag, so a long-lived
//! REPL session can give each line a fresh one while the interpreter and its
//! globals persist across lines.

use std::cell::RefCell;
use std::fs;
use std::io::Write;
use std::rc::Rc;

pub mod class;
pub mod environment;
pub mod error;
pub mod expr;
pub mod function;
pub mod interpreter;
pub mod literal;
pub mod object;
pub mod parser;
pub mod resolver;
pub mod scanner;
pub mod stmt;
pub mod token;

use environment::Environment;
use error::Reporter;
use interpreter::Interpreter;
use parser::Parser;
use resolver::Resolver;
use scanner::Scanner;
use stmt::Stmt;

/// Exit codes the CLI front-end maps diagnostics to (spec §6).
pub mod exit_code {
    pub const USAGE: i32 = 64;
    pub const COMPILE_ERROR: i32 = 65;
    pub const RUNTIME_ERROR: i32 = 70;
}

/// A running Lox session: just the persistent `globals` environment, since
/// everything else (tokens, AST, the resolver's hop map) is rebuilt fresh
/// per `run`. One `Lox` backs an entire file run or an entire REPL session;
/// a REPL's repeated `run`s share this same globals scope, which is what
/// lets a function declared on one line call one declared on an earlier
/// line.
pub struct Lox {
    globals: Rc<RefCell<Environment>>,
}

impl Lox {
    pub fn new() -> Self {
        let globals = Environment::new(None);
        Interpreter::define_natives(&globals);
        Lox { globals }
    }

    /// Runs a complete program: scan, parse, resolve, interpret, stopping
    /// early the moment any stage reports a compile error (spec §7: "If the
    /// compile-error flag is set after parse or after resolve, the program
    /// is skipped entirely"). Returns nothing; outcomes are observable
    /// through `reporter` and whatever `stdout` captured.
    pub fn run(&mut self, source: &str, reporter: &mut dyn Reporter, stdout: &mut dyn Write) {
        let statements = self.parse_statements(source, reporter);
        self.run_statements(&statements, reporter, stdout);
    }

    /// Runs one REPL line. A line with no `;` is first tried as a single
    /// expression followed by end of input; if that parses, its value is
    /// printed with `stringify` exactly as `print` would (spec §6, "REPL").
    /// Otherwise (or if expression-mode parsing fails) the line is parsed as
    /// an ordinary sequence of declarations/statements.
    pub fn run_line(&mut self, line: &str, reporter: &mut dyn Reporter, stdout: &mut dyn Write) {
        let mut scanner = Scanner::new(line);
        let tokens = scanner.scan_tokens(reporter);
        if reporter.had_error() {
            return;
        }

        let statements = if !line.contains(';') {
            let mut parser = Parser::new(tokens.clone(), reporter);
            match parser.parse_single_expression() {
                Some(expr) => vec![Stmt::Print(expr)],
                None => Parser::new(tokens, reporter).parse(),
            }
        } else {
            Parser::new(tokens, reporter).parse()
        };

        self.run_statements(&statements, reporter, stdout);
    }

    fn parse_statements(&mut self, source: &str, reporter: &mut dyn Reporter) -> Vec<Stmt> {
        let mut scanner = Scanner::new(source);
        let tokens = scanner.scan_tokens(reporter);
        if reporter.had_error() {
            return Vec::new();
        }

        Parser::new(tokens, reporter).parse()
    }

    fn run_statements(&mut self, statements: &[Stmt], reporter: &mut dyn Reporter, stdout: &mut dyn Write) {
        if reporter.had_error() {
            return;
        }

        let locals = Resolver::new(reporter).resolve(statements);
        if reporter.had_error() {
            return;
        }

        let mut interpreter = Interpreter::with_globals(Rc::clone(&self.globals), reporter, stdout);
        interpreter.resolve(locals);
        interpreter.interpret(statements);
    }

    /// Reads `path` as UTF-8 source and runs it. Panics if the file can't be
    /// read; mapping that failure to an exit code is the CLI's job, not the
    /// core's.
    pub fn run_file(&mut self, path: &str, reporter: &mut dyn Reporter, stdout: &mut dyn Write) {
        let source = fs::read_to_string(path).unwrap_or_else(|e| panic!("couldn't read {path}: {e}"));
        self.run(&source, reporter, stdout);
    }
}

impl Default for Lox {
    fn default() -> Self {
        Self::new()
    }
}
