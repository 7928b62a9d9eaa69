use crate::object::Object;
use crate::token::{Token, Type};

/// Sink for compile-time and runtime diagnostics (spec §6, "Diagnostic
/// sink"). Threaded through the scanner, parser, resolver, and interpreter
/// instead of process-global flags so the REPL can reset it per line and
/// tests can capture it in-process.
pub trait Reporter {
    /// A scan error at `line`, with no further positional context.
    fn scan_error(&mut self, line: usize, message: &str);
    /// A parse or resolve error anchored to the offending token.
    fn compile_error(&mut self, token: &Token, message: &str);
    /// A runtime error anchored to the offending token.
    fn runtime_error(&mut self, token: &Token, message: &str);

    fn had_error(&self) -> bool;
    fn had_runtime_error(&self) -> bool;
    /// Clears both flags. Used by the REPL between prompts.
    fn reset(&mut self);
}

/// Writes diagnostics to stderr in the format spec §6 fixes:
/// `"[line L] Error<where>: msg"` at compile time,
/// `"<msg>\n[line L]"` at runtime.
#[derive(Default)]
pub struct ConsoleReporter {
    had_error: bool,
    had_runtime_error: bool,
}

impl ConsoleReporter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Reporter for ConsoleReporter {
    fn scan_error(&mut self, line: usize, message: &str) {
        eprintln!("[line {line}] Error: {message}");
        self.had_error = true;
    }

    fn compile_error(&mut self, token: &Token, message: &str) {
        if token.r#type == Type::EOF {
            eprintln!("[line {}] Error at end: {message}", token.line);
        } else {
            eprintln!("[line {}] Error at '{}': {message}", token.line, token.lexeme);
        }
        self.had_error = true;
    }

    fn runtime_error(&mut self, token: &Token, message: &str) {
        eprintln!("{message}\n[line {}]", token.line);
        self.had_runtime_error = true;
    }

    fn had_error(&self) -> bool {
        self.had_error
    }

    fn had_runtime_error(&self) -> bool {
        self.had_runtime_error
    }

    fn reset(&mut self) {
        self.had_error = false;
        self.had_runtime_error = false;
    }
}

/// A [`Reporter`] that records diagnostics instead of printing them, used by
/// in-process tests.
#[derive(Default)]
pub struct CapturingReporter {
    pub scan_errors: Vec<(usize, String)>,
    pub compile_errors: Vec<String>,
    pub runtime_errors: Vec<String>,
    had_error: bool,
    had_runtime_error: bool,
}

impl CapturingReporter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Reporter for CapturingReporter {
    fn scan_error(&mut self, line: usize, message: &str) {
        self.scan_errors.push((line, message.to_string()));
        self.had_error = true;
    }

    fn compile_error(&mut self, token: &Token, message: &str) {
        self.compile_errors.push(format!("[line {}] {}: {message}", token.line, token.lexeme));
        self.had_error = true;
    }

    fn runtime_error(&mut self, token: &Token, message: &str) {
        self.runtime_errors.push(format!("{message}\n[line {}]", token.line));
        self.had_runtime_error = true;
    }

    fn had_error(&self) -> bool {
        self.had_error
    }

    fn had_runtime_error(&self) -> bool {
        self.had_runtime_error
    }

    fn reset(&mut self) {
        self.had_error = false;
        self.had_runtime_error = false;
        self.scan_errors.clear();
        self.compile_errors.clear();
        self.runtime_errors.clear();
    }
}

/// A diagnosed parse failure: unexpected token, missing terminator (spec §7,
/// taxon 2). Thrown with `?` inside the parser and reported at the
/// `declaration` synchronization boundary.
#[derive(Debug, Clone)]
pub struct ParseError {
    pub token: Token,
    pub message: String,
}

impl ParseError {
    pub fn new(token: Token, message: impl Into<String>) -> Self {
        ParseError { token, message: message.into() }
    }

    pub fn throw(&self, reporter: &mut dyn Reporter) {
        reporter.compile_error(&self.token, &self.message);
    }
}

/// A diagnosed runtime failure: wrong operand types, undefined
/// variable/property, uninitialized variable read, non-callable call, wrong
/// arity (spec §7, taxon 4). Carries the offending token so the reporter can
/// anchor the message to a source line.
#[derive(Debug, Clone)]
pub struct RuntimeError {
    pub token: Token,
    pub message: String,
}

impl RuntimeError {
    pub fn new(token: Token, message: impl Into<String>) -> Self {
        RuntimeError { token, message: message.into() }
    }

    pub fn throw(&self, reporter: &mut dyn Reporter) {
        reporter.runtime_error(&self.token, &self.message);
    }
}

/// Non-local control-flow signal. `return` surfaces as `Signal::Return`
/// rather than as an error value threaded all the way to the top, caught at
/// the nearest enclosing function call (spec §5, §9).
#[derive(Debug)]
pub enum Signal {
    Return(Object),
    Error(RuntimeError),
}

impl From<RuntimeError> for Signal {
    fn from(error: RuntimeError) -> Self {
        Signal::Error(error)
    }
}
