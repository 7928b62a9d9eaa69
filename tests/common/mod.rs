use rlox::error::{CapturingReporter, Reporter};
use rlox::Lox;

/// Runs a complete Lox program against a fresh [`Lox`] session and hands
/// back what it printed plus the diagnostics it reported, so tests can
/// assert on either without touching a subprocess (spec §8's scenarios are
/// all expressible this way).
pub fn run(source: &str) -> (String, CapturingReporter) {
    let mut reporter = CapturingReporter::new();
    let mut output: Vec<u8> = Vec::new();
    let mut lox = Lox::new();

    lox.run(source, &mut reporter, &mut output);

    (String::from_utf8(output).expect("print only ever writes UTF-8"), reporter)
}

/// Asserts that `source` runs cleanly and prints exactly `expected` (already
/// newline-terminated per line, matching what `print` emits).
#[macro_export]
macro_rules! assert_prints {
    ($source:expr, $expected:expr) => {{
        let (output, reporter) = $crate::common::run($source);
        assert!(!reporter.had_error(), "unexpected compile error(s): {:?}", reporter.compile_errors);
        assert!(!reporter.had_runtime_error(), "unexpected runtime error: {:?}", reporter.runtime_errors);
        assert_eq!(output, $expected);
    }};
}

/// Asserts that `source` raises a runtime error whose message contains
/// `needle`, and that nothing after the failing statement printed.
#[macro_export]
macro_rules! assert_runtime_error {
    ($source:expr, $needle:expr) => {{
        let (_output, reporter) = $crate::common::run($source);
        assert!(reporter.had_runtime_error(), "expected a runtime error, got none");
        assert!(
            reporter.runtime_errors.iter().any(|e| e.contains($needle)),
            "expected a runtime error containing {:?}, got {:?}",
            $needle,
            reporter.runtime_errors
        );
    }};
}

/// Asserts that `source` fails to compile (scan, parse, or resolve) with a
/// diagnostic containing `needle`, and that the interpreter never ran.
#[macro_export]
macro_rules! assert_compile_error {
    ($source:expr, $needle:expr) => {{
        let (output, reporter) = $crate::common::run($source);
        assert!(reporter.had_error(), "expected a compile error, got none");
        assert!(!reporter.had_runtime_error(), "compile errors should skip interpretation entirely");
        assert_eq!(output, "", "compile errors should skip interpretation entirely");
        let all = reporter
            .scan_errors
            .iter()
            .map(|(_, m)| m.clone())
            .chain(reporter.compile_errors.iter().cloned())
            .collect::<Vec<_>>();
        assert!(
            all.iter().any(|e| e.contains($needle)),
            "expected a compile error containing {:?}, got {:?}",
            $needle,
            all
        );
    }};
}
