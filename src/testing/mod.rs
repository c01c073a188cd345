//! # Test Runner
//!
//! Runs named test cases one after another, turning every error into a
//! printed, counted failure so a single broken endpoint never stops the
//! run.

use std::io::{self, Write};
use std::time::Instant;

use serde::Serialize;
use tracing::info;

use crate::error::Result;
use crate::history::History;

/// A named operation performing one round trip. On success it yields the
/// detail line shown under the test name.
pub struct TestCase<'a> {
    pub name: &'static str,
    operation: Box<dyn Fn() -> Result<String> + 'a>,
}

impl<'a> TestCase<'a> {
    pub fn new(name: &'static str, operation: impl Fn() -> Result<String> + 'a) -> Self {
        Self {
            name,
            operation: Box::new(operation),
        }
    }
}

/// Outcome of one case, as kept in the report.
#[derive(Debug, Clone, Serialize)]
pub struct CaseResult {
    pub name: String,
    pub passed: bool,
    pub message: String,
    pub duration_ms: u128,
}

/// Summary report for a whole run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub suite: String,
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub duration_ms: u128,
    pub results: Vec<CaseResult>,
    pub exchanges: History,
}

pub struct TestRunner<W: Write> {
    out: W,
    passed: usize,
    failed: usize,
    results: Vec<CaseResult>,
    started: Instant,
}

impl<W: Write> TestRunner<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            passed: 0,
            failed: 0,
            results: Vec::new(),
            started: Instant::now(),
        }
    }

    pub fn print_banner(&mut self, title: &str) -> io::Result<()> {
        writeln!(self.out, "=== {title} ===\n")
    }

    /// Run one case. Errors from the operation stop here; only I/O errors
    /// on the output sink are returned.
    pub fn run_test<F>(&mut self, name: &str, operation: F) -> io::Result<()>
    where
        F: FnOnce() -> Result<String>,
    {
        writeln!(self.out, "\nTEST: {name}")?;
        let started = Instant::now();
        let outcome = operation();
        let duration_ms = started.elapsed().as_millis();

        let (passed, message) = match outcome {
            Ok(detail) => {
                writeln!(self.out, "   {detail}")?;
                writeln!(self.out, "✅ PASSED")?;
                self.passed += 1;
                (true, detail)
            }
            Err(err) => {
                let message = err.to_string();
                writeln!(self.out, "❌ FAILED: {message}")?;
                self.failed += 1;
                (false, message)
            }
        };
        info!(test = name, passed, duration_ms = duration_ms as u64, "test finished");

        self.results.push(CaseResult {
            name: name.to_string(),
            passed,
            message,
            duration_ms,
        });
        Ok(())
    }

    pub fn run_suite(&mut self, cases: Vec<TestCase<'_>>) -> io::Result<()> {
        for case in cases {
            self.run_test(case.name, || (case.operation)())?;
        }
        Ok(())
    }

    pub fn print_summary(&mut self) -> io::Result<()> {
        writeln!(self.out, "\n=== TEST SUMMARY ===")?;
        writeln!(self.out, "PASSED: {}", self.passed)?;
        writeln!(self.out, "FAILED: {}", self.failed)?;
        writeln!(self.out, "TOTAL: {}", self.passed + self.failed)?;

        if self.failed == 0 {
            writeln!(self.out, "\n🎉 ALL TESTS PASSED!")?;
        } else {
            writeln!(self.out, "\n⚠️  Some tests failed, but all methods were tested!")?;
        }
        self.out.flush()
    }

    /// Consume the runner, releasing the output sink.
    pub fn finish(self, suite: &str, exchanges: History) -> (W, RunReport) {
        let report = RunReport {
            suite: suite.to_string(),
            total: self.passed + self.failed,
            passed: self.passed,
            failed: self.failed,
            duration_ms: self.started.elapsed().as_millis(),
            results: self.results,
            exchanges,
        };
        (self.out, report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn output(runner: TestRunner<Vec<u8>>) -> (String, RunReport) {
        let (out, report) = runner.finish("smoke", History::new());
        (String::from_utf8(out).unwrap(), report)
    }

    #[test]
    fn passing_case_prints_detail_then_marker() {
        let mut runner = TestRunner::new(Vec::new());
        runner
            .run_test("Get store inventory", || Ok("Inventory received - Available: 7".into()))
            .unwrap();

        let (text, report) = output(runner);
        assert_eq!(
            text,
            "\nTEST: Get store inventory\n   Inventory received - Available: 7\n✅ PASSED\n"
        );
        assert_eq!(report.passed, 1);
        assert_eq!(report.failed, 0);
    }

    #[test]
    fn failing_case_is_counted_and_swallowed() {
        let mut runner = TestRunner::new(Vec::new());
        runner
            .run_test("Get pet by ID", || {
                Err(Error::Status {
                    status: 404,
                    body: r#"{"message":"Pet not found"}"#.into(),
                })
            })
            .unwrap();
        runner.run_test("Logout user", || Ok("ok".into())).unwrap();

        let (text, report) = output(runner);
        assert_eq!((report.passed, report.failed), (1, 1));
        assert!(text.contains("❌ FAILED: HTTP 404: {\"message\":\"Pet not found\"}"));
        assert!(text.contains("\nTEST: Logout user\n"));
        assert!(!report.results[0].passed);
        assert!(report.results[1].passed);
    }

    #[test]
    fn summary_with_no_failures() {
        let mut runner = TestRunner::new(Vec::new());
        runner.print_banner("PETSTORE API TESTS").unwrap();
        runner.run_test("one", || Ok("done".into())).unwrap();
        runner.print_summary().unwrap();

        let (text, _) = output(runner);
        assert!(text.starts_with("=== PETSTORE API TESTS ===\n\n"));
        assert!(text.ends_with(
            "\n=== TEST SUMMARY ===\nPASSED: 1\nFAILED: 0\nTOTAL: 1\n\n🎉 ALL TESTS PASSED!\n"
        ));
    }

    #[test]
    fn summary_with_failures() {
        let mut runner = TestRunner::new(Vec::new());
        runner
            .run_test("one", || Err(Error::MissingField("id".into())))
            .unwrap();
        runner.print_summary().unwrap();

        let (text, report) = output(runner);
        assert!(text.contains("PASSED: 0\nFAILED: 1\nTOTAL: 1\n"));
        assert!(text.ends_with("⚠️  Some tests failed, but all methods were tested!\n"));
        assert_eq!(report.total, 1);
    }

    #[test]
    fn suite_runs_cases_in_order() {
        let cases = vec![
            TestCase::new("first", || Ok("a".into())),
            TestCase::new("second", || Err(Error::MissingField("code".into()))),
            TestCase::new("third", || Ok("c".into())),
        ];
        let mut runner = TestRunner::new(Vec::new());
        runner.run_suite(cases).unwrap();

        let (_, report) = output(runner);
        let names: Vec<_> = report.results.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["first", "second", "third"]);
        assert_eq!((report.passed, report.failed), (2, 1));
    }
}
