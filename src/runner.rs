// src/runner.rs
//! Sequential verification of integration tests against their recorded
//! expectations.

use integ_assert_diff::{diff_template, format_differences};
use std::io::Write;
use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::error::{AppError, Result};
use crate::presentation;
use crate::suite::IntegrationTest;
use crate::synth_options::SynthOptions;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    Changed,
}

/// Wall-clock time spent on one test. Only used for reporting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Timing {
    pub synth: Duration,
    pub diff: Duration,
}

impl Timing {
    #[must_use]
    pub fn total(&self) -> Duration {
        self.synth + self.diff
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestOutcome {
    pub name: String,
    pub status: Status,
    pub differences: usize,
    pub timing: Timing,
}

/// Everything a finished run produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Verification {
    pub outcomes: Vec<TestOutcome>,
    /// Names of changed tests in the order they were found.
    pub failures: Vec<String>,
}

impl Verification {
    fn record(&mut self, outcome: TestOutcome) {
        if outcome.status == Status::Changed {
            self.failures.push(outcome.name.clone());
        }
        self.outcomes.push(outcome);
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Turn the run into its final verdict.
    ///
    /// # Errors
    /// Returns [`AppError::StacksChanged`] naming every changed test if any
    /// test changed.
    pub fn into_result(self, record_command: &str) -> Result<()> {
        if self.is_success() {
            return Ok(());
        }
        Err(AppError::StacksChanged {
            failures: self.failures,
            record_command: record_command.to_string(),
        })
    }
}

/// Verify every test in order, writing progress to `out` as it goes.
///
/// Changed tests are collected in the returned [`Verification`]; any other
/// problem, including a missing expected file, stops the run at once.
///
/// # Errors
/// Returns the first error raised while checking, reading, synthesizing or
/// writing output.
pub fn verify_all<T, W>(
    tests: &[T],
    options: &SynthOptions,
    record_command: &str,
    out: &mut W,
) -> Result<Verification>
where
    T: IntegrationTest,
    W: Write + ?Sized,
{
    let verification = tests
        .iter()
        .try_fold(Verification::default(), |mut acc, test| {
            acc.record(verify_one(test, options, record_command, out)?);
            Ok::<_, AppError>(acc)
        })?;

    info!(
        tests = verification.outcomes.len(),
        changed = verification.failures.len(),
        "verification finished"
    );
    Ok(verification)
}

/// Verify a single test.
///
/// # Errors
/// See [`verify_all`].
pub fn verify_one<T, W>(
    test: &T,
    options: &SynthOptions,
    record_command: &str,
    out: &mut W,
) -> Result<TestOutcome>
where
    T: IntegrationTest + ?Sized,
    W: Write + ?Sized,
{
    let expected_file = test.expected_file_name();
    write!(
        out,
        "Verifying {} against {} ... ",
        test.name(),
        expected_file.display()
    )?;
    out.flush()?;

    if !test.has_expected() {
        return Err(AppError::MissingExpected {
            path: expected_file.to_path_buf(),
            record_command: record_command.to_string(),
        });
    }

    let expected = test.read_expected()?;

    let started = Instant::now();
    let actual = test.synthesize(options)?;
    let synth = started.elapsed();

    let diff_started = Instant::now();
    let diff = diff_template(&expected, &actual);
    let timing = Timing {
        synth,
        diff: diff_started.elapsed(),
    };

    let status = if diff.is_empty() {
        Status::Ok
    } else {
        Status::Changed
    };
    writeln!(out, "{}", presentation::status_line(status, &timing))?;
    if status == Status::Changed {
        format_differences(out, &diff)?;
    }
    out.flush()?;

    debug!(
        test = test.name(),
        ?status,
        differences = diff.differences_count(),
        synth = %presentation::format_seconds(timing.synth),
        diff = %presentation::format_seconds(timing.diff),
        "verified"
    );

    Ok(TestOutcome {
        name: test.name().to_string(),
        status,
        differences: diff.differences_count(),
        timing,
    })
}
