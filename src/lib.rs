// src/lib.rs
//! Verify that integration test apps still synthesize to the templates
//! recorded next to them.

pub mod args;
pub mod config;
pub mod error;
pub mod logging;
pub mod parsers;
pub mod presentation;
pub mod runner;
pub mod suite;
pub mod synth;
pub mod synth_options;

use std::io::Write;
use std::rc::Rc;
use tracing::info;

use crate::config::Config;
use crate::error::Result;
use crate::runner::Verification;
use crate::suite::IntegrationTests;
use crate::synth::CommandSynthesizer;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Discover the tests described by `config` and verify all of them,
/// writing progress to `out`.
///
/// # Errors
/// Returns an error if discovery fails or any test aborts the run. Changed
/// tests are not errors here; see [`Verification::into_result`].
pub fn run<W: Write + ?Sized>(config: &Config, out: &mut W) -> Result<Verification> {
    let synthesizer = Rc::new(CommandSynthesizer::from_command_line(&config.synth_command)?);
    let tests = IntegrationTests::new(&config.directory, &config.extension)
        .from_cli_args(&config.tests, synthesizer)?;

    info!(
        count = tests.len(),
        directory = %config.directory.display(),
        "verifying integration tests"
    );
    runner::verify_all(&tests, &config.synth_options, &config.record_command, out)
}
