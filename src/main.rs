// src/main.rs
use anyhow::Context;
use clap::Parser;
use integ_assert::args::Args;
use integ_assert::config::Config;
use integ_assert::logging;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init(args.verbose);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let config = Config::try_from(args).context("invalid configuration")?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let verification = integ_assert::run(&config, &mut out)?;

    verification.into_result(&config.record_command)?;
    Ok(())
}
