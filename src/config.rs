// src/config.rs
use derive_builder::Builder;
use std::path::PathBuf;

use crate::args::Args;
use crate::error::AppError;
use crate::synth_options::SynthOptions;

pub const DEFAULT_DIRECTORY: &str = "test";
pub const DEFAULT_EXTENSION: &str = "js";
pub const DEFAULT_SYNTH_COMMAND: &str = "node";
pub const DEFAULT_RECORD_COMMAND: &str = "npm run integ";

#[derive(Debug, Clone, Builder)]
#[builder(setter(into))]
pub struct Config {
    #[builder(default = "PathBuf::from(DEFAULT_DIRECTORY)")]
    pub directory: PathBuf,
    #[builder(default = "DEFAULT_EXTENSION.to_string()")]
    pub extension: String,
    #[builder(default = "DEFAULT_SYNTH_COMMAND.to_string()")]
    pub synth_command: String,
    #[builder(default = "DEFAULT_RECORD_COMMAND.to_string()")]
    pub record_command: String,
    #[builder(default)]
    pub synth_options: SynthOptions,
    /// Test names from the command line. Accepted, never used for selection.
    #[builder(default)]
    pub tests: Vec<String>,
}

impl TryFrom<Args> for Config {
    type Error = AppError;

    fn try_from(args: Args) -> Result<Self, Self::Error> {
        let synth_options = match &args.synth_options {
            Some(path) => SynthOptions::from_file(path)?,
            None => SynthOptions::default(),
        };

        ConfigBuilder::default()
            .directory(args.directory)
            .extension(args.extension)
            .synth_command(args.synth_command)
            .record_command(args.record_command)
            .synth_options(synth_options)
            .tests(args.tests)
            .build()
            .map_err(|e| AppError::Config(e.to_string()))
    }
}
