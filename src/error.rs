// src/error.rs
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("No such file: {path}. Run '{record_command}'.")]
    MissingExpected { path: PathBuf, record_command: String },

    #[error(
        "Some stacks have changed. To verify that they still deploy successfully, run: '{record_command} {}'",
        .failures.join(" ")
    )]
    StacksChanged {
        failures: Vec<String>,
        record_command: String,
    },

    #[error("Failed to read '{path}'")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in '{path}'")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid synth options in '{path}'")]
    SynthOptions {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Cannot list integration tests in '{dir}'")]
    Discovery {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to start '{program}'")]
    SynthSpawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Synthesis of {name} failed ({status}):\n{stderr}")]
    SynthFailed {
        name: String,
        status: String,
        stderr: String,
    },

    #[error("Synthesis of {name} produced no templates in '{outdir}'")]
    NoTemplates { name: String, outdir: PathBuf },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AppError>;
