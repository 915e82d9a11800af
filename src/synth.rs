// src/synth.rs
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::process::{Command, Stdio};
use tracing::{debug, trace};

use crate::error::{AppError, Result};
use crate::suite::read_json;
use crate::synth_options::SynthOptions;

pub const TEMPLATE_SUFFIX: &str = ".template.json";

/// Turns an integration test app into its output artifact.
pub trait Synthesizer {
    /// Synthesize `app` (a file name inside `directory`).
    ///
    /// # Errors
    /// Returns an error if the app cannot be run or its output cannot be read.
    fn synthesize(&self, directory: &Path, app: &str, options: &SynthOptions) -> Result<Value>;
}

/// Runs each app as `<program> <args...> <app>` and reads the templates it
/// writes into `CDK_OUTDIR`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSynthesizer {
    program: String,
    args: Vec<String>,
}

impl CommandSynthesizer {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Split a command line such as `node --enable-source-maps` on whitespace.
    ///
    /// # Errors
    /// Returns an error if the command line is empty.
    pub fn from_command_line(command: &str) -> Result<Self> {
        let mut words = command.split_whitespace().map(str::to_string);
        let program = words
            .next()
            .ok_or_else(|| AppError::Config("synth command is empty".to_string()))?;
        Ok(Self::new(program, words.collect()))
    }
}

impl Synthesizer for CommandSynthesizer {
    fn synthesize(&self, directory: &Path, app: &str, options: &SynthOptions) -> Result<Value> {
        let outdir = tempfile::Builder::new().prefix("integ-assert-").tempdir()?;
        debug!(program = %self.program, app, outdir = %outdir.path().display(), "synthesizing");

        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(app)
            .current_dir(directory)
            .env("CDK_CONTEXT_JSON", options.context_json())
            .env("CDK_OUTDIR", outdir.path())
            .envs(&options.env)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| AppError::SynthSpawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.stdout.is_empty() {
            trace!(app, stdout = %String::from_utf8_lossy(&output.stdout), "synth stdout");
        }
        if !output.status.success() {
            return Err(AppError::SynthFailed {
                name: app.to_string(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim_end().to_string(),
            });
        }

        read_assembly(app, outdir.path())
    }
}

/// Collect the `*.template.json` files of a synthesis output directory.
///
/// A single template is returned as is; several are returned as an object
/// keyed by stack name.
///
/// # Errors
/// Returns an error if the directory cannot be read, a template is not
/// valid JSON, or no template was written.
pub fn read_assembly(name: &str, outdir: &Path) -> Result<Value> {
    let mut templates = BTreeMap::new();
    for entry in fs::read_dir(outdir)? {
        let path = entry?.path();
        let Some(stack) = path
            .file_name()
            .and_then(|f| f.to_str())
            .and_then(|f| f.strip_suffix(TEMPLATE_SUFFIX))
            .map(str::to_string)
        else {
            continue;
        };
        templates.insert(stack, read_json(&path)?);
    }

    match templates.len() {
        0 => Err(AppError::NoTemplates {
            name: name.to_string(),
            outdir: outdir.to_path_buf(),
        }),
        1 => Ok(templates.into_values().next().unwrap_or_default()),
        _ => Ok(Value::Object(templates.into_iter().collect())),
    }
}
