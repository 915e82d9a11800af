// src/suite.rs
//! Discovery of integration test apps and their recorded expectations.

use globset::{GlobBuilder, GlobMatcher};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tracing::debug;

use crate::error::{AppError, Result};
use crate::synth::Synthesizer;
use crate::synth_options::SynthOptions;

pub const EXPECTED_SUFFIX: &str = ".expected.json";

/// One integration test as seen by the verifier.
pub trait IntegrationTest {
    /// Unique name of the test within a run.
    fn name(&self) -> &str;

    /// Where the recorded expected artifact lives.
    fn expected_file_name(&self) -> &Path;

    fn has_expected(&self) -> bool {
        self.expected_file_name().is_file()
    }

    /// Read the recorded artifact.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or is not valid JSON.
    fn read_expected(&self) -> Result<Value> {
        read_json(self.expected_file_name())
    }

    /// Synthesize the current artifact.
    ///
    /// # Errors
    /// Returns an error if synthesis fails.
    fn synthesize(&self, options: &SynthOptions) -> Result<Value>;
}

/// An integration test app file synthesized by a [`Synthesizer`].
pub struct AppTest {
    name: String,
    directory: PathBuf,
    expected: PathBuf,
    synthesizer: Rc<dyn Synthesizer>,
}

impl std::fmt::Debug for AppTest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppTest")
            .field("name", &self.name)
            .field("directory", &self.directory)
            .field("expected", &self.expected)
            .finish_non_exhaustive()
    }
}

impl IntegrationTest for AppTest {
    fn name(&self) -> &str {
        &self.name
    }

    fn expected_file_name(&self) -> &Path {
        &self.expected
    }

    fn synthesize(&self, options: &SynthOptions) -> Result<Value> {
        self.synthesizer
            .synthesize(&self.directory, &self.name, options)
    }
}

/// Loader for the apps of one test directory.
///
/// Apps are files named `integ.*.<extension>` directly inside the directory.
#[derive(Debug, Clone)]
pub struct IntegrationTests {
    directory: PathBuf,
    extension: String,
}

impl IntegrationTests {
    pub fn new(directory: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            extension: extension.into(),
        }
    }

    fn matcher(&self) -> Result<GlobMatcher> {
        let pattern = format!("integ.*.{}", self.extension);
        let glob = GlobBuilder::new(&pattern)
            .literal_separator(true)
            .build()
            .map_err(|e| AppError::Config(format!("bad test pattern '{pattern}': {e}")))?;
        Ok(glob.compile_matcher())
    }

    /// File names of all apps in the directory, sorted.
    ///
    /// # Errors
    /// Returns an error if the directory cannot be listed.
    pub fn discover(&self) -> Result<Vec<String>> {
        let matcher = self.matcher()?;
        let discovery_error = |source| AppError::Discovery {
            dir: self.directory.clone(),
            source,
        };

        let mut names = Vec::new();
        for entry in fs::read_dir(&self.directory).map_err(discovery_error)? {
            let entry = entry.map_err(discovery_error)?;
            // Follows symlinks, so linked apps count as files.
            if !entry.path().is_file() {
                continue;
            }
            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                continue;
            };
            if matcher.is_match(&name) && !name.ends_with(EXPECTED_SUFFIX) {
                names.push(name);
            }
        }
        names.sort();
        debug!(count = names.len(), dir = %self.directory.display(), "discovered integration tests");
        Ok(names)
    }

    /// Recorded expectation for an app: `integ.foo.js` -> `integ.foo.expected.json`.
    #[must_use]
    pub fn expected_file_name(&self, name: &str) -> PathBuf {
        let suffix = format!(".{}", self.extension);
        let stem = name.strip_suffix(&suffix).unwrap_or(name);
        self.directory.join(format!("{stem}{EXPECTED_SUFFIX}"))
    }

    /// Build the tests for a run.
    ///
    /// Test names given on the command line are accepted but not used for
    /// selection: the verifier always checks every discovered app.
    ///
    /// # Errors
    /// Returns an error if discovery fails.
    pub fn from_cli_args(
        &self,
        names: &[String],
        synthesizer: Rc<dyn Synthesizer>,
    ) -> Result<Vec<AppTest>> {
        if !names.is_empty() {
            debug!(?names, "test selection ignored; verifying all tests");
        }

        Ok(self
            .discover()?
            .into_iter()
            .map(|name| AppTest {
                expected: self.expected_file_name(&name),
                directory: self.directory.clone(),
                synthesizer: Rc::clone(&synthesizer),
                name,
            })
            .collect())
    }
}

pub(crate) fn read_json(path: &Path) -> Result<Value> {
    let text = fs::read_to_string(path).map_err(|source| AppError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| AppError::Json {
        path: path.to_path_buf(),
        source,
    })
}
