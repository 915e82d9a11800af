#![allow(dead_code)]
// tests/common/mocks.rs
//! In-memory `IntegrationTest` implementations

use std::{
    cell::Cell,
    path::{Path, PathBuf},
};

use integ_assert::{
    error::{AppError, Result},
    suite::IntegrationTest,
    synth_options::SynthOptions,
};
use serde_json::Value;

pub enum SynthBehavior {
    Produce(Value),
    Fail(String),
}

pub struct MockTest {
    name: String,
    expected_path: PathBuf,
    expected: Option<Value>,
    behavior: SynthBehavior,
    synth_calls: Cell<usize>,
}

impl MockTest {
    pub fn new(name: &str, expected: Value, actual: Value) -> Self {
        Self {
            name: name.to_string(),
            expected_path: PathBuf::from(format!("test/{name}.expected.json")),
            expected: Some(expected),
            behavior: SynthBehavior::Produce(actual),
            synth_calls: Cell::new(0),
        }
    }

    pub fn without_expected(mut self) -> Self {
        self.expected = None;
        self
    }

    pub fn with_synth_failure(mut self, message: &str) -> Self {
        self.behavior = SynthBehavior::Fail(message.to_string());
        self
    }

    pub fn synth_calls(&self) -> usize {
        self.synth_calls.get()
    }
}

impl IntegrationTest for MockTest {
    fn name(&self) -> &str {
        &self.name
    }

    fn expected_file_name(&self) -> &Path {
        &self.expected_path
    }

    fn has_expected(&self) -> bool {
        self.expected.is_some()
    }

    fn read_expected(&self) -> Result<Value> {
        Ok(self.expected.clone().unwrap_or_default())
    }

    fn synthesize(&self, _options: &SynthOptions) -> Result<Value> {
        self.synth_calls.set(self.synth_calls.get() + 1);
        match &self.behavior {
            SynthBehavior::Produce(value) => Ok(value.clone()),
            SynthBehavior::Fail(message) => Err(AppError::SynthFailed {
                name: self.name.clone(),
                status: "exit status: 1".to_string(),
                stderr: message.clone(),
            }),
        }
    }
}
