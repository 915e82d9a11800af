// src/presentation.rs
use std::time::Duration;

use crate::runner::{Status, Timing};

/// Seconds with millisecond precision, e.g. `1.250`.
#[must_use]
pub fn format_seconds(duration: Duration) -> String {
    format!("{:.3}", duration.as_secs_f64())
}

/// `<total> seconds: synth=<s> + diff=<s>`
#[must_use]
pub fn format_timing(timing: &Timing) -> String {
    format!(
        "{} seconds: synth={} + diff={}",
        format_seconds(timing.total()),
        format_seconds(timing.synth),
        format_seconds(timing.diff)
    )
}

/// Completion of a `Verifying ... ` line, without the newline.
#[must_use]
pub fn status_line(status: Status, timing: &Timing) -> String {
    let label = match status {
        Status::Ok => "OK",
        Status::Changed => "CHANGED",
    };
    format!("{label} ({}).", format_timing(timing))
}
