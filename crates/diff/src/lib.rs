// crates/diff/src/lib.rs
//! Structural comparison of CloudFormation-style template documents.
//!
//! [`diff_template`] compares two documents section by section and
//! [`format_differences`] renders the resulting [`TemplateDiff`] to any
//! [`std::io::Write`] sink.

pub mod diff;
pub mod format;
pub mod template;

pub use diff::{
    ChangeKind, EntityChange, PropertyChange, ResourceChange, TemplateDiff, ValueChange,
    diff_template,
};
pub use format::{format_differences, format_to_string};
