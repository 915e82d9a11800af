// src/parsers.rs
//! Value parsers for CLI arguments.

/// Parse the file extension of integration apps (`js`, `.ts`, `sh`).
///
/// A leading dot is stripped.
///
/// # Errors
/// Returns an error if the extension is empty or contains path separators
/// or glob metacharacters.
pub fn parse_extension(s: &str) -> Result<String, String> {
    let ext = s.trim().trim_start_matches('.');
    if ext.is_empty() {
        return Err("extension must not be empty".to_string());
    }
    if let Some(c) = ext
        .chars()
        .find(|c| matches!(c, '/' | '\\' | '*' | '?' | '[' | ']' | '{' | '}' | '!'))
    {
        return Err(format!("invalid character '{c}' in extension: {s}"));
    }
    Ok(ext.to_string())
}

/// Parse a command line that must name at least a program.
///
/// # Errors
/// Returns an error if the input is blank.
pub fn parse_command(s: &str) -> Result<String, String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        Err("command must not be empty".to_string())
    } else {
        Ok(trimmed.to_string())
    }
}
