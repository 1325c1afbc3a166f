//! Digest command implementation
//!
//! Hashes raw text exactly as given, so a record saved from a browser run can
//! be checked against a digest reported elsewhere.

use anyhow::{Context, Result};
use colored::Colorize;
use std::process::ExitCode;

use envprint_core::digest_text;

use super::json_output::DigestOutput;
use crate::input::read_text;

/// Run the digest command
///
/// # Arguments
/// * `input` - File to read, or `None`/`-` for stdin
/// * `json_output` - Whether to output machine-readable JSON
pub fn run(input: Option<&str>, json_output: bool) -> Result<ExitCode> {
    let source = input.unwrap_or("-");
    let text = read_text(input).with_context(|| format!("failed to read input '{}'", source))?;
    let digest = digest_text(&text);
    log::debug!("hashed {} bytes from '{}'", text.len(), source);

    if json_output {
        let output = DigestOutput {
            digest: digest.into_string(),
            bytes: text.len(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{} {}", "Hash:".bold(), digest);
        println!("{}", format!("{} bytes from {}", text.len(), source).dimmed());
    }

    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_digest_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "abc").unwrap();
        let code = run(file.path().to_str(), true).unwrap();
        assert_eq!(code, ExitCode::SUCCESS);
    }

    #[test]
    fn test_missing_file_is_error() {
        let err = run(Some("/nonexistent/record.json"), false).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/record.json"));
    }
}
