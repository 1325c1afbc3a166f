//! Probe command implementation
//!
//! Runs the graphics or audio probe against a host profile and displays the
//! digest together with the raw record.

use anyhow::{Context, Result};
use colored::Colorize;
use log::{debug, info};
use std::process::ExitCode;

use envprint_core::{run_probe, Digest, Probe, ProfileHost, Report};

use super::json_output::{error_codes, JsonError, ProbeOutput};
use crate::input::resolve_profile;

/// Run a probe command
///
/// # Arguments
/// * `probe` - Which collector to run
/// * `profile_arg` - Built-in profile name or path to a profile file
/// * `json_output` - Whether to output machine-readable JSON
/// * `expect` - Digest the result must match
///
/// # Returns
/// Exit code: 0 on success, 1 on error or digest mismatch
pub fn run(
    probe: Probe,
    profile_arg: &str,
    json_output: bool,
    expect: Option<&str>,
) -> Result<ExitCode> {
    let expected = expect
        .map(|s| s.parse::<Digest>())
        .transpose()
        .context("invalid --expect value")?;

    let profile = match resolve_profile(profile_arg) {
        Ok(profile) => profile,
        Err(e) if json_output => {
            let error = JsonError::new(error_codes::PROFILE_LOAD, e.to_string());
            let output = ProbeOutput::failure(probe, None, vec![error]);
            println!("{}", serde_json::to_string_pretty(&output)?);
            return Ok(ExitCode::from(1));
        }
        Err(e) => {
            return Err(e).with_context(|| format!("failed to load profile '{}'", profile_arg))
        }
    };
    let profile_name = profile.name.clone();
    let host = ProfileHost::new(profile);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .context("failed to start async runtime")?;
    let result = runtime.block_on(run_probe(probe, &host));
    debug!(
        "{} probe finished, {} audio context(s) left open",
        probe,
        host.open_audio_contexts()
    );

    match result {
        Ok(report) => {
            info!("{} digest for '{}': {}", probe, profile_name, report.digest());
            let matches = expected.as_ref().map(|e| e == report.digest());
            if json_output {
                let output = ProbeOutput::success(profile_name, &report, matches)?;
                println!("{}", serde_json::to_string_pretty(&output)?);
                return Ok(exit_code(output.success));
            }
            print_report(&profile_name, &report, expected.as_ref())?;
            Ok(exit_code(matches != Some(false)))
        }
        Err(e) => {
            if json_output {
                let output =
                    ProbeOutput::failure(probe, Some(profile_name), vec![JsonError::from(&e)]);
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                eprintln!("{} {}", "Error:".red().bold(), e);
            }
            Ok(ExitCode::from(1))
        }
    }
}

fn exit_code(success: bool) -> ExitCode {
    if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    }
}

/// Prints a report with human-readable (colored) output.
fn print_report(profile_name: &str, report: &Report, expected: Option<&Digest>) -> Result<()> {
    let title = match report.probe() {
        Probe::Graphics => "Graphics fingerprint",
        Probe::Audio => "Audio fingerprint",
    };
    println!("{} {}", title.cyan().bold(), format!("({})", profile_name).dimmed());
    println!("{} {}", "Hash:".bold(), report.digest());

    if let Report::Graphics(fp) = report {
        let failed = fp.record.failed_parameters();
        if !failed.is_empty() {
            println!(
                "{} {} parameter quer{} failed: {}",
                "!!".yellow(),
                failed.len(),
                if failed.len() == 1 { "y" } else { "ies" },
                failed.join(", ")
            );
        }
    }

    if let Some(expected) = expected {
        if expected == report.digest() {
            println!("{} digest matches expected value", "ok".green());
        } else {
            println!(
                "{} digest mismatch (expected {})",
                "!!".red(),
                expected.as_str().dimmed()
            );
        }
    }

    println!();
    println!("{}", "Details:".bold());
    println!("{}", report.details()?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_expect_is_error() {
        let err = run(Probe::Graphics, "windows-nvidia", false, Some("xyz")).unwrap_err();
        assert!(err.to_string().contains("--expect"));
    }

    #[test]
    fn test_unknown_profile_is_error() {
        let err = run(Probe::Audio, "no-such-profile", false, None).unwrap_err();
        assert!(err.to_string().contains("no-such-profile"));
    }

    #[test]
    fn test_unknown_profile_json_exits_1() {
        let code = run(Probe::Audio, "no-such-profile", true, None).unwrap();
        assert_eq!(code, ExitCode::from(1));
    }

    #[test]
    fn test_headless_graphics_exits_1() {
        let code = run(Probe::Graphics, "headless", false, None).unwrap();
        assert_eq!(code, ExitCode::from(1));
    }

    #[test]
    fn test_builtin_probe_succeeds() {
        let code = run(Probe::Audio, "windows-nvidia", true, None).unwrap();
        assert_eq!(code, ExitCode::SUCCESS);
    }

    #[test]
    fn test_expect_mismatch_exits_1() {
        let wrong = "0".repeat(64);
        let code = run(Probe::Graphics, "macos-apple-m1", false, Some(&wrong)).unwrap();
        assert_eq!(code, ExitCode::from(1));
    }
}
