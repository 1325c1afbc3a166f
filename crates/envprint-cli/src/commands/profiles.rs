//! Host profile command implementations.

use anyhow::{Context, Result};
use colored::Colorize;
use std::process::ExitCode;

use envprint_core::profile::builtin_profiles;
use envprint_core::{pretty_json, HostProfile};

use super::json_output::ProfileSummary;
use crate::input::resolve_profile;

fn summarize(profile: &HostProfile) -> ProfileSummary {
    ProfileSummary {
        name: profile.name.clone(),
        description: profile.description.clone(),
        graphics: profile.graphics.is_some(),
        audio: profile.audio.is_some(),
    }
}

fn capability_label(present: bool, name: &str) -> String {
    if present {
        name.green().to_string()
    } else {
        format!("no {}", name).dimmed().to_string()
    }
}

/// Lists the built-in host profiles.
pub fn list(json: bool) -> Result<ExitCode> {
    let profiles = builtin_profiles().context("failed to load built-in profiles")?;
    let summaries: Vec<ProfileSummary> = profiles.iter().map(summarize).collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
        return Ok(ExitCode::SUCCESS);
    }

    println!("{}", "Built-in profiles".cyan().bold());
    for summary in &summaries {
        println!(
            "  {:<20} [{}, {}]",
            summary.name.bold(),
            capability_label(summary.graphics, "graphics"),
            capability_label(summary.audio, "audio"),
        );
        if !summary.description.is_empty() {
            println!("  {:<20} {}", "", summary.description.dimmed());
        }
    }
    Ok(ExitCode::SUCCESS)
}

/// Prints a profile (built-in name or file path) as JSON.
pub fn show(name: &str) -> Result<ExitCode> {
    let profile =
        resolve_profile(name).with_context(|| format!("failed to load profile '{}'", name))?;
    println!("{}", pretty_json(&profile)?);
    Ok(ExitCode::SUCCESS)
}
