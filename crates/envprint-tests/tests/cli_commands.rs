//! Integration tests for the envprint CLI commands.
//!
//! Commands are invoked through the `envprint_cli` library with built-in
//! profiles and profile files written to temporary directories.

use std::fs;
use std::process::ExitCode;

use pretty_assertions::assert_eq;
use tempfile::TempDir;

use envprint_cli::commands::json_output::{error_codes, ProbeOutput};
use envprint_cli::commands::{digest, probe, profiles};
use envprint_cli::input::resolve_profile;
use envprint_core::{digest_text, run_probe, Probe, ProfileHost};

const YAML_PROFILE: &str = r#"
name: yaml-host
description: Studio interface without graphics
audio:
  sample_rate: 96000
  max_channel_count: 8
  channel_count: 2
  can_play_type:
    audio/wav: probably
"#;

const YAML_AUDIO_DIGEST: &str = "74c05c20913c4f83b359b941e8bd1a553a45811e0fd38bf6eadb3ef4a6887037";

const WINDOWS_AUDIO_DIGEST: &str =
    "5bc8febcbd487844758d33a61b672a26d136260a7901342d24ef4d008e42ee0d";

fn write_profile(dir: &TempDir, file: &str, content: &str) -> String {
    let path = dir.path().join(file);
    fs::write(&path, content).unwrap();
    path.to_string_lossy().into_owned()
}

// ============================================================================
// Probe commands
// ============================================================================

#[test]
fn probe_builtin_with_expected_digest() {
    let code = probe::run(
        Probe::Audio,
        "windows-nvidia",
        false,
        Some(WINDOWS_AUDIO_DIGEST),
    )
    .unwrap();
    assert_eq!(code, ExitCode::SUCCESS);
}

#[test]
fn probe_expect_accepts_uppercase() {
    let upper = WINDOWS_AUDIO_DIGEST.to_ascii_uppercase();
    let code = probe::run(Probe::Audio, "windows-nvidia", true, Some(&upper)).unwrap();
    assert_eq!(code, ExitCode::SUCCESS);
}

#[test]
fn probe_yaml_profile_file() {
    let dir = TempDir::new().unwrap();
    let path = write_profile(&dir, "studio.yaml", YAML_PROFILE);

    let code = probe::run(Probe::Audio, &path, false, Some(YAML_AUDIO_DIGEST)).unwrap();
    assert_eq!(code, ExitCode::SUCCESS);

    let code = probe::run(Probe::Graphics, &path, false, None).unwrap();
    assert_eq!(code, ExitCode::from(1));
}

#[test]
fn probe_malformed_profile_file() {
    let dir = TempDir::new().unwrap();
    let path = write_profile(&dir, "broken.json", r#"{"name": "x", "gpu": {}}"#);

    assert!(probe::run(Probe::Graphics, &path, false, None).is_err());
    let code = probe::run(Probe::Graphics, &path, true, None).unwrap();
    assert_eq!(code, ExitCode::from(1));
}

#[test]
fn probe_output_envelope() {
    let dir = TempDir::new().unwrap();
    let path = write_profile(&dir, "studio.yml", YAML_PROFILE);
    let profile = resolve_profile(&path).unwrap();
    let host = ProfileHost::new(profile);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap();
    let report = runtime.block_on(run_probe(Probe::Audio, &host)).unwrap();
    let output = ProbeOutput::success("yaml-host", &report, Some(true)).unwrap();

    let value = serde_json::to_value(&output).unwrap();
    assert_eq!(value["success"], true);
    assert_eq!(value["probe"], "audio");
    assert_eq!(value["profile"], "yaml-host");
    assert_eq!(value["digest"], YAML_AUDIO_DIGEST);
    assert_eq!(value["record"]["sampleRate"], 96000);
    assert_eq!(value["record"]["codecs"]["wav"], true);
    assert_eq!(value["errors"], serde_json::json!([]));

    let mismatch = ProbeOutput::success("yaml-host", &report, Some(false)).unwrap();
    assert!(!mismatch.success);
    assert_eq!(mismatch.errors[0].code, error_codes::DIGEST_MISMATCH);
}

#[test]
fn json_record_rehashes_to_reported_digest() {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap();

    for name in ["windows-nvidia", "linux-mesa-masked"] {
        let host = ProfileHost::new(resolve_profile(name).unwrap());
        for probe in Probe::ALL {
            let report = runtime.block_on(run_probe(probe, &host)).unwrap();
            let output = ProbeOutput::success(name, &report, None).unwrap();

            // What a user gets by saving `record` from the --json output.
            let printed = serde_json::to_string_pretty(&output).unwrap();
            let parsed: serde_json::Value = serde_json::from_str(&printed).unwrap();
            let compact = serde_json::to_string(&parsed["record"]).unwrap();

            assert_eq!(
                digest_text(&compact).as_str(),
                parsed["digest"].as_str().unwrap(),
                "{} {} record: {}",
                name,
                probe,
                compact
            );
        }
    }
}

#[test]
fn json_record_keeps_integral_sample_rate() {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap();
    let host = ProfileHost::new(resolve_profile("windows-nvidia").unwrap());
    let report = runtime.block_on(run_probe(Probe::Audio, &host)).unwrap();
    let output = ProbeOutput::success("windows-nvidia", &report, None).unwrap();

    let compact = serde_json::to_string(&output.record).unwrap();
    assert!(compact.starts_with(r#"{"sampleRate":48000,"#), "{}", compact);
    assert_eq!(output.digest.as_deref(), Some(WINDOWS_AUDIO_DIGEST));
}

// ============================================================================
// Digest command
// ============================================================================

#[test]
fn digest_command_reads_file() {
    let dir = TempDir::new().unwrap();
    let path = write_profile(&dir, "record.json", r#"{"a":1}"#);

    assert_eq!(digest::run(Some(&path), false).unwrap(), ExitCode::SUCCESS);
    assert_eq!(digest::run(Some(&path), true).unwrap(), ExitCode::SUCCESS);
}

#[test]
fn digest_command_missing_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.json");
    assert!(digest::run(path.to_str(), false).is_err());
}

// ============================================================================
// Profiles commands
// ============================================================================

#[test]
fn profiles_list_and_show() {
    assert_eq!(profiles::list(false).unwrap(), ExitCode::SUCCESS);
    assert_eq!(profiles::list(true).unwrap(), ExitCode::SUCCESS);
    assert_eq!(profiles::show("linux-mesa-masked").unwrap(), ExitCode::SUCCESS);
}

#[test]
fn profiles_show_file() {
    let dir = TempDir::new().unwrap();
    let path = write_profile(&dir, "studio.yaml", YAML_PROFILE);
    assert_eq!(profiles::show(&path).unwrap(), ExitCode::SUCCESS);
}

#[test]
fn profiles_show_unknown_name() {
    let err = profiles::show("beos-voodoo").unwrap_err();
    assert!(format!("{:#}", err).contains("beos-voodoo"));
}
