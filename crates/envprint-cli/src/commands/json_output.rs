//! JSON output types for machine-readable CLI output.
//!
//! These types back the `--json` flag on every command so other tools can
//! consume digests and records without scraping colored text.

use envprint_core::{FingerprintError, Probe, Report};
use serde::{Deserialize, Serialize};

/// Error codes for CLI operations.
///
/// These codes are stable and can be used for programmatic error handling.
pub mod error_codes {
    /// Host profile could not be resolved or parsed
    pub const PROFILE_LOAD: &str = "CLI_001";
    /// A required host capability is missing
    pub const UNSUPPORTED_FEATURE: &str = "CLI_002";
    /// A host query failed
    pub const QUERY_FAILED: &str = "CLI_003";
    /// Record serialization failed
    pub const SERIALIZE: &str = "CLI_004";
    /// Computed digest differs from `--expect`
    pub const DIGEST_MISMATCH: &str = "CLI_005";
}

/// Maps a library error to its stable code.
pub fn error_code(err: &FingerprintError) -> &'static str {
    match err {
        FingerprintError::UnsupportedFeature(_) => error_codes::UNSUPPORTED_FEATURE,
        FingerprintError::Query { .. } => error_codes::QUERY_FAILED,
        FingerprintError::Serialize(_) => error_codes::SERIALIZE,
        FingerprintError::Profile(_) => error_codes::PROFILE_LOAD,
    }
}

/// A structured error in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonError {
    /// Stable error code (e.g., "CLI_002")
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

impl JsonError {
    /// Creates a new error with code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

impl From<&FingerprintError> for JsonError {
    fn from(err: &FingerprintError) -> Self {
        JsonError::new(error_code(err), err.to_string())
    }
}

/// JSON output for the `graphics` and `audio` commands.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeOutput {
    /// Whether the probe succeeded (and matched `--expect`, if given)
    pub success: bool,
    /// The probe that ran
    pub probe: Probe,
    /// Name of the host profile
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
    /// Hex digest (on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
    /// The collected record (on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record: Option<serde_json::Value>,
    /// Whether the digest matched `--expect` (when given)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matches_expected: Option<bool>,
    /// Errors encountered
    pub errors: Vec<JsonError>,
}

impl ProbeOutput {
    /// Creates a successful probe output.
    pub fn success(
        profile: impl Into<String>,
        report: &Report,
        matches_expected: Option<bool>,
    ) -> Result<Self, FingerprintError> {
        let mut errors = Vec::new();
        if matches_expected == Some(false) {
            errors.push(JsonError::new(
                error_codes::DIGEST_MISMATCH,
                "digest does not match the expected value",
            ));
        }
        Ok(Self {
            success: errors.is_empty(),
            probe: report.probe(),
            profile: Some(profile.into()),
            digest: Some(report.digest().to_string()),
            record: Some(report.record_value()?),
            matches_expected,
            errors,
        })
    }

    /// Creates a failed probe output.
    pub fn failure(probe: Probe, profile: Option<String>, errors: Vec<JsonError>) -> Self {
        Self {
            success: false,
            probe,
            profile,
            digest: None,
            record: None,
            matches_expected: None,
            errors,
        }
    }
}

/// JSON output for the `digest` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DigestOutput {
    /// Hex digest of the input
    pub digest: String,
    /// Number of UTF-8 bytes hashed
    pub bytes: usize,
}

/// One entry of the `profiles list` JSON output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileSummary {
    /// Profile name
    pub name: String,
    /// Profile description
    pub description: String,
    /// Whether the host provides a graphics context
    pub graphics: bool,
    /// Whether the host provides an audio context
    pub audio: bool,
}
