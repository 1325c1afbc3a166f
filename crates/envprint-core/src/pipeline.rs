//! Collect-then-digest entry points.
//!
//! A trigger invokes exactly one probe, which runs its collector and pipes the
//! record into the digesting utility. Invocations share no mutable state, so
//! overlapping calls produce independent results.

use serde::{Deserialize, Serialize};

use crate::audio::collect_audio;
use crate::error::FingerprintError;
use crate::graphics::collect_graphics;
use crate::hash::{canonical_json, digest_record, pretty_json, Digest};
use crate::host::{AudioHost, GraphicsHost};
use crate::record::{AudioRecord, GraphicsRecord};

/// A digest together with the record it was computed from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fingerprint<R> {
    /// SHA-256 over the record's canonical serialization.
    pub digest: Digest,
    /// The collected record.
    pub record: R,
}

impl<R: Serialize> Fingerprint<R> {
    /// Digests `record` and pairs the two.
    pub fn from_record(record: R) -> Result<Self, FingerprintError> {
        let digest = digest_record(&record)?;
        Ok(Self { digest, record })
    }

    /// Pretty-printed record for display.
    pub fn details(&self) -> Result<String, FingerprintError> {
        pretty_json(&self.record)
    }
}

/// Collects graphics capabilities and digests them.
pub fn collect_and_hash_graphics<H: GraphicsHost>(
    host: &H,
) -> Result<Fingerprint<GraphicsRecord>, FingerprintError> {
    let record = collect_graphics(host)?;
    Fingerprint::from_record(record)
}

/// Collects audio capabilities and digests them.
pub async fn collect_and_hash_audio<H: AudioHost>(
    host: &H,
) -> Result<Fingerprint<AudioRecord>, FingerprintError> {
    let record = collect_audio(host).await?;
    Fingerprint::from_record(record)
}

/// The probes a trigger can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Probe {
    /// Graphics capability probe.
    Graphics,
    /// Audio capability probe.
    Audio,
}

impl Probe {
    /// All probes in display order.
    pub const ALL: [Probe; 2] = [Probe::Graphics, Probe::Audio];

    /// Returns the probe name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Probe::Graphics => "graphics",
            Probe::Audio => "audio",
        }
    }
}

impl std::fmt::Display for Probe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of running one probe.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Report {
    /// Graphics fingerprint.
    Graphics(Fingerprint<GraphicsRecord>),
    /// Audio fingerprint.
    Audio(Fingerprint<AudioRecord>),
}

impl Report {
    /// The probe that produced this report.
    pub fn probe(&self) -> Probe {
        match self {
            Report::Graphics(_) => Probe::Graphics,
            Report::Audio(_) => Probe::Audio,
        }
    }

    /// The report's digest.
    pub fn digest(&self) -> &Digest {
        match self {
            Report::Graphics(fp) => &fp.digest,
            Report::Audio(fp) => &fp.digest,
        }
    }

    /// Pretty-printed record for display.
    pub fn details(&self) -> Result<String, FingerprintError> {
        match self {
            Report::Graphics(fp) => fp.details(),
            Report::Audio(fp) => fp.details(),
        }
    }

    /// The record as a JSON value, parsed back from its canonical text.
    ///
    /// Compact serialization of the returned value hashes to [`Self::digest`];
    /// integral floats stay integers (`48000`, not `48000.0`).
    pub fn record_value(&self) -> Result<serde_json::Value, FingerprintError> {
        let text = match self {
            Report::Graphics(fp) => canonical_json(&fp.record)?,
            Report::Audio(fp) => canonical_json(&fp.record)?,
        };
        Ok(serde_json::from_str(&text)?)
    }
}

/// Runs a single probe against a host providing both subsystems.
pub async fn run_probe<H>(probe: Probe, host: &H) -> Result<Report, FingerprintError>
where
    H: GraphicsHost + AudioHost,
{
    match probe {
        Probe::Graphics => collect_and_hash_graphics(host).map(Report::Graphics),
        Probe::Audio => collect_and_hash_audio(host).await.map(Report::Audio),
    }
}
