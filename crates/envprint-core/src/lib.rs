//! envprint Core Library
//!
//! This crate collects host capability characteristics (graphics driver
//! parameters, audio subsystem parameters) and condenses each into a stable
//! SHA-256 digest suitable for device/browser identification.
//!
//! # Overview
//!
//! Two independent collectors feed one shared digesting utility:
//!
//! - **Graphics**: vendor/renderer identity, a fixed set of numeric capability
//!   parameters and presence flags for a fixed set of optional extensions
//! - **Audio**: sample rate, destination channel limits and codec playback support
//!
//! The host environment is reached through the traits in [`host`], so the
//! same collectors run against a browser binding, a [`profile::ProfileHost`]
//! loaded from data, or a test double.
//!
//! # Example
//!
//! ```
//! use envprint_core::pipeline::collect_and_hash_graphics;
//! use envprint_core::profile::{builtin_profile, ProfileHost};
//!
//! let profile = builtin_profile("windows-nvidia").unwrap();
//! let host = ProfileHost::new(profile);
//!
//! let fingerprint = collect_and_hash_graphics(&host).unwrap();
//! assert_eq!(fingerprint.digest.as_str().len(), 64);
//! println!("{}", fingerprint.details().unwrap());
//! ```
//!
//! # Modules
//!
//! - [`audio`]: Audio capability collector
//! - [`catalog`]: Static query tables (parameter names, extension ids, codecs)
//! - [`error`]: Error types
//! - [`graphics`]: Graphics capability collector
//! - [`hash`]: Canonical serialization and SHA-256 digests
//! - [`host`]: Traits the host environment implements
//! - [`pipeline`]: Collect-then-digest entry points
//! - [`profile`]: Host backed by profile data, plus built-in profiles
//! - [`record`]: Collected record types

pub mod audio;
pub mod catalog;
pub mod error;
pub mod graphics;
pub mod hash;
pub mod host;
pub mod pipeline;
pub mod profile;
pub mod record;

// Re-export commonly used types at the crate root
pub use error::{Feature, FingerprintError, ProfileError, QueryError};
pub use hash::{canonical_json, digest_record, digest_text, pretty_json, sha256_hex, Digest};
pub use host::{AudioContext, AudioDestination, AudioHost, GraphicsContext, GraphicsHost};
pub use pipeline::{
    collect_and_hash_audio, collect_and_hash_graphics, run_probe, Fingerprint, Probe, Report,
};
pub use profile::{builtin_profile, builtin_profiles, load_profile, HostProfile, ProfileHost};
pub use record::{AudioRecord, CodecSupport, GraphicsRecord, ParameterValue};
