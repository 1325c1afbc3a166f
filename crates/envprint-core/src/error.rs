//! Error types for capability collection and digesting.

use std::path::PathBuf;

use thiserror::Error;

/// A host capability a collector depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    /// A graphics rendering context (WebGL).
    GraphicsContext,
    /// An audio context constructor.
    AudioContext,
}

impl Feature {
    /// Returns the user-facing name of the capability.
    pub fn as_str(&self) -> &'static str {
        match self {
            Feature::GraphicsContext => "WebGL",
            Feature::AudioContext => "AudioContext",
        }
    }
}

impl std::fmt::Display for Feature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single host query that failed.
///
/// Failures of catalog parameter queries never leave the graphics collector;
/// they are replaced by [`crate::record::QUERY_ERROR_SENTINEL`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct QueryError {
    /// Human-readable reason reported by the host.
    pub message: String,
}

impl QueryError {
    /// Creates a new query error.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Top-level error type for collection and digesting.
#[derive(Debug, Error)]
pub enum FingerprintError {
    /// A required capability is absent from the host environment.
    #[error("{0} not supported")]
    UnsupportedFeature(Feature),

    /// A host query that the collector cannot substitute failed.
    #[error("{context}: {source}")]
    Query {
        /// What was being queried.
        context: String,
        /// The host's failure.
        #[source]
        source: QueryError,
    },

    /// The record could not be serialized.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// A host profile could not be loaded.
    #[error(transparent)]
    Profile(#[from] ProfileError),
}

impl FingerprintError {
    /// Wraps a host failure with a description of the query.
    pub fn query(context: impl Into<String>, source: QueryError) -> Self {
        FingerprintError::Query {
            context: context.into(),
            source,
        }
    }

    /// Returns true if this is an `UnsupportedFeature` error.
    pub fn is_unsupported(&self) -> bool {
        matches!(self, FingerprintError::UnsupportedFeature(_))
    }
}

/// Errors raised while loading host profiles.
#[derive(Debug, Error)]
pub enum ProfileError {
    /// No built-in profile with that name.
    #[error("unknown built-in profile '{0}'")]
    UnknownBuiltin(String),

    /// The profile file extension is not recognized.
    #[error("unsupported profile format '{}' (expected .json, .yaml or .yml)", .0.display())]
    UnsupportedFormat(PathBuf),

    /// I/O error.
    #[error("failed to read profile {}: {source}", path.display())]
    Io {
        /// Path being read.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing error.
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
