//! Collected record types.
//!
//! Field order of every record is part of the digest contract: the digesting
//! utility serializes in declaration/insertion order and never re-sorts keys.

use indexmap::IndexMap;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// Value recorded for a parameter whose query failed.
pub const QUERY_ERROR_SENTINEL: &str = "error";

/// A value returned by a graphics parameter query.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ParameterValue {
    /// The host answered `null`.
    Null,
    /// Boolean parameter.
    Bool(bool),
    /// Integer parameter.
    Integer(i64),
    /// Floating-point parameter.
    Float(f64),
    /// String parameter.
    Text(String),
    /// Integer typed array (e.g. `MAX_VIEWPORT_DIMS`).
    IntArray(Vec<i64>),
}

impl ParameterValue {
    /// The value recorded when a parameter query fails.
    pub fn query_error() -> Self {
        ParameterValue::Text(QUERY_ERROR_SENTINEL.to_string())
    }

    /// Returns true if this is the query-failure sentinel.
    pub fn is_query_error(&self) -> bool {
        matches!(self, ParameterValue::Text(s) if s == QUERY_ERROR_SENTINEL)
    }

    /// Returns the text if this is a string value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ParameterValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl PartialEq<str> for ParameterValue {
    fn eq(&self, other: &str) -> bool {
        self.as_text() == Some(other)
    }
}

impl PartialEq<&str> for ParameterValue {
    fn eq(&self, other: &&str) -> bool {
        self.as_text() == Some(*other)
    }
}

impl Serialize for ParameterValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ParameterValue::Null => serializer.serialize_unit(),
            ParameterValue::Bool(b) => serializer.serialize_bool(*b),
            ParameterValue::Integer(i) => serializer.serialize_i64(*i),
            ParameterValue::Float(f) => serializer.serialize_f64(*f),
            ParameterValue::Text(s) => serializer.serialize_str(s),
            // Typed arrays stringify as objects keyed by element index.
            ParameterValue::IntArray(items) => {
                let mut map = serializer.serialize_map(Some(items.len()))?;
                for (index, item) in items.iter().enumerate() {
                    map.serialize_entry(&index.to_string(), item)?;
                }
                map.end()
            }
        }
    }
}

impl From<&str> for ParameterValue {
    fn from(value: &str) -> Self {
        ParameterValue::Text(value.to_string())
    }
}

impl From<String> for ParameterValue {
    fn from(value: String) -> Self {
        ParameterValue::Text(value)
    }
}

impl From<i64> for ParameterValue {
    fn from(value: i64) -> Self {
        ParameterValue::Integer(value)
    }
}

impl From<f64> for ParameterValue {
    fn from(value: f64) -> Self {
        ParameterValue::Float(value)
    }
}

impl From<bool> for ParameterValue {
    fn from(value: bool) -> Self {
        ParameterValue::Bool(value)
    }
}

impl From<Vec<i64>> for ParameterValue {
    fn from(value: Vec<i64>) -> Self {
        ParameterValue::IntArray(value)
    }
}

/// Graphics capability record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphicsRecord {
    /// GPU vendor, unmasked when the host allows it.
    ///
    /// Kept as the raw query answer so a `null` or numeric answer serializes
    /// as the host returned it.
    pub vendor: ParameterValue,
    /// GPU renderer, unmasked when the host allows it.
    pub renderer: ParameterValue,
    /// Capability parameters keyed by catalog name.
    pub parameters: IndexMap<String, ParameterValue>,
    /// Presence flags keyed by extension id.
    pub extensions: IndexMap<String, bool>,
}

impl GraphicsRecord {
    /// Names of parameters whose query failed.
    pub fn failed_parameters(&self) -> Vec<&str> {
        self.parameters
            .iter()
            .filter(|(_, value)| value.is_query_error())
            .map(|(name, _)| name.as_str())
            .collect()
    }
}

/// Codec playback support flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodecSupport {
    /// `audio/mpeg`
    pub mp3: bool,
    /// `audio/ogg`
    pub ogg: bool,
    /// `audio/wav`
    pub wav: bool,
}

impl CodecSupport {
    /// Sets the flag for a codec record key. Unknown keys are ignored.
    pub fn set(&mut self, name: &str, supported: bool) {
        match name {
            "mp3" => self.mp3 = supported,
            "ogg" => self.ogg = supported,
            "wav" => self.wav = supported,
            _ => {}
        }
    }
}

/// Audio capability record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioRecord {
    /// Context sample rate in Hz.
    pub sample_rate: f64,
    /// Destination node's maximum channel count.
    pub max_channel_count: u32,
    /// Destination node's current channel count.
    pub channel_count: u32,
    /// Codec playback support.
    pub codecs: CodecSupport,
}
