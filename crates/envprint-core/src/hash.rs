//! Canonical serialization and SHA-256 digests.
//!
//! This module implements the digesting policy for envprint:
//! - Records are serialized to compact JSON text in the order the collector
//!   built them (keys are never re-sorted)
//! - Numbers and strings render the way a browser's `JSON.stringify` does, so
//!   a digest computed here matches one computed in the page
//! - The digest is SHA-256 over the UTF-8 bytes of that text, rendered as
//!   64 lowercase hex characters

use std::fmt::Write as _;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sha2::{Digest as _, Sha256};

use crate::error::FingerprintError;

/// Length of a rendered digest in hex characters.
pub const DIGEST_HEX_LEN: usize = 64;

/// A SHA-256 digest rendered as lowercase hexadecimal.
///
/// Only constructed from digest bytes or validated input, so the inner
/// string always matches `[0-9a-f]{64}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Digest(String);

impl Digest {
    /// Renders raw digest bytes: two lowercase, zero-padded hex digits per
    /// byte, concatenated in byte order.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut hex = String::with_capacity(bytes.len() * 2);
        for byte in bytes {
            // Writing to a String cannot fail.
            let _ = write!(hex, "{:02x}", byte);
        }
        Digest(hex)
    }

    /// Returns the hex string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the digest, returning the hex string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for Digest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error returned when parsing a digest from user input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid digest '{0}': expected {DIGEST_HEX_LEN} hex characters")]
pub struct ParseDigestError(pub String);

impl FromStr for Digest {
    type Err = ParseDigestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        if normalized.len() == DIGEST_HEX_LEN && normalized.bytes().all(|b| b.is_ascii_hexdigit())
        {
            Ok(Digest(normalized))
        } else {
            Err(ParseDigestError(s.to_string()))
        }
    }
}

impl TryFrom<String> for Digest {
    type Error = ParseDigestError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Digest> for String {
    fn from(digest: Digest) -> Self {
        digest.0
    }
}

/// Computes the SHA-256 digest of arbitrary data.
///
/// # Example
/// ```
/// use envprint_core::hash::sha256_hex;
///
/// let digest = sha256_hex(b"abc");
/// assert_eq!(
///     digest.as_str(),
///     "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
/// );
/// ```
pub fn sha256_hex(data: &[u8]) -> Digest {
    let hash = Sha256::digest(data);
    Digest::from_bytes(&hash)
}

/// Computes the SHA-256 digest of the UTF-8 bytes of a string.
pub fn digest_text(text: &str) -> Digest {
    sha256_hex(text.as_bytes())
}

/// Serializes a record to canonical text and digests it.
///
/// ```text
/// digest = hex(SHA-256(UTF-8(canonical_json(record))))
/// ```
pub fn digest_record<T: Serialize + ?Sized>(record: &T) -> Result<Digest, FingerprintError> {
    let canonical = canonical_json(record)?;
    Ok(digest_text(&canonical))
}

/// Serializes a record to compact canonical JSON text.
///
/// Keys keep the order the record was built in.
pub fn canonical_json<T: Serialize + ?Sized>(record: &T) -> Result<String, FingerprintError> {
    let value = serde_json::to_value(record)?;
    let mut out = String::new();
    write_value(&mut out, &value, None, 0);
    Ok(out)
}

/// Serializes a record to canonical JSON text indented by two spaces.
///
/// This is the "raw details" rendering shown next to a digest.
pub fn pretty_json<T: Serialize + ?Sized>(record: &T) -> Result<String, FingerprintError> {
    let value = serde_json::to_value(record)?;
    let mut out = String::new();
    write_value(&mut out, &value, Some(2), 0);
    Ok(out)
}

fn write_value(out: &mut String, value: &serde_json::Value, indent: Option<usize>, depth: usize) {
    match value {
        serde_json::Value::Null => out.push_str("null"),
        serde_json::Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        serde_json::Value::Number(n) => out.push_str(&format_number(n)),
        serde_json::Value::String(s) => out.push_str(&format_string(s)),
        serde_json::Value::Array(items) => {
            if items.is_empty() {
                out.push_str("[]");
                return;
            }
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                newline(out, indent, depth + 1);
                write_value(out, item, indent, depth + 1);
            }
            newline(out, indent, depth);
            out.push(']');
        }
        serde_json::Value::Object(map) => {
            if map.is_empty() {
                out.push_str("{}");
                return;
            }
            out.push('{');
            for (i, (key, item)) in map.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                newline(out, indent, depth + 1);
                out.push_str(&format_string(key));
                out.push(':');
                if indent.is_some() {
                    out.push(' ');
                }
                write_value(out, item, indent, depth + 1);
            }
            newline(out, indent, depth);
            out.push('}');
        }
    }
}

fn newline(out: &mut String, indent: Option<usize>, depth: usize) {
    if let Some(width) = indent {
        out.push('\n');
        out.extend(std::iter::repeat(' ').take(width * depth));
    }
}

/// Formats a number the way `JSON.stringify` does.
fn format_number(n: &serde_json::Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    match n.as_f64() {
        Some(f) => format_f64(f),
        None => "null".to_string(),
    }
}

fn format_f64(f: f64) -> String {
    if !f.is_finite() {
        return "null".to_string();
    }
    if f == 0.0 {
        // Also covers -0.0.
        return "0".to_string();
    }
    let magnitude = f.abs();
    if (1e-6..1e21).contains(&magnitude) {
        // Shortest round-trip digits, never an exponent in this range.
        return format!("{}", f);
    }
    let s = format!("{:e}", f);
    match s.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{}e+{}", mantissa, exponent)
        }
        _ => s,
    }
}

/// Formats a string the way `JSON.stringify` does.
fn format_string(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 2);
    result.push('"');
    for c in s.chars() {
        match c {
            '"' => result.push_str("\\\""),
            '\\' => result.push_str("\\\\"),
            '\u{08}' => result.push_str("\\b"),
            '\u{0c}' => result.push_str("\\f"),
            '\n' => result.push_str("\\n"),
            '\r' => result.push_str("\\r"),
            '\t' => result.push_str("\\t"),
            c if c < '\x20' => {
                let _ = write!(result, "\\u{:04x}", c as u32);
            }
            c => result.push(c),
        }
    }
    result.push('"');
    result
}
