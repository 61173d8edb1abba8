//! Seed checksum canonicalization
//!
//! Computes stable SHA256 digests of seed payloads for change detection.

use serde::Serialize;
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

use crate::model::Document;

/// Canonical representation of a JSON value for digest calculation
///
/// Object keys are sorted at every depth; array order is significant.
#[derive(Serialize)]
#[serde(untagged)]
enum Canonical<'a> {
    Object(BTreeMap<&'a str, Canonical<'a>>),
    Array(Vec<Canonical<'a>>),
    Scalar(&'a Value),
}

fn canonicalize(value: &Value) -> Canonical<'_> {
    match value {
        Value::Object(map) => canonicalize_object(map),
        Value::Array(items) => Canonical::Array(items.iter().map(canonicalize).collect()),
        scalar => Canonical::Scalar(scalar),
    }
}

fn canonicalize_object(map: &Document) -> Canonical<'_> {
    Canonical::Object(
        map.iter()
            .map(|(key, value)| (key.as_str(), canonicalize(value)))
            .collect(),
    )
}

/// Compute the checksum of a seed payload
///
/// Returns a 64-character SHA256 hex digest of the canonical JSON form.
/// Payloads with the same key/value sets produce the same digest whatever
/// their key order.
pub fn checksum(data: &Document) -> String {
    let canonical = canonicalize_object(data);

    // Serializing borrowed JSON values into a string cannot fail
    let json = serde_json::to_string(&canonical).unwrap_or_default();

    let mut hasher = Sha256::new();
    hasher.update(json.as_bytes());
    hex::encode(hasher.finalize())
}
