//! Strong cache-validator generation
//!
//! An ETag is the hex SHA-256 of a value's canonical form, wrapped in double
//! quotes per the conventional strong-validator format. Because the input is
//! canonical text, equal values always hash identically regardless of how
//! their mappings were constructed.

use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::canonical::canonicalize;

/// Compute the strong validator for a response value
pub fn compute_etag(value: &Value) -> String {
    let canonical = canonicalize(value);
    let digest = Sha256::digest(canonical.as_bytes());
    format!("\"{}\"", hex::encode(digest))
}
