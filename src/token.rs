//! Capability token encoding and validation
//!
//! A watcher token is 16 random payload bytes followed by a 4-byte checksum,
//! rendered as base-58. The checksum is the first four bytes of
//! SHA-256(SHA-256(payload)), so corrupted or truncated tokens are rejected
//! without a database round trip. Only the single SHA-256 of the payload is
//! ever stored or queried; the raw payload stays with the bearer.

use sha2::{Digest, Sha256};
use thiserror::Error;

/// Random payload length in bytes
pub const PAYLOAD_LENGTH: usize = 16;

/// Checksum length in bytes
pub const CHECKSUM_LENGTH: usize = 4;

/// Total decoded token length in bytes
pub const TOKEN_LENGTH: usize = PAYLOAD_LENGTH + CHECKSUM_LENGTH;

/// Reasons a token string fails validation
///
/// The distinction exists for internal diagnostics only; the HTTP boundary
/// collapses every variant into the same 404.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenError {
    /// Input is empty or not valid base-58
    #[error("token is not decodable base-58")]
    Malformed,

    /// Decoded byte length is not exactly 20
    #[error("decoded token has unexpected length")]
    LengthMismatch,

    /// Supplied checksum does not match the recomputed one
    #[error("token checksum does not match payload")]
    ChecksumMismatch,
}

/// A successfully validated token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedToken {
    /// Raw 16-byte payload; bearer-secret equivalent, never persisted or logged
    pub payload: [u8; PAYLOAD_LENGTH],

    /// SHA-256 of the payload; the value used for all downstream lookups
    pub payload_hash: [u8; 32],
}

impl ParsedToken {
    /// Hex form of the payload hash, used as the rate-limiter key
    pub fn limiter_key(&self) -> String {
        hex::encode(self.payload_hash)
    }
}

/// Validate a base-58 token string and derive its lookup hash
pub fn decode(token: &str) -> Result<ParsedToken, TokenError> {
    if token.is_empty() {
        return Err(TokenError::Malformed);
    }

    let raw = bs58::decode(token)
        .into_vec()
        .map_err(|_| TokenError::Malformed)?;

    if raw.len() != TOKEN_LENGTH {
        return Err(TokenError::LengthMismatch);
    }

    let (payload_bytes, checksum) = raw.split_at(PAYLOAD_LENGTH);
    if checksum != checksum_of(payload_bytes) {
        return Err(TokenError::ChecksumMismatch);
    }

    let mut payload = [0u8; PAYLOAD_LENGTH];
    payload.copy_from_slice(payload_bytes);

    Ok(ParsedToken {
        payload,
        payload_hash: sha256(payload_bytes),
    })
}

/// Render a payload as a shareable token string
///
/// Exact inverse of [`decode`]; used by the seed tool when minting links.
pub fn encode(payload: &[u8; PAYLOAD_LENGTH]) -> String {
    let mut raw = Vec::with_capacity(TOKEN_LENGTH);
    raw.extend_from_slice(payload);
    raw.extend_from_slice(&checksum_of(payload));
    bs58::encode(raw).into_string()
}

/// SHA-256 of the payload, the persisted lookup value
pub fn payload_hash(payload: &[u8; PAYLOAD_LENGTH]) -> [u8; 32] {
    sha256(payload)
}

fn sha256(bytes: &[u8]) -> [u8; 32] {
    Sha256::digest(bytes).into()
}

fn checksum_of(payload: &[u8]) -> [u8; CHECKSUM_LENGTH] {
    let double = sha256(&sha256(payload));
    let mut checksum = [0u8; CHECKSUM_LENGTH];
    checksum.copy_from_slice(&double[..CHECKSUM_LENGTH]);
    checksum
}
