//! Timestamp handling for responses and cache validators
//!
//! Worker heartbeats arrive with sub-minute jitter from clock skew and
//! replication lag. The served payload carries the true timestamp; only the
//! ETag computation sees a copy truncated to the enclosing 60-second bucket,
//! so polling clients are not invalidated every request.

use chrono::{DateTime, SecondsFormat, TimeZone, Utc};

const BUCKET_MS: i64 = 60_000;

/// Render a timestamp the way the API serves it: millisecond precision, `Z`
pub fn to_iso_millis(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Truncate an ISO-8601 timestamp to the start of its minute bucket
///
/// Non-parseable input is returned unchanged; a defensive default, not a
/// fatal error, since the quantizer only ever feeds the ETag hash.
pub fn normalize_for_etag(timestamp: &str) -> String {
    let Ok(parsed) = DateTime::parse_from_rfc3339(timestamp) else {
        return timestamp.to_string();
    };

    let bucket_start = parsed.timestamp_millis().div_euclid(BUCKET_MS) * BUCKET_MS;
    match Utc.timestamp_millis_opt(bucket_start).single() {
        Some(truncated) => to_iso_millis(truncated),
        None => timestamp.to_string(),
    }
}
