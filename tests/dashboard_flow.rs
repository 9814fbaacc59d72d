//! End-to-end pipeline properties exercised at the library boundary:
//! token decode, link decision, response assembly, and cache validation.

use chrono::{DateTime, Duration, TimeZone, Utc};
use hashwatch_api::api::routes::dashboard::{build_dashboard, dashboard_etag};
use hashwatch_api::persistence::{WatcherLink, WorkerRow, WorkerStatus, DASHBOARD_SCOPE};
use hashwatch_api::rate_limit::TokenRateLimiter;
use hashwatch_api::token;
use rust_decimal::Decimal;
use serde_json::json;
use std::str::FromStr;
use uuid::Uuid;

fn fresh_link(user_id: Uuid, now: DateTime<Utc>) -> WatcherLink {
    WatcherLink {
        user_id,
        scope: DASHBOARD_SCOPE.to_string(),
        expires_at: now + Duration::days(7),
        revoked_at: None,
    }
}

fn worker(name: &str, status: WorkerStatus, hashrate_mh: &str) -> WorkerRow {
    WorkerRow {
        id: Uuid::from_u128(name.len() as u128),
        name: name.to_string(),
        status,
        last_seen_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 15).unwrap(),
        hashrate_mh: Decimal::from_str(hashrate_mh).unwrap(),
    }
}

#[test]
fn minted_token_flows_through_to_a_cacheable_dashboard() {
    let now = Utc::now();

    // Mint the way the seed tool does
    let payload = [0x5au8; token::PAYLOAD_LENGTH];
    let printable = token::encode(&payload);

    // The inbound request decodes the same payload and lookup hash
    let parsed = token::decode(&printable).unwrap();
    assert_eq!(parsed.payload, payload);
    assert_eq!(parsed.payload_hash, token::payload_hash(&payload));

    // The stored link authorizes the read
    let link = fresh_link(Uuid::new_v4(), now);
    assert!(link.is_usable(now));

    // Response assembly and validator
    let rows = [
        worker("Rig-01", WorkerStatus::Online, "2500000"),
        worker("Rig-002", WorkerStatus::Offline, "1000000"),
    ];
    let body = build_dashboard(&rows);
    assert_eq!(body.workers.len(), 2);
    assert_eq!(body.agg.online, 1);
    assert_eq!(body.agg.offline, 1);
    assert_eq!(body.agg.total_hashrate_th, "3.500");

    // A repeat poll with unchanged data computes the identical validator,
    // which is exactly the If-None-Match == ETag comparison behind a 304
    let first = dashboard_etag(&body).unwrap();
    let second = dashboard_etag(&build_dashboard(&rows)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn tampered_token_is_rejected_before_any_lookup() {
    let payload = [7u8; token::PAYLOAD_LENGTH];
    let printable = token::encode(&payload);

    // Swap one character for a different alphabet member
    let mut chars: Vec<char> = printable.chars().collect();
    let original = chars[0];
    chars[0] = if original == '2' { '3' } else { '2' };
    let tampered: String = chars.into_iter().collect();

    assert!(token::decode(&tampered).is_err());
}

#[test]
fn revoked_link_is_denied() {
    let now = Utc::now();
    let mut link = fresh_link(Uuid::new_v4(), now);
    link.revoked_at = Some(now - Duration::minutes(5));
    assert!(!link.is_usable(now));
}

#[test]
fn expired_and_wrong_scope_links_are_denied() {
    let now = Utc::now();

    let mut expired = fresh_link(Uuid::new_v4(), now);
    expired.expires_at = now - Duration::seconds(1);
    assert!(!expired.is_usable(now));

    let mut wrong_scope = fresh_link(Uuid::new_v4(), now);
    wrong_scope.scope = "payout".to_string();
    assert!(!wrong_scope.is_usable(now));
}

#[test]
fn zero_worker_dashboard_has_the_documented_shape() {
    let body = build_dashboard(&[]);
    let value = serde_json::to_value(&body).unwrap();

    assert_eq!(
        value,
        json!({
            "workers": [],
            "agg": {
                "online": 0,
                "offline": 0,
                "inactive": 0,
                "total_hashrate_th": "0.000",
            },
        })
    );
}

#[test]
fn worker_entries_serialize_with_the_documented_fields() {
    let rows = [worker("Rig-01", WorkerStatus::Online, "1234567")];
    let value = serde_json::to_value(build_dashboard(&rows)).unwrap();

    assert_eq!(
        value["workers"][0],
        json!({
            "id": Uuid::from_u128("Rig-01".len() as u128).to_string(),
            "name": "Rig-01",
            "status": "online",
            "last_seen_at": "2024-05-01T12:00:15.000Z",
            "hashrate_th": "1.235",
        })
    );
}

#[test]
fn token_budget_is_enforced_per_key() {
    let limiter = TokenRateLimiter::new(3, std::time::Duration::from_secs(60));
    let parsed = token::decode(&token::encode(&[1u8; token::PAYLOAD_LENGTH])).unwrap();
    let key = parsed.limiter_key();

    assert!(limiter.consume(&key));
    assert!(limiter.consume(&key));
    assert!(limiter.consume(&key));
    assert!(!limiter.consume(&key));

    // A different token keeps its own budget
    let other = token::decode(&token::encode(&[2u8; token::PAYLOAD_LENGTH])).unwrap();
    assert!(limiter.consume(&other.limiter_key()));
}
