//! Per-token request rate limiting
//!
//! Fixed-window counter keyed by the token's hex-encoded lookup hash. A
//! bucket is created lazily on first use and replaced wholesale once its
//! window has elapsed, so up to 2x capacity can land across a window
//! boundary. That tradeoff is intentional; the limiter is single-process
//! and best-effort, not a distributed quota service.
//!
//! The bucket table grows with the number of distinct tokens seen and is
//! never evicted. Idle-bucket eviction belongs to production hardening, not
//! this core.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy)]
struct Bucket {
    remaining: u32,
    reset_at: Instant,
}

/// Fixed-window rate limiter shared across concurrent requests
#[derive(Debug)]
pub struct TokenRateLimiter {
    capacity: u32,
    window: Duration,
    buckets: Mutex<HashMap<String, Bucket>>,
}

impl TokenRateLimiter {
    /// Create a limiter admitting `capacity` requests per `window` per key
    pub fn new(capacity: u32, window: Duration) -> Self {
        Self {
            capacity,
            window,
            buckets: Mutex::new(HashMap::new()),
        }
    }

    /// Record one request under `key`; true if it is permitted now
    pub fn consume(&self, key: &str) -> bool {
        self.consume_at(key, Instant::now())
    }

    // The permit decision and the counter mutation happen under a single
    // lock acquisition, so concurrent calls on one key never admit more
    // than `capacity` within a window.
    fn consume_at(&self, key: &str, now: Instant) -> bool {
        if self.capacity == 0 {
            return false;
        }

        let mut buckets = self
            .buckets
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        match buckets.get_mut(key) {
            Some(bucket) if bucket.reset_at > now => {
                if bucket.remaining == 0 {
                    return false;
                }
                bucket.remaining -= 1;
                true
            }
            _ => {
                buckets.insert(
                    key.to_string(),
                    Bucket {
                        remaining: self.capacity - 1,
                        reset_at: now + self.window,
                    },
                );
                true
            }
        }
    }
}
