//! Read-only queries against the watcher schema
//!
//! The core consumes the data layer through two exact-match lookups: a
//! watcher link by token payload hash, and the workers belonging to the
//! link's owner. Link lifecycle (creation, revocation) happens elsewhere;
//! nothing here mutates rows.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use utoipa::ToSchema;
use uuid::Uuid;

/// The only scope this endpoint will honor
pub const DASHBOARD_SCOPE: &str = "dashboard";

/// Worker liveness as reported by the stats pipeline
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "worker_status", rename_all = "lowercase")]
pub enum WorkerStatus {
    Online,
    Offline,
    Inactive,
}

/// A capability grant row; consulted read-only
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct WatcherLink {
    /// Owning identity whose workers the link exposes
    pub user_id: Uuid,

    /// Scope tag; must equal [`DASHBOARD_SCOPE`] to be usable here
    pub scope: String,

    pub expires_at: DateTime<Utc>,

    /// Revocation instant; a future value means the link is still usable
    pub revoked_at: Option<DateTime<Utc>>,
}

impl WatcherLink {
    /// Whether the link authorizes a dashboard read at `now`
    pub fn is_usable(&self, now: DateTime<Utc>) -> bool {
        if self.scope != DASHBOARD_SCOPE {
            return false;
        }
        if self.expires_at <= now {
            return false;
        }
        match self.revoked_at {
            Some(revoked_at) => revoked_at > now,
            None => true,
        }
    }
}

/// A worker row as stored, hashrate in megahash
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct WorkerRow {
    pub id: Uuid,
    pub name: String,
    pub status: WorkerStatus,
    pub last_seen_at: DateTime<Utc>,
    pub hashrate_mh: Decimal,
}

/// Look up a watcher link by the token's payload hash
pub async fn find_watcher_link(
    db: &PgPool,
    payload_hash: &[u8],
) -> Result<Option<WatcherLink>, sqlx::Error> {
    sqlx::query_as(
        r#"
        SELECT user_id, scope, expires_at, revoked_at
        FROM watcher_links
        WHERE payload_hash = $1
        LIMIT 1
        "#,
    )
    .bind(payload_hash)
    .fetch_optional(db)
    .await
}

/// Fetch a user's workers in the display order the dashboard serves
///
/// Ordered by hashrate descending with lexical tie-breaks on name then id,
/// so the row sequence is fully deterministic.
pub async fn find_workers(db: &PgPool, user_id: Uuid) -> Result<Vec<WorkerRow>, sqlx::Error> {
    sqlx::query_as(
        r#"
        SELECT id, name, status, last_seen_at, hashrate_mh
        FROM workers
        WHERE user_id = $1
        ORDER BY hashrate_mh DESC, name ASC, id ASC
        "#,
    )
    .bind(user_id)
    .fetch_all(db)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn link_at(now: DateTime<Utc>) -> WatcherLink {
        WatcherLink {
            user_id: Uuid::nil(),
            scope: DASHBOARD_SCOPE.to_string(),
            expires_at: now + Duration::days(7),
            revoked_at: None,
        }
    }

    #[test]
    fn test_fresh_link_is_usable() {
        let now = Utc::now();
        assert!(link_at(now).is_usable(now));
    }

    #[test]
    fn test_wrong_scope_is_denied() {
        let now = Utc::now();
        let mut link = link_at(now);
        link.scope = "payout".to_string();
        assert!(!link.is_usable(now));
    }

    #[test]
    fn test_expired_link_is_denied() {
        let now = Utc::now();
        let mut link = link_at(now);
        link.expires_at = now;
        assert!(!link.is_usable(now));

        link.expires_at = now - Duration::seconds(1);
        assert!(!link.is_usable(now));
    }

    #[test]
    fn test_revoked_link_is_denied() {
        let now = Utc::now();
        let mut link = link_at(now);
        link.revoked_at = Some(now);
        assert!(!link.is_usable(now));

        link.revoked_at = Some(now - Duration::hours(1));
        assert!(!link.is_usable(now));
    }

    #[test]
    fn test_future_revocation_keeps_link_usable() {
        let now = Utc::now();
        let mut link = link_at(now);
        link.revoked_at = Some(now + Duration::hours(1));
        assert!(link.is_usable(now));
    }
}
