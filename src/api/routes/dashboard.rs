//! Public watcher dashboard route handler
//!
//! The full request pipeline: decode the capability token, charge the
//! per-token rate limit, resolve the watcher link, fetch the owner's
//! workers, build the response, and answer conditionally against the
//! client's cache validator.

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use rust_decimal::{Decimal, RoundingStrategy};
use serde_json::Value;
use tracing::{debug, info};

use crate::{
    api::types::{DashboardAggregates, DashboardResponse, WorkerEntry},
    error::{Error, Result},
    etag::compute_etag,
    persistence::{self, WorkerRow, WorkerStatus},
    server::AppState,
    time, token,
};

const MEGAHASH_PER_TERAHASH: i64 = 1_000_000;

/// Read-only dashboard for a capability-token holder
///
/// Every token or authorization failure answers the same empty 404; see
/// [`crate::error::Error`] for the collapse rules.
#[utoipa::path(
    get,
    path = "/public/w/{token}/dashboard",
    params(
        ("token" = String, Path, description = "Base-58 capability token"),
    ),
    responses(
        (status = 200, description = "Dashboard for the token's owner", body = DashboardResponse),
        (status = 304, description = "Cached representation is still valid"),
        (status = 404, description = "Unknown, malformed, expired, or revoked token"),
        (status = 429, description = "Token exhausted its request budget"),
        (status = 500, description = "Unexpected failure"),
    ),
    tag = "dashboard",
)]
pub async fn watcher_dashboard(
    State(state): State<AppState>,
    Path(token): Path<String>,
    headers: HeaderMap,
) -> Result<Response> {
    // Reason codes stay in the log; the token itself is bearer material and
    // is never logged.
    let parsed = token::decode(&token).map_err(|reason| {
        info!(%reason, "rejected watcher token");
        Error::InvalidToken(reason)
    })?;

    if !state.rate_limiter.consume(&parsed.limiter_key()) {
        debug!("watcher token over budget for current window");
        return Err(Error::RateLimited);
    }

    let link = persistence::find_watcher_link(&state.db, &parsed.payload_hash)
        .await?
        .filter(|link| link.is_usable(Utc::now()))
        .ok_or(Error::LinkDenied)?;

    let workers = persistence::find_workers(&state.db, link.user_id).await?;
    let body = build_dashboard(&workers);
    let etag = dashboard_etag(&body)?;

    let if_none_match = headers
        .get(header::IF_NONE_MATCH)
        .and_then(|value| value.to_str().ok());

    if if_none_match == Some(etag.as_str()) {
        return Ok((StatusCode::NOT_MODIFIED, [(header::ETAG, etag)]).into_response());
    }

    Ok(([(header::ETAG, etag)], Json(body)).into_response())
}

/// Assemble the response body from worker rows, preserving their order
pub fn build_dashboard(workers: &[WorkerRow]) -> DashboardResponse {
    let mut agg = DashboardAggregates {
        online: 0,
        offline: 0,
        inactive: 0,
        total_hashrate_th: format_terahash(Decimal::ZERO),
    };

    let mut total_th = Decimal::ZERO;

    let entries: Vec<WorkerEntry> = workers
        .iter()
        .map(|worker| {
            let hashrate_th = to_terahash(worker.hashrate_mh);
            total_th += hashrate_th;

            match worker.status {
                WorkerStatus::Online => agg.online += 1,
                WorkerStatus::Offline => agg.offline += 1,
                WorkerStatus::Inactive => agg.inactive += 1,
            }

            WorkerEntry {
                id: worker.id.to_string(),
                name: worker.name.clone(),
                status: worker.status,
                last_seen_at: time::to_iso_millis(worker.last_seen_at),
                hashrate_th: format_terahash(hashrate_th),
            }
        })
        .collect();

    agg.total_hashrate_th = format_terahash(total_th);

    DashboardResponse {
        workers: entries,
        agg,
    }
}

/// Strong validator over the response with per-worker timestamps quantized
///
/// The served body keeps the true timestamps; only the hash input sees the
/// minute-bucket copies, so sub-minute jitter does not churn the validator.
pub fn dashboard_etag(body: &DashboardResponse) -> Result<String> {
    let mut subject = serde_json::to_value(body)?;

    if let Some(workers) = subject.get_mut("workers").and_then(Value::as_array_mut) {
        for worker in workers {
            if let Some(Value::String(last_seen)) = worker.get_mut("last_seen_at") {
                *last_seen = time::normalize_for_etag(last_seen);
            }
        }
    }

    Ok(compute_etag(&subject))
}

// Megahash to terahash is a decimal shift, so the division is exact.
fn to_terahash(hashrate_mh: Decimal) -> Decimal {
    hashrate_mh / Decimal::from(MEGAHASH_PER_TERAHASH)
}

// Fixed three decimals, half-up at the cut.
fn format_terahash(hashrate_th: Decimal) -> String {
    let mut rounded =
        hashrate_th.round_dp_with_strategy(3, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(3);
    rounded.to_string()
}
