//! API types for the watcher dashboard

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::persistence::WorkerStatus;

/// One worker as served to the dashboard
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct WorkerEntry {
    /// Worker identifier
    pub id: String,

    /// Display name
    pub name: String,

    /// Liveness status
    pub status: WorkerStatus,

    /// True last-activity timestamp, ISO-8601 with millisecond precision
    pub last_seen_at: String,

    /// Hashrate in terahash, fixed three decimals
    pub hashrate_th: String,
}

/// Aggregate counters over the worker list
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DashboardAggregates {
    pub online: u32,
    pub offline: u32,
    pub inactive: u32,

    /// Total hashrate in terahash, fixed three decimals
    pub total_hashrate_th: String,
}

/// Full dashboard response body
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DashboardResponse {
    /// Workers ordered by hashrate descending, then name, then id
    pub workers: Vec<WorkerEntry>,

    pub agg: DashboardAggregates,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthCheckResponse {
    /// Service status
    pub status: String,

    /// Service version
    pub version: String,

    /// Timestamp
    pub timestamp: chrono::DateTime<chrono::Utc>,
}
