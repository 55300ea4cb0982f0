//! Dashboard API client.

use std::time::{Duration, Instant};

use serde::Deserialize;
use thiserror::Error;

use crate::cache::Dashboard;

/// Errors from fetching dashboard data upstream.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The id is not a base-10 integer; no request was attempted.
    #[error("invalid dashboard ID: {0}")]
    InvalidId(String),

    /// The request could not be sent, timed out, or returned a
    /// non-success status.
    #[error("making request: {0}")]
    Request(reqwest::Error),

    /// The response body was not the expected JSON shape.
    #[error("parsing response: {0}")]
    Parse(reqwest::Error),
}

/// Wire shape of a dashboard returned by the API.
///
/// Unknown fields are ignored; a missing or non-numeric `id` is a
/// decode error, never silently defaulted.
#[derive(Debug, Deserialize)]
struct DashboardPayload {
    name: String,
    id: i64,
    downloads: i64,
}

/// HTTP client for the public dashboard API.
#[derive(Clone)]
pub struct DashboardClient {
    http: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl DashboardClient {
    /// Create a client. The dashboard id is appended to `base_url` as
    /// a path segment; `timeout` bounds each individual fetch.
    pub fn new(base_url: String, timeout: Duration) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
            timeout,
        }
    }

    /// Fetch a single dashboard record.
    ///
    /// The fetch timestamp is taken at call time, before the network
    /// round trip, so freshness is measured from when the fetch
    /// started rather than when the body arrived.
    pub async fn fetch_one(&self, id: &str) -> Result<Dashboard, FetchError> {
        // We only accept numbers.
        if id.parse::<i64>().is_err() {
            return Err(FetchError::InvalidId(id.to_string()));
        }

        let fetched_at = Instant::now();
        let url = format!("{}{}", self.base_url, id);
        tracing::debug!(url = %url, "fetching dashboard");

        let response = self
            .http
            .get(&url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(FetchError::Request)?
            .error_for_status()
            .map_err(FetchError::Request)?;

        let payload: DashboardPayload = response.json().await.map_err(FetchError::Parse)?;

        Ok(Dashboard {
            id: payload.id,
            name: payload.name,
            downloads: payload.downloads,
            fetched_at,
        })
    }

    /// Fetch a batch of dashboards sequentially in input order.
    ///
    /// The first failure aborts the batch; records fetched before it
    /// are discarded and never reach the cache.
    pub async fn fetch_many(&self, ids: &[String]) -> Result<Vec<Dashboard>, FetchError> {
        let mut boards = Vec::with_capacity(ids.len());

        for id in ids {
            boards.push(self.fetch_one(id).await?);
        }

        Ok(boards)
    }
}
