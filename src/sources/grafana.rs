//! Grafana dashboard download counts.
//!
//! # Responsibilities
//! - Parse the operation and id list from the request path
//! - Serve counts from the cache, refreshing stale entries upstream
//! - Render the fixed badge JSON the consumer expects
//!
//! # Design Decisions
//! - All operation aliases select the same count operation
//! - The id cap is checked before any cache or network work
//! - Check → fetch → merge; no lock is held while fetching

use std::sync::Arc;

use axum::body::Body;
use axum::http::Request;
use axum::response::{IntoResponse, Response};
use futures_util::future::BoxFuture;

use crate::cache::DashboardCache;
use crate::error::BadgeError;
use crate::registry::BadgeSource;
use crate::upstream::DashboardClient;

/// Badge source serving dashboard download counts.
#[derive(Clone)]
pub struct GrafanaSource {
    cache: Arc<DashboardCache>,
    client: DashboardClient,
    max_ids: usize,
}

impl GrafanaSource {
    pub fn new(cache: Arc<DashboardCache>, client: DashboardClient, max_ids: usize) -> Self {
        Self {
            cache,
            client,
            max_ids,
        }
    }

    async fn handle(self, req: Request<Body>) -> Result<Response, BadgeError> {
        let path = req.uri().path().to_string();
        let segments: Vec<&str> = path.split('/').collect();
        if segments.len() < 4 {
            return Err(BadgeError::MissingSegments);
        }

        match segments[3] {
            "dashboard-count" | "dashboard-counts" | "dashboard-download"
            | "dashboard-downloads" => self.download_count(&segments).await,
            _ => Err(BadgeError::UnknownOperation),
        }
    }

    /// Make sure data is fresh and report the download count for the
    /// requested dashboards.
    async fn download_count(&self, segments: &[&str]) -> Result<Response, BadgeError> {
        if segments.len() != 5 {
            return Err(BadgeError::MissingSegments);
        }

        let ids: Vec<String> = segments[4].split(',').map(str::to_string).collect();
        if ids.len() > self.max_ids {
            return Err(BadgeError::TooManyIds);
        }

        let (mut counter, fetch) = self.cache.check_existing(&ids);
        tracing::debug!(
            requested = ids.len(),
            stale = fetch.len(),
            "dashboard count request"
        );

        if !fetch.is_empty() {
            let boards = self.client.fetch_many(&fetch).await?;
            counter += self.cache.merge(boards);
        }

        // This format works with badgen.net.
        let reply = format!(
            r#"{{"subject": "{} dashboards", "status": {}}}"#,
            ids.len(),
            counter
        );
        Ok(reply.into_response())
    }
}

impl BadgeSource for GrafanaSource {
    fn serve(&self, req: Request<Body>) -> BoxFuture<'static, Result<Response, BadgeError>> {
        let source = self.clone();
        Box::pin(async move { source.handle(req).await })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use std::time::{Duration, Instant};

    use crate::cache::Dashboard;

    /// A source whose upstream is unreachable: any fetch attempt
    /// fails, so these tests prove which paths avoid the network.
    fn offline_source(max_ids: usize) -> (GrafanaSource, Arc<DashboardCache>) {
        let cache = Arc::new(DashboardCache::new(Duration::from_secs(3600)));
        let client = DashboardClient::new(
            "http://127.0.0.1:1/".to_string(),
            Duration::from_millis(200),
        );
        (GrafanaSource::new(cache.clone(), client, max_ids), cache)
    }

    fn request(path: &str) -> Request<Body> {
        Request::builder().uri(path).body(Body::empty()).unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_operation_aliases_all_select_count() {
        let (source, cache) = offline_source(50);
        cache.merge(vec![Dashboard {
            id: 100,
            name: "n".into(),
            downloads: 5,
            fetched_at: Instant::now(),
        }]);

        for op in [
            "dashboard-count",
            "dashboard-counts",
            "dashboard-download",
            "dashboard-downloads",
        ] {
            let response = source
                .serve(request(&format!("/badgedata/grafana/{op}/100")))
                .await
                .unwrap();
            assert_eq!(
                body_text(response).await,
                r#"{"subject": "1 dashboards", "status": 5}"#
            );
        }
    }

    #[tokio::test]
    async fn test_unknown_operation_is_gone() {
        let (source, _cache) = offline_source(50);
        let err = source
            .serve(request("/badgedata/grafana/dashboard-json/100"))
            .await
            .unwrap_err();
        assert!(matches!(err, BadgeError::UnknownOperation));
    }

    #[tokio::test]
    async fn test_missing_operation_segment() {
        let (source, _cache) = offline_source(50);
        let err = source
            .serve(request("/badgedata/grafana"))
            .await
            .unwrap_err();
        assert!(matches!(err, BadgeError::MissingSegments));
    }

    #[tokio::test]
    async fn test_missing_ids_segment() {
        let (source, _cache) = offline_source(50);
        let err = source
            .serve(request("/badgedata/grafana/dashboard-count"))
            .await
            .unwrap_err();
        assert!(matches!(err, BadgeError::MissingSegments));
    }

    #[tokio::test]
    async fn test_too_many_ids_rejected_before_any_work() {
        let (source, cache) = offline_source(2);
        let err = source
            .serve(request("/badgedata/grafana/dashboard-count/1,2,3"))
            .await
            .unwrap_err();
        assert!(matches!(err, BadgeError::TooManyIds));
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_fresh_cache_serves_without_network() {
        let (source, cache) = offline_source(50);
        cache.merge(vec![
            Dashboard {
                id: 100,
                name: "a".into(),
                downloads: 5,
                fetched_at: Instant::now(),
            },
            Dashboard {
                id: 101,
                name: "b".into(),
                downloads: 7,
                fetched_at: Instant::now(),
            },
        ]);

        // The upstream is unreachable, so a fetch attempt would error.
        let response = source
            .serve(request("/badgedata/grafana/dashboard-count/100,101"))
            .await
            .unwrap();
        assert_eq!(
            body_text(response).await,
            r#"{"subject": "2 dashboards", "status": 12}"#
        );
    }

    #[tokio::test]
    async fn test_duplicate_ids_reported_per_occurrence() {
        let (source, cache) = offline_source(50);
        cache.merge(vec![Dashboard {
            id: 100,
            name: "a".into(),
            downloads: 5,
            fetched_at: Instant::now(),
        }]);

        let response = source
            .serve(request("/badgedata/grafana/dashboard-count/100,100"))
            .await
            .unwrap();
        assert_eq!(
            body_text(response).await,
            r#"{"subject": "2 dashboards", "status": 10}"#
        );
    }

    #[tokio::test]
    async fn test_invalid_id_leaves_cache_unmodified() {
        let (source, cache) = offline_source(50);
        let err = source
            .serve(request("/badgedata/grafana/dashboard-count/abc"))
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "unable to get data invalid dashboard ID: abc"
        );
        assert!(cache.is_empty());
    }
}
