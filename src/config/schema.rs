//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the
//! badge data service. All types derive Serde traits for
//! deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the badge data service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct BadgeConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Upstream dashboard API settings.
    pub upstream: UpstreamConfig,

    /// Cache freshness window and per-request id cap.
    pub cache: CacheConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Upstream dashboard API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Base URL of the dashboard JSON API. The dashboard id is
    /// appended as a path segment.
    pub base_url: String,

    /// Per-fetch timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: "https://grafana.com/api/dashboards/".to_string(),
            timeout_secs: 10,
        }
    }
}

/// Cache configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Seconds a fetched record stays fresh before it is refetched.
    pub refresh_secs: u64,

    /// Maximum number of comma-separated ids accepted in one request.
    pub max_ids: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            refresh_secs: 3600,
            max_ids: 50,
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_documented_constants() {
        let config = BadgeConfig::default();
        assert_eq!(config.cache.refresh_secs, 3600);
        assert_eq!(config.cache.max_ids, 50);
        assert_eq!(config.upstream.timeout_secs, 10);
        assert_eq!(
            config.upstream.base_url,
            "https://grafana.com/api/dashboards/"
        );
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: BadgeConfig = toml::from_str(
            r#"
            [cache]
            refresh_secs = 60
            "#,
        )
        .unwrap();
        assert_eq!(config.cache.refresh_secs, 60);
        assert_eq!(config.cache.max_ids, 50);
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
    }
}
