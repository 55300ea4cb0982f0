//! Lock-free request dispatch over a sealed route snapshot.

use std::collections::HashMap;
use std::sync::Arc;

use axum::body::Body;
use axum::http::Request;
use axum::response::Response;

use super::BadgeSource;
use crate::error::BadgeError;

/// Immutable route snapshot produced by sealing a registry.
///
/// Cloning is cheap; every clone shares the same snapshot.
#[derive(Clone)]
pub struct Dispatcher {
    routes: Arc<HashMap<String, Arc<dyn BadgeSource>>>,
}

impl Dispatcher {
    pub(crate) fn new(routes: HashMap<String, Arc<dyn BadgeSource>>) -> Self {
        Self {
            routes: Arc::new(routes),
        }
    }

    /// Route a request to the source named by its third path segment.
    ///
    /// Path shape: `/<prefix>/<source-name>/...`. The matched source
    /// receives the request unmodified, remaining segments and query
    /// included.
    pub async fn dispatch(&self, req: Request<Body>) -> Result<Response, BadgeError> {
        let path = req.uri().path().to_string();
        let segments: Vec<&str> = path.split('/').collect();
        if segments.len() < 3 {
            return Err(BadgeError::MissingSegments);
        }

        let name = segments[2];
        let source = self
            .routes
            .get(name)
            .ok_or_else(|| BadgeError::UnknownSource(name.to_string()))?
            .clone();

        source.serve(req).await
    }
}
