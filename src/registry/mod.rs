//! Data-source registry and request dispatch.
//!
//! # Data Flow
//! ```text
//! Assembly (at startup):
//!     Registry::register(name, source)   [any number, defined order]
//!     → Registry::build_dispatcher()     [snapshot copy, one time]
//!     → Dispatcher                       [immutable, lock-free]
//!
//! Per request:
//!     Dispatcher::dispatch(request)
//!     → split path, look up source by name
//!     → delegate the untouched request to the source
//! ```
//!
//! # Design Decisions
//! - Registrations mutate under a lock; dispatch never locks
//! - The snapshot trades a one-time copy for lock-free serving
//! - Registrations after a snapshot do not reach that snapshot

mod dispatch;

pub use dispatch::Dispatcher;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use futures_util::future::BoxFuture;

use crate::error::BadgeError;

/// A registered data source serving one route name.
///
/// The source receives the full original request, path and query
/// untouched, and produces either a response or a typed error.
pub trait BadgeSource: Send + Sync {
    fn serve(&self, req: Request<Body>) -> BoxFuture<'static, Result<Response, BadgeError>>;
}

/// Registration table for data sources.
///
/// Each source registers itself exactly once during assembly; the
/// outer server then calls [`Registry::build_dispatcher`] to seal the
/// table into a serving snapshot. There is no way to unregister.
#[derive(Default)]
pub struct Registry {
    routes: Mutex<HashMap<String, Arc<dyn BadgeSource>>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the source serving `name`.
    ///
    /// Registrations made after [`Registry::build_dispatcher`] do not
    /// reach dispatchers that were already built.
    pub fn register(&self, name: impl Into<String>, source: Arc<dyn BadgeSource>) {
        let mut routes = self.routes.lock().expect("registry lock poisoned");
        routes.insert(name.into(), source);
    }

    /// Seal the current table into an immutable dispatch snapshot.
    ///
    /// We copy the routes into a new map so dispatch can avoid
    /// locking on every request.
    pub fn build_dispatcher(&self) -> Dispatcher {
        let routes = self.routes.lock().expect("registry lock poisoned");
        Dispatcher::new(routes.clone())
    }
}
