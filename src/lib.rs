//! Badge Data Service Library
//!
//! Retrieves, caches and re-displays download counts from other
//! websites, in a JSON shape badgen.net can render.

pub mod cache;
pub mod config;
pub mod error;
pub mod http;
pub mod registry;
pub mod sources;
pub mod upstream;

pub use config::BadgeConfig;
pub use error::BadgeError;
pub use http::HttpServer;
pub use registry::{BadgeSource, Dispatcher, Registry};
