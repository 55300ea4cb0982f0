//! HTTP serving subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → registry::Dispatcher (route lookup, lock-free)
//!     → sources::* (operation parsing, cache, upstream fetch)
//!     → response
//! ```

pub mod server;

pub use server::{AppState, HttpServer};
