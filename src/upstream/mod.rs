//! Upstream dashboard API access.
//!
//! # Data Flow
//! ```text
//! Stale ids (from cache::check_existing)
//!     → client.rs (validate id, GET base_url + id, decode JSON)
//!     → Vec<Dashboard> stamped with fetch time
//!     → cache::merge
//! ```
//!
//! # Design Decisions
//! - Sequential fetches; the batch size is capped upstream of here
//! - First failure aborts the batch, nothing partial survives
//! - Every request carries a bounded timeout

pub mod client;

pub use client::{DashboardClient, FetchError};
