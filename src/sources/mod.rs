//! Data sources that plug into the registry.
//!
//! Each source owns its cache and upstream access and is constructed
//! explicitly during assembly; registration order is defined by the
//! caller, never by load-time side effects.

pub mod grafana;

pub use grafana::GrafanaSource;
