//! Shared plumbing for the employee API crates: logging setup, HTTP payload
//! types, Prometheus counters and serde helpers.

pub mod types;
pub mod utils;
pub mod metrics;
