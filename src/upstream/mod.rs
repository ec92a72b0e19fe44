//! Upstream Stats Endpoints
//!
//! HTTP consumer of the four collaborator endpoints that provide the
//! dashboard's aggregate counts (users, vehicles, licenses, land).
//! Requests carry a bearer credential and a bounded timeout; failures are
//! classified so the aggregator can substitute fallback values per group.

mod client;

pub use client::{StatsClient, UpstreamError};
