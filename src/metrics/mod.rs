//! Per-policy operation counters (feature `metrics`).
//!
//! Each structure owns its recorder and exposes `metrics_snapshot()`, which
//! copies the counters together with a few gauges (length, capacity).

pub mod cell;
pub mod metrics_impl;
pub mod snapshot;
pub mod traits;
