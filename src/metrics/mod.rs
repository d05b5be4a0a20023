//! Point-in-time resource usage for discovered containers.
//!
//! The engine reports CPU time as monotonically increasing counters. A single stats
//! response bundles the current reading with the previous one, so CPU utilization can be
//! derived from one request without keeping any state between dashboard requests.
//!
//! # Key Components
//!
//! - [`RawStatsSample`]: the counters of one stats response and the pure derivations on them.
//! - [`ContainerSnapshot`]: the derived, display-ready record for one container.
//! - [`collect`] / [`collect_all`]: fetch samples and fold them into snapshots, skipping
//!   containers whose stats cannot be read.
mod collector;
mod sample;
mod snapshot;

pub use collector::{STATS_FAN_OUT, collect, collect_all};
pub use sample::{BYTES_PER_MEGABYTE, RawStatsSample};
pub use snapshot::ContainerSnapshot;
