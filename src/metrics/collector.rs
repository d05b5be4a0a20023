use futures::{StreamExt, future, stream};

use crate::discovery::DiscoveredContainer;
use crate::error::ResultOkLogExt;
use crate::runtime::ContainerRuntime;

use super::ContainerSnapshot;

/// Maximum number of stats requests in flight during one collection pass.
pub const STATS_FAN_OUT: usize = 8;

/// Fetches one stats sample for `container` and derives its snapshot.
///
/// Returns `None` if the sample cannot be fetched or decoded; the failure is logged and not
/// retried.
pub async fn collect<R: ContainerRuntime>(
    runtime: &R,
    container: DiscoveredContainer,
) -> Option<ContainerSnapshot> {
    let result = runtime.stats_once(&container.id).await;
    let sample = result.ok_log(format_args!(
        "failed reading container stats: container_id={}",
        container.id
    ))?;
    log::trace!("container_id={}, sample={:?}", container.id, sample);

    Some(ContainerSnapshot::new(container, &sample))
}

/// Collects snapshots for all containers, keeping the input order.
///
/// Containers whose stats are unavailable are omitted from the result. At most
/// [`STATS_FAN_OUT`] requests run concurrently.
pub async fn collect_all<R: ContainerRuntime>(
    runtime: &R,
    containers: Vec<DiscoveredContainer>,
) -> Vec<ContainerSnapshot> {
    let requested = containers.len();
    let snapshots: Vec<ContainerSnapshot> = stream::iter(containers)
        .map(|container| collect(runtime, container))
        .buffered(STATS_FAN_OUT)
        .filter_map(future::ready)
        .collect()
        .await;
    if snapshots.len() < requested {
        log::warn!(
            "Collected stats for {} of {} containers",
            snapshots.len(),
            requested
        );
    }

    snapshots
}
