use std::collections::HashSet;

use crate::container::{ContainerID, ContainerState};
use crate::runtime::{self, ContainerRuntime, ContainerSummary, PortMapping};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("container engine unavailable: {0}")]
    RuntimeUnavailable(#[source] runtime::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// A container selected by [`discover`], not yet enriched with stats.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredContainer {
    pub id: ContainerID,
    pub names: Vec<String>,
    pub status: String,
    pub state: ContainerState,
    pub ports: Vec<PortMapping>,
}

impl DiscoveredContainer {
    /// The first name reported by the engine, or the id if the container has none.
    pub fn display_name(&self) -> &str {
        self.names
            .first()
            .map(String::as_str)
            .unwrap_or_else(|| self.id.as_str())
    }
}

/// Lists all containers, running or not, with a name containing `name_filter`.
///
/// The filter is a plain substring match. Containers are returned in the order the engine
/// lists them. Entries with an empty or malformed id, or an id already seen in this pass,
/// are dropped with a warning.
///
/// # Errors
///
/// Returns [`Error::RuntimeUnavailable`] if the engine cannot be reached or the list request
/// fails. No partial result is returned in that case.
pub async fn discover<R: ContainerRuntime>(
    runtime: &R,
    name_filter: &str,
) -> Result<Vec<DiscoveredContainer>> {
    let summaries = runtime
        .list_containers(name_filter)
        .await
        .map_err(Error::RuntimeUnavailable)?;
    log::debug!(
        "Engine listed {} containers for filter `{}`",
        summaries.len(),
        name_filter
    );

    let mut seen = HashSet::with_capacity(summaries.len());
    let containers: Vec<DiscoveredContainer> = summaries
        .into_iter()
        .filter(|summary| summary.names.iter().any(|name| name.contains(name_filter)))
        .filter_map(|summary| {
            let container = into_discovered(summary)?;
            if !seen.insert(container.id.clone()) {
                log::warn!("Skipping duplicate container id `{}`", container.id);
                return None;
            }
            Some(container)
        })
        .collect();
    log::debug!("Discovered {} containers", containers.len());

    Ok(containers)
}

fn into_discovered(summary: ContainerSummary) -> Option<DiscoveredContainer> {
    match ContainerID::new(&summary.id) {
        Ok(id) => Some(DiscoveredContainer {
            id,
            names: summary.names,
            status: summary.status,
            state: summary.state,
            ports: summary.ports,
        }),
        Err(err) => {
            log::warn!("Skipping container {:?}: {}", summary.names, err);
            None
        }
    }
}
