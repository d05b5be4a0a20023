use crate::container::{ContainerID, ContainerState};
use crate::discovery::DiscoveredContainer;

use super::RawStatsSample;

/// Identity, status and derived resource usage of one container at one point in time.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ContainerSnapshot {
    name: String,
    id: ContainerID,
    status_text: String,
    state: ContainerState,
    cpu_percent: f64,
    memory_usage_mb: u64,
    published_port: Option<u16>,
}

impl ContainerSnapshot {
    /// Derives a snapshot from a discovered container and one stats sample of it.
    ///
    /// Only the first port mapping is considered. A mapping that is not published to the
    /// host yields no port.
    pub fn new(container: DiscoveredContainer, sample: &RawStatsSample) -> Self {
        let published_port = container
            .ports
            .first()
            .and_then(|port| port.public_port)
            .filter(|&port| port != 0);
        let name = container.display_name().to_owned();

        Self {
            name,
            id: container.id,
            status_text: container.status,
            state: container.state,
            cpu_percent: sample.cpu_percent(),
            memory_usage_mb: sample.memory_usage_mb(),
            published_port,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn id(&self) -> &ContainerID {
        &self.id
    }

    pub fn status_text(&self) -> &str {
        &self.status_text
    }

    pub fn state(&self) -> ContainerState {
        self.state
    }

    pub fn cpu_percent(&self) -> f64 {
        self.cpu_percent
    }

    pub fn memory_usage_mb(&self) -> u64 {
        self.memory_usage_mb
    }

    pub fn published_port(&self) -> Option<u16> {
        self.published_port
    }
}
