//! Client contract for the container engine.
//!
//! The dashboard only ever needs five capabilities from the engine: listing containers by
//! name, reading one stats sample, inspecting run state, and starting or stopping a
//! container. [`ContainerRuntime`] captures exactly those, [`DockerRuntime`] implements them
//! against the Docker Engine API.
mod docker;
mod error;
#[cfg(test)]
pub(crate) mod fake;

pub use docker::DockerRuntime;
pub use error::{Error, Result};

use crate::container::{ContainerID, ContainerState};
use crate::metrics::RawStatsSample;

/// A container as returned by a list request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerSummary {
    pub id: String,
    pub names: Vec<String>,
    /// Free-form status line, e.g. `Up 3 hours` or `Exited (0) 2 minutes ago`.
    pub status: String,
    pub state: ContainerState,
    pub ports: Vec<PortMapping>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortMapping {
    pub private_port: u16,
    /// Host port, if the container port is published.
    pub public_port: Option<u16>,
}

/// Run state details returned by an inspect request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InspectedState {
    /// `true` for running containers, including paused ones.
    pub running: bool,
    pub status: ContainerState,
    pub exit_code: Option<i64>,
    pub started_at: Option<String>,
    pub finished_at: Option<String>,
}

/// Operations the dashboard needs from a container engine.
///
/// Implementations hold a long-lived connection and must tolerate concurrent calls from
/// independent requests.
pub trait ContainerRuntime: Send + Sync + 'static {
    /// Lists all containers, running or not, whose name matches `name_filter`.
    fn list_containers(
        &self,
        name_filter: &str,
    ) -> impl Future<Output = Result<Vec<ContainerSummary>>> + Send;

    /// Fetches a single, non-streamed stats sample.
    fn stats_once(&self, id: &ContainerID) -> impl Future<Output = Result<RawStatsSample>> + Send;

    fn inspect(&self, id: &ContainerID) -> impl Future<Output = Result<InspectedState>> + Send;

    fn start(&self, id: &ContainerID) -> impl Future<Output = Result<()>> + Send;

    /// Stops the container using the engine's default grace period.
    fn stop(&self, id: &ContainerID) -> impl Future<Output = Result<()>> + Send;
}
