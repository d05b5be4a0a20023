use crate::container::ContainerID;
use crate::discovery;
use crate::lifecycle::{self, Transition};
use crate::metrics::{self, ContainerSnapshot};
use crate::runtime::ContainerRuntime;

/// Read and write paths of the dashboard over one shared engine client.
///
/// Holds no per-request state: every call goes to the engine.
#[derive(Debug)]
pub struct Dashboard<R> {
    runtime: R,
    name_filter: String,
}

impl<R: ContainerRuntime> Dashboard<R> {
    pub fn new(runtime: R, name_filter: impl Into<String>) -> Self {
        Self {
            runtime,
            name_filter: name_filter.into(),
        }
    }

    /// Discovers the matching containers and derives a fresh snapshot for each.
    ///
    /// # Errors
    ///
    /// Fails only if discovery fails. Containers whose stats cannot be read are left out.
    pub async fn snapshots(&self) -> discovery::Result<Vec<ContainerSnapshot>> {
        let containers = discovery::discover(&self.runtime, &self.name_filter).await?;
        Ok(metrics::collect_all(&self.runtime, containers).await)
    }

    /// Flips the container between running and stopped.
    ///
    /// # Errors
    ///
    /// See [`lifecycle::toggle`].
    pub async fn toggle(&self, id: &ContainerID) -> lifecycle::Result<Transition> {
        lifecycle::toggle(&self.runtime, id).await
    }

    pub fn runtime(&self) -> &R {
        &self.runtime
    }
}
