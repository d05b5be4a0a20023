use std::collections::HashMap;

use bollard::Docker;
use bollard::container::{
    InspectContainerOptions, ListContainersOptions, StartContainerOptions, Stats, StatsOptions,
    StopContainerOptions,
};
use futures::StreamExt;

use super::{ContainerRuntime, ContainerSummary, Error, InspectedState, PortMapping, Result};
use crate::container::{ContainerID, ContainerState};
use crate::metrics::RawStatsSample;

/// [`ContainerRuntime`] backed by the Docker Engine API.
///
/// Cloning is cheap and shares the underlying connection pool.
#[derive(Debug, Clone)]
pub struct DockerRuntime {
    docker: Docker,
}

impl DockerRuntime {
    /// Connects using the engine's local defaults (`DOCKER_HOST`, or the local unix socket).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Connect`] if the client cannot be constructed.
    pub fn connect() -> Result<Self> {
        let docker = Docker::connect_with_local_defaults().map_err(Error::Connect)?;
        log::debug!("Created container engine client");
        Ok(Self { docker })
    }
}

impl ContainerRuntime for DockerRuntime {
    async fn list_containers(&self, name_filter: &str) -> Result<Vec<ContainerSummary>> {
        let options = ListContainersOptions {
            all: true,
            filters: HashMap::from([("name".to_owned(), vec![name_filter.to_owned()])]),
            ..Default::default()
        };
        let containers = self
            .docker
            .list_containers(Some(options))
            .await
            .map_err(Error::List)?;

        Ok(containers.into_iter().map(ContainerSummary::from).collect())
    }

    async fn stats_once(&self, id: &ContainerID) -> Result<RawStatsSample> {
        // With `one_shot` disabled the engine waits for a second reading, so the response
        // carries a meaningful `precpu_stats` block.
        let options = StatsOptions {
            stream: false,
            one_shot: false,
        };
        let mut stream = std::pin::pin!(self.docker.stats(id.as_str(), Some(options)));
        match stream.next().await {
            Some(Ok(stats)) => Ok(stats.into()),
            Some(Err(source)) => Err(Error::Stats {
                id: id.clone(),
                source,
            }),
            None => Err(Error::EmptyStats(id.clone())),
        }
    }

    async fn inspect(&self, id: &ContainerID) -> Result<InspectedState> {
        let response = self
            .docker
            .inspect_container(id.as_str(), None::<InspectContainerOptions>)
            .await
            .map_err(|source| Error::for_container(id, source))?;
        let state = response.state.unwrap_or_default();

        Ok(InspectedState {
            running: state.running.unwrap_or(false),
            status: state
                .status
                .map(|status| parse_state(&status.to_string()))
                .unwrap_or(ContainerState::Unknown),
            exit_code: state.exit_code,
            started_at: state.started_at,
            finished_at: state.finished_at,
        })
    }

    async fn start(&self, id: &ContainerID) -> Result<()> {
        self.docker
            .start_container(id.as_str(), None::<StartContainerOptions<String>>)
            .await
            .map_err(|source| Error::for_container(id, source))
    }

    async fn stop(&self, id: &ContainerID) -> Result<()> {
        self.docker
            .stop_container(id.as_str(), None::<StopContainerOptions>)
            .await
            .map_err(|source| Error::for_container(id, source))
    }
}

fn parse_state(raw: &str) -> ContainerState {
    raw.parse().unwrap_or(ContainerState::Unknown)
}

impl From<bollard::models::ContainerSummary> for ContainerSummary {
    fn from(value: bollard::models::ContainerSummary) -> Self {
        Self {
            id: value.id.unwrap_or_default(),
            names: value.names.unwrap_or_default(),
            status: value.status.unwrap_or_default(),
            state: value
                .state
                .as_deref()
                .map(parse_state)
                .unwrap_or(ContainerState::Unknown),
            ports: value
                .ports
                .unwrap_or_default()
                .into_iter()
                .map(|port| PortMapping {
                    private_port: port.private_port,
                    public_port: port.public_port,
                })
                .collect(),
        }
    }
}

impl From<Stats> for RawStatsSample {
    fn from(stats: Stats) -> Self {
        Self {
            cpu_total_usage: stats.cpu_stats.cpu_usage.total_usage,
            precpu_total_usage: stats.precpu_stats.cpu_usage.total_usage,
            system_usage: stats.cpu_stats.system_cpu_usage.unwrap_or(0),
            presystem_usage: stats.precpu_stats.system_cpu_usage.unwrap_or(0),
            online_cpus: stats.cpu_stats.online_cpus.unwrap_or(0),
            per_cpu_usage: stats.cpu_stats.cpu_usage.percpu_usage.unwrap_or_default(),
            memory_usage_bytes: stats.memory_stats.usage.unwrap_or(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_from_engine_model() {
        let engine = bollard::models::ContainerSummary {
            id: Some("abc123".to_owned()),
            names: Some(vec!["/mc-survival".to_owned()]),
            status: Some("Up 2 hours".to_owned()),
            state: Some("running".to_owned()),
            ports: Some(vec![bollard::models::Port {
                private_port: 25565,
                public_port: Some(25565),
                ..Default::default()
            }]),
            ..Default::default()
        };

        let summary = ContainerSummary::from(engine);
        assert_eq!(summary.id, "abc123");
        assert_eq!(summary.names, vec!["/mc-survival".to_owned()]);
        assert_eq!(summary.status, "Up 2 hours");
        assert_eq!(summary.state, ContainerState::Running);
        assert_eq!(
            summary.ports,
            vec![PortMapping {
                private_port: 25565,
                public_port: Some(25565),
            }]
        );
    }

    #[test]
    fn test_summary_with_missing_fields() {
        let summary = ContainerSummary::from(bollard::models::ContainerSummary::default());
        assert!(summary.id.is_empty());
        assert!(summary.names.is_empty());
        assert!(summary.ports.is_empty());
        assert_eq!(summary.state, ContainerState::Unknown);
    }
}
