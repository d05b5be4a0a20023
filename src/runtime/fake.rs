//! In-memory [`ContainerRuntime`] for tests.
use std::sync::Mutex;

use super::{ContainerRuntime, ContainerSummary, Error, InspectedState, PortMapping, Result};
use crate::container::{ContainerID, ContainerState};
use crate::metrics::RawStatsSample;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Call {
    List,
    Stats,
    Inspect,
    Start,
    Stop,
}

#[derive(Debug, Clone)]
struct FakeContainer {
    summary: ContainerSummary,
    /// `None` makes the stats request fail.
    stats: Option<RawStatsSample>,
}

#[derive(Debug, Default)]
pub(crate) struct FakeRuntime {
    containers: Mutex<Vec<FakeContainer>>,
    calls: Mutex<Vec<(Call, String)>>,
    unavailable: bool,
    failing_start: bool,
    failing_stop: bool,
}

fn engine_error(message: &str) -> bollard::errors::Error {
    bollard::errors::Error::DockerResponseServerError {
        status_code: 500,
        message: message.to_owned(),
    }
}

impl FakeRuntime {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_container(
        self,
        id: &str,
        name: &str,
        state: ContainerState,
        stats: Option<RawStatsSample>,
    ) -> Self {
        self.with_ports(id, name, state, stats, Vec::new())
    }

    pub(crate) fn with_ports(
        self,
        id: &str,
        name: &str,
        state: ContainerState,
        stats: Option<RawStatsSample>,
        ports: Vec<PortMapping>,
    ) -> Self {
        self.containers.lock().unwrap().push(FakeContainer {
            summary: ContainerSummary {
                id: id.to_owned(),
                names: vec![format!("/{name}")],
                status: format!("fake status of {name}"),
                state,
                ports,
            },
            stats,
        });
        self
    }

    pub(crate) fn unavailable(mut self) -> Self {
        self.unavailable = true;
        self
    }

    pub(crate) fn failing_start(mut self) -> Self {
        self.failing_start = true;
        self
    }

    pub(crate) fn failing_stop(mut self) -> Self {
        self.failing_stop = true;
        self
    }

    pub(crate) fn calls(&self) -> Vec<(Call, String)> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn count(&self, call: Call) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(c, _)| *c == call)
            .count()
    }

    pub(crate) fn state_of(&self, id: &str) -> Option<ContainerState> {
        self.containers
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.summary.id == id)
            .map(|c| c.summary.state)
    }

    fn record(&self, call: Call, id: &str) {
        self.calls.lock().unwrap().push((call, id.to_owned()));
    }

    fn find(&self, id: &ContainerID) -> Result<FakeContainer> {
        self.containers
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.summary.id == id.as_str())
            .cloned()
            .ok_or_else(|| Error::NotFound(id.clone()))
    }

    fn set_state(&self, id: &ContainerID, state: ContainerState) {
        if let Some(c) = self
            .containers
            .lock()
            .unwrap()
            .iter_mut()
            .find(|c| c.summary.id == id.as_str())
        {
            c.summary.state = state;
        }
    }
}

impl ContainerRuntime for FakeRuntime {
    async fn list_containers(&self, name_filter: &str) -> Result<Vec<ContainerSummary>> {
        self.record(Call::List, name_filter);
        if self.unavailable {
            return Err(Error::List(engine_error("engine unavailable")));
        }
        Ok(self
            .containers
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.summary.names.iter().any(|n| n.contains(name_filter)))
            .map(|c| c.summary.clone())
            .collect())
    }

    async fn stats_once(&self, id: &ContainerID) -> Result<RawStatsSample> {
        self.record(Call::Stats, id.as_str());
        self.find(id)?.stats.ok_or_else(|| Error::Stats {
            id: id.clone(),
            source: engine_error("stats decode failed"),
        })
    }

    async fn inspect(&self, id: &ContainerID) -> Result<InspectedState> {
        self.record(Call::Inspect, id.as_str());
        let state = self.find(id)?.summary.state;
        Ok(InspectedState {
            running: matches!(state, ContainerState::Running | ContainerState::Paused),
            status: state,
            exit_code: Some(0),
            started_at: None,
            finished_at: None,
        })
    }

    async fn start(&self, id: &ContainerID) -> Result<()> {
        self.record(Call::Start, id.as_str());
        if self.failing_start {
            return Err(Error::Request {
                id: id.clone(),
                source: engine_error("cannot start"),
            });
        }
        self.set_state(id, ContainerState::Running);
        Ok(())
    }

    async fn stop(&self, id: &ContainerID) -> Result<()> {
        self.record(Call::Stop, id.as_str());
        if self.failing_stop {
            return Err(Error::Request {
                id: id.clone(),
                source: engine_error("cannot stop"),
            });
        }
        self.set_state(id, ContainerState::Exited);
        Ok(())
    }
}
