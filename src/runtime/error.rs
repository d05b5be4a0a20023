use crate::container::ContainerID;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to connect to the container engine: {0}")]
    Connect(#[source] bollard::errors::Error),
    #[error("failed to list containers: {0}")]
    List(#[source] bollard::errors::Error),
    #[error("no such container: {0}")]
    NotFound(ContainerID),
    #[error("failed to fetch stats for container `{id}`: {source}")]
    Stats {
        id: ContainerID,
        #[source]
        source: bollard::errors::Error,
    },
    #[error("container engine returned no stats sample for container `{0}`")]
    EmptyStats(ContainerID),
    #[error("request for container `{id}` failed: {source}")]
    Request {
        id: ContainerID,
        #[source]
        source: bollard::errors::Error,
    },
}

impl Error {
    /// Classifies an engine error for a single-container request, mapping `404` responses to
    /// [`Error::NotFound`].
    pub(super) fn for_container(id: &ContainerID, source: bollard::errors::Error) -> Self {
        match source {
            bollard::errors::Error::DockerResponseServerError {
                status_code: 404, ..
            } => Error::NotFound(id.clone()),
            source => Error::Request {
                id: id.clone(),
                source,
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
