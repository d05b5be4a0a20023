//! Start/stop toggling of a single container.
//!
//! The toggle reads the current state and then issues the opposite command. The two steps
//! are not atomic: if another client changes the container in between, the command is
//! issued based on the stale state and the engine decides the outcome.
use std::fmt;

use crate::container::ContainerID;
use crate::runtime::{self, ContainerRuntime};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to inspect container `{id}`: {source}")]
    Inspect {
        id: ContainerID,
        #[source]
        source: runtime::Error,
    },
    #[error("failed to stop container `{id}`: {source}")]
    Stop {
        id: ContainerID,
        #[source]
        source: runtime::Error,
    },
    #[error("failed to start container `{id}`: {source}")]
    Start {
        id: ContainerID,
        #[source]
        source: runtime::Error,
    },
}

impl Error {
    /// Returns `true` if the container does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Error::Inspect {
                source: runtime::Error::NotFound(_),
                ..
            }
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// The command a toggle issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Transition {
    Started,
    Stopped,
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transition::Started => f.write_str("started"),
            Transition::Stopped => f.write_str("stopped"),
        }
    }
}

/// Stops the container if it is running, starts it otherwise.
///
/// Stopping uses the engine's default grace period.
///
/// # Errors
///
/// - [`Error::Inspect`] if the container does not exist or cannot be inspected. Neither
///   start nor stop is attempted.
/// - [`Error::Stop`] / [`Error::Start`] if the issued command fails.
pub async fn toggle<R: ContainerRuntime>(runtime: &R, id: &ContainerID) -> Result<Transition> {
    let state = runtime
        .inspect(id)
        .await
        .map_err(|source| Error::Inspect {
            id: id.clone(),
            source,
        })?;
    log::debug!(
        "container_id={}, running={}, status={}, exit_code={:?}, started_at={:?}, finished_at={:?}",
        id,
        state.running,
        state.status,
        state.exit_code,
        state.started_at,
        state.finished_at
    );

    if state.running {
        log::info!("Stopping container `{}`", id);
        runtime.stop(id).await.map_err(|source| Error::Stop {
            id: id.clone(),
            source,
        })?;
        Ok(Transition::Stopped)
    } else {
        log::info!("Starting container `{}` (state: {})", id, state.status);
        runtime.start(id).await.map_err(|source| Error::Start {
            id: id.clone(),
            source,
        })?;
        Ok(Transition::Started)
    }
}
