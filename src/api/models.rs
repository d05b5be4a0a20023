use crate::container::ContainerID;
use crate::lifecycle::Transition;

#[derive(Debug, serde::Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(err: impl std::fmt::Display) -> Self {
        Self {
            error: err.to_string(),
        }
    }
}

#[derive(Debug, serde::Serialize)]
pub struct ToggleResponse {
    pub id: ContainerID,
    pub transition: Transition,
}
