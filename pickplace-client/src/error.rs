use thiserror::Error;

use crate::PickPlaceState;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("pickplace-client: planner: {}", .0)]
    Planner(#[from] pickplace_planner::Error),
    #[error("pickplace-client: Busy: {} is requested while {}.", requested, state)]
    Busy {
        state: PickPlaceState,
        requested: PickPlaceState,
    },
    #[error("pickplace-client: Object {} is not in detected objects.", .0)]
    UnknownObject(String),
    #[error("pickplace-client: No grasps were found for object {}.", .0)]
    NoGrasps(String),
    #[error("pickplace-client: Failed to pick up object {}.", .0)]
    PickFailed(String),
    #[error(
        "pickplace-client: No valid placement for object {} ({} attempts).",
        object,
        attempts
    )]
    NoPlacement { object: String, attempts: usize },
    #[error("pickplace-client: Service: {}", message)]
    Service { message: String },
    #[error("pickplace-client: Other: {:?}", .0)]
    Other(#[from] anyhow::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
