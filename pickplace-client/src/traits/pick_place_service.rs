use std::fmt;

use auto_impl::auto_impl;
use nalgebra as na;

use super::Grasp;
use crate::error::Error;

/// Result of a pick or place request to the motion planning service
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlanningOutcome {
    Succeeded,
    Failed,
    /// The service could not interpret its result, the motion itself may
    /// have been executed.
    UnsupportedInput,
}

impl PlanningOutcome {
    /// Whether the outcome counts as a success, `UnsupportedInput` is decided
    /// by the caller.
    pub fn is_success(self, unsupported_input_is_success: bool) -> bool {
        match self {
            PlanningOutcome::Succeeded => true,
            PlanningOutcome::Failed => false,
            PlanningOutcome::UnsupportedInput => unsupported_input_is_success,
        }
    }
}

impl fmt::Display for PlanningOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanningOutcome::Succeeded => write!(f, "succeeded"),
            PlanningOutcome::Failed => write!(f, "failed"),
            PlanningOutcome::UnsupportedInput => write!(f, "unsupported input"),
        }
    }
}

#[auto_impl(Box, Arc)]
pub trait PickPlaceService: Send + Sync {
    /// Plans and executes picking up `object_id` with one of `grasps`.
    fn pick(&self, object_id: &str, grasps: &[Grasp]) -> Result<PlanningOutcome, Error>;

    /// Plans and executes placing the held `object_id` at `pose`.
    fn place(&self, object_id: &str, pose: &na::Isometry3<f64>) -> Result<PlanningOutcome, Error>;
}
