use auto_impl::auto_impl;
use nalgebra as na;

use crate::error::Error;

/// A grasp proposed for an object
#[derive(Clone, Debug, PartialEq)]
pub struct Grasp {
    pub id: String,
    /// Pose of the gripper, relative to the object until corrected
    pub pose: na::Isometry3<f64>,
    pub quality: f64,
}

impl Grasp {
    pub fn new(id: impl Into<String>, pose: na::Isometry3<f64>, quality: f64) -> Self {
        Self {
            id: id.into(),
            pose,
            quality,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraspResponse {
    pub success: bool,
    pub grasps: Vec<Grasp>,
}

#[auto_impl(Box, Arc)]
pub trait GraspService: Send + Sync {
    /// Returns the candidate grasps of the object named `object_name`.
    ///
    /// Having no grasp is reported by `success == false`, not as an error.
    fn grasps(&self, object_name: &str) -> Result<GraspResponse, Error>;
}
