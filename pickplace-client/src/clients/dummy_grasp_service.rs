use std::sync::Mutex;

use crate::{
    error::Error,
    traits::{Grasp, GraspResponse, GraspService},
};

/// Dummy GraspService for debug or tests.
///
/// Returns the same grasps for every object.
#[derive(Debug, Default)]
pub struct DummyGraspService {
    pub response: GraspResponse,
    pub requested: Mutex<Vec<String>>,
}

impl DummyGraspService {
    pub fn new(grasps: Vec<Grasp>) -> Self {
        Self {
            response: GraspResponse {
                success: true,
                grasps,
            },
            requested: Mutex::default(),
        }
    }

    /// A service which never finds a grasp
    pub fn failing() -> Self {
        Self::default()
    }

    pub fn requested_objects(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

impl GraspService for DummyGraspService {
    fn grasps(&self, object_name: &str) -> Result<GraspResponse, Error> {
        self.requested.lock().unwrap().push(object_name.to_owned());
        Ok(self.response.clone())
    }
}
