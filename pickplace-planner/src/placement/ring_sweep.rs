/*
Copyright 2017 Takashi Ogura

Licensed under the Apache License, Version 2.0 (the "License");
you may not use this file except in compliance with the License.
You may obtain a copy of the License at

    http://www.apache.org/licenses/LICENSE-2.0

Unless required by applicable law or agreed to in writing, software
distributed under the License is distributed on an "AS IS" BASIS,
WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
See the License for the specific language governing permissions and
limitations under the License.
*/
use std::f64::consts::PI;

use nalgebra as na;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::*;

use crate::{
    field::is_eligible,
    grid::{ClearanceGrid, GridFrame},
};

/// Candidate poses at a constant radius and height around a center, with
/// the yaw swept over a full turn
#[derive(Clone, Serialize, Deserialize, Debug, JsonSchema, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RingSweep {
    /// (x, y, z) of the center [m]
    #[serde(default = "default_center")]
    pub center: [f64; 3],
    /// Distance of the poses from the center in the xy plane [m]
    #[serde(default)]
    pub radius: f64,
    /// Number of poses, the yaw step is 2pi / count
    #[serde(default = "default_count")]
    pub count: usize,
    /// Fixed roll of every pose [rad]
    #[serde(default)]
    pub roll: f64,
    /// Fixed pitch of every pose [rad]
    #[serde(default)]
    pub pitch: f64,
}

fn default_center() -> [f64; 3] {
    [0.7, 0.0, 0.05]
}

fn default_count() -> usize {
    36
}

impl Default for RingSweep {
    fn default() -> Self {
        Self {
            center: default_center(),
            radius: 0.0,
            count: default_count(),
            roll: 0.0,
            pitch: 0.0,
        }
    }
}

impl RingSweep {
    /// Yaw of the `i`-th pose
    pub fn yaw(&self, i: usize) -> f64 {
        i as f64 * 2.0 * PI / self.count as f64
    }

    pub fn pose(&self, i: usize) -> na::Isometry3<f64> {
        let yaw = self.yaw(i);
        let [x, y, z] = self.center;
        na::Isometry3::from_parts(
            na::Translation3::new(
                x + self.radius * yaw.cos(),
                y + self.radius * yaw.sin(),
                z,
            ),
            na::UnitQuaternion::from_euler_angles(self.roll, self.pitch, yaw),
        )
    }

    /// All the poses in yaw order
    pub fn poses(&self) -> Vec<na::Isometry3<f64>> {
        (0..self.count).map(|i| self.pose(i)).collect()
    }

    /// The poses whose position is above an eligible cell of `field`
    pub fn poses_on_free_cells(
        &self,
        field: &ClearanceGrid,
        frame: &GridFrame,
    ) -> Vec<na::Isometry3<f64>> {
        let poses = self.poses();
        let total = poses.len();
        let kept = poses
            .into_iter()
            .filter(|pose| {
                let p = pose.translation.vector;
                frame
                    .cell_at(p[0], p[1], field.rows(), field.cols())
                    .and_then(|cell| field.get(cell.y, cell.x))
                    .is_some_and(|v| is_eligible(*v))
            })
            .collect::<Vec<_>>();
        debug!("{} of {} ring poses are on free cells", kept.len(), total);
        kept
    }
}
