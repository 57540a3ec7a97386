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
use nalgebra as na;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    field::is_eligible,
    grid::{ClearanceGrid, GridCell, GridFrame},
};

/// Collect the eligible cells of a solved field in row-major order
///
/// An all-blocked field gives an empty list, which means there is no valid
/// placement.
pub fn free_cells(field: &ClearanceGrid) -> Vec<GridCell> {
    field
        .iter()
        .filter(|(_, _, v)| is_eligible(**v))
        .map(|(row, col, _)| GridCell::new(col, row))
        .collect()
}

/// Converts free cells into poses at a fixed height and orientation
#[derive(Clone, Serialize, Deserialize, Debug, JsonSchema, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CellPlacement {
    // TOML needs the plain values before the `frame` table.
    /// z of the poses [m]
    #[serde(default)]
    pub height: f64,
    #[serde(default)]
    pub roll: f64,
    #[serde(default)]
    pub pitch: f64,
    #[serde(default)]
    pub yaw: f64,
    #[serde(default)]
    pub frame: GridFrame,
}

impl Default for CellPlacement {
    fn default() -> Self {
        Self {
            height: 0.0,
            roll: 0.0,
            pitch: 0.0,
            yaw: 0.0,
            frame: GridFrame::default(),
        }
    }
}

impl CellPlacement {
    /// Pose above the center of `cell`
    pub fn pose(&self, cell: GridCell) -> na::Isometry3<f64> {
        let [x, y] = self.frame.cell_center(cell);
        na::Isometry3::from_parts(
            na::Translation3::new(x, y, self.height),
            na::UnitQuaternion::from_euler_angles(self.roll, self.pitch, self.yaw),
        )
    }
}
