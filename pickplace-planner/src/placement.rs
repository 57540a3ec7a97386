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
mod free_cells;
mod placement_planner;
mod ring_sweep;

use nalgebra as na;

pub use self::{free_cells::*, placement_planner::*, ring_sweep::*};
use crate::grid::{ClearanceGrid, GridFrame};

/// A proposed pose for setting an object down
///
/// `id` is the position in the candidate list and is used as marker identity.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacementCandidate {
    pub id: usize,
    pub pose: na::Isometry3<f64>,
}

impl PlacementCandidate {
    pub fn new(id: usize, pose: na::Isometry3<f64>) -> Self {
        Self { id, pose }
    }

    pub fn position(&self) -> na::Vector3<f64> {
        self.pose.translation.vector
    }

    /// (roll, pitch, yaw) of the orientation
    pub fn euler_angles(&self) -> (f64, f64, f64) {
        self.pose.rotation.euler_angles()
    }
}

/// How to generate placement candidates
#[derive(Clone, Debug)]
pub enum PlacementStrategy<'a> {
    /// Every eligible cell of a solved field, in row-major order
    FreeCells {
        field: &'a ClearanceGrid,
        placement: CellPlacement,
    },
    /// Fixed poses around a center with a swept yaw
    RingSweep(RingSweep),
    /// The ring sweep, keeping only the poses above eligible cells
    FilteredRing {
        ring: RingSweep,
        field: &'a ClearanceGrid,
        frame: GridFrame,
    },
}

/// Generate the ordered candidate list of `strategy`
///
/// The list is tried in order by the caller; ids are `0..len`.
pub fn generate_candidates(strategy: &PlacementStrategy<'_>) -> Vec<PlacementCandidate> {
    let poses = match strategy {
        PlacementStrategy::FreeCells { field, placement } => free_cells(field)
            .into_iter()
            .map(|cell| placement.pose(cell))
            .collect::<Vec<_>>(),
        PlacementStrategy::RingSweep(ring) => ring.poses(),
        PlacementStrategy::FilteredRing { ring, field, frame } => {
            ring.poses_on_free_cells(field, frame)
        }
    };
    poses
        .into_iter()
        .enumerate()
        .map(|(id, pose)| PlacementCandidate::new(id, pose))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid;

    #[test]
    fn test_candidate_ids_follow_order() {
        let mut field = Grid::new(2, 2, 0.0);
        field.set(0, 1, 1.0);
        let placement = CellPlacement::default();
        let candidates = generate_candidates(&PlacementStrategy::FreeCells {
            field: &field,
            placement,
        });
        assert_eq!(candidates.len(), 3);
        for (i, c) in candidates.iter().enumerate() {
            assert_eq!(c.id, i);
        }
        // (x=0, y=0), (x=0, y=1), (x=1, y=1)
        assert!((candidates[0].position()[0] - 0.005).abs() < 1e-9);
        assert!((candidates[1].position()[1] - 0.015).abs() < 1e-9);
        assert!((candidates[2].position()[0] - 0.015).abs() < 1e-9);
    }

    #[test]
    fn test_ring_strategy() {
        let candidates =
            generate_candidates(&PlacementStrategy::RingSweep(RingSweep::default()));
        assert_eq!(candidates.len(), 36);
        assert_eq!(candidates.last().unwrap().id, 35);
    }
}
