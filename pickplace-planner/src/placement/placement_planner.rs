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
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::*;

use super::{generate_candidates, CellPlacement, PlacementCandidate, PlacementStrategy, RingSweep};
use crate::{
    errors::*,
    field::{CollisionFieldSolver, CollisionFieldSolverConfig},
    grid::{ClearanceGrid, OccupancyGrid},
    region::{RegionDescriptor, RegionRasterizer, RegionRasterizerConfig},
};

/// Which `PlacementStrategy` the planner uses
#[derive(Clone, Copy, Serialize, Deserialize, Debug, JsonSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum PlacementStrategyKind {
    #[default]
    FreeCells,
    RingSweep,
    FilteredRing,
}

#[derive(Clone, Serialize, Deserialize, Debug, JsonSchema, Default)]
#[serde(deny_unknown_fields)]
pub struct PlacementPlannerConfig {
    // TOML format has a restriction that if a table itself contains tables,
    // all keys with non-table values must be emitted first.
    #[serde(default)]
    pub strategy: PlacementStrategyKind,
    #[serde(default)]
    pub grid: RegionRasterizerConfig,
    #[serde(default)]
    pub field: CollisionFieldSolverConfig,
    #[serde(default)]
    pub cell_placement: CellPlacement,
    #[serde(default)]
    pub ring_sweep: RingSweep,
}

/// Region (and obstacles) -> solved field -> ordered placement candidates
#[derive(Clone, Debug)]
pub struct PlacementPlanner {
    rasterizer: RegionRasterizer,
    solver: CollisionFieldSolver,
    strategy: PlacementStrategyKind,
    cell_placement: CellPlacement,
    ring_sweep: RingSweep,
}

impl PlacementPlanner {
    pub fn new(config: &PlacementPlannerConfig) -> Result<Self> {
        Ok(Self {
            rasterizer: RegionRasterizer::new(&config.grid),
            solver: CollisionFieldSolver::from_config(&config.field)?,
            strategy: config.strategy,
            cell_placement: config.cell_placement.clone(),
            ring_sweep: config.ring_sweep.clone(),
        })
    }

    pub fn strategy(&self) -> PlacementStrategyKind {
        self.strategy
    }

    /// Occupancy the field is solved on: everything outside `region` is an
    /// obstacle, and so is every occupied cell of `obstacles`
    pub fn occupancy(
        &self,
        region: &RegionDescriptor,
        obstacles: Option<&OccupancyGrid>,
    ) -> Result<OccupancyGrid> {
        let outside = self.rasterizer.rasterize(region)?.inverted();
        match obstacles {
            Some(obstacles) => outside.union(obstacles),
            None => Ok(outside),
        }
    }

    /// Solve the field of `region`, the margin shrinks it inward
    pub fn solve(&self, region: &RegionDescriptor) -> Result<ClearanceGrid> {
        self.solver.solve(&self.occupancy(region, None)?)
    }

    /// Like `solve`, with `obstacles` merged in
    ///
    /// `obstacles` must have the size of the rasterized grid.
    pub fn solve_with_obstacles(
        &self,
        region: &RegionDescriptor,
        obstacles: &OccupancyGrid,
    ) -> Result<ClearanceGrid> {
        self.solver.solve(&self.occupancy(region, Some(obstacles))?)
    }

    /// Ordered candidates inside `region`, possibly empty
    pub fn plan(&self, region: &RegionDescriptor) -> Result<Vec<PlacementCandidate>> {
        self.plan_inner(region, None)
    }

    /// Ordered candidates inside `region` and away from `obstacles`
    pub fn plan_with_obstacles(
        &self,
        region: &RegionDescriptor,
        obstacles: &OccupancyGrid,
    ) -> Result<Vec<PlacementCandidate>> {
        self.plan_inner(region, Some(obstacles))
    }

    fn plan_inner(
        &self,
        region: &RegionDescriptor,
        obstacles: Option<&OccupancyGrid>,
    ) -> Result<Vec<PlacementCandidate>> {
        let candidates = match self.strategy {
            PlacementStrategyKind::RingSweep => {
                generate_candidates(&PlacementStrategy::RingSweep(self.ring_sweep.clone()))
            }
            PlacementStrategyKind::FreeCells => {
                let field = self.solver.solve(&self.occupancy(region, obstacles)?)?;
                generate_candidates(&PlacementStrategy::FreeCells {
                    field: &field,
                    placement: self.cell_placement.clone(),
                })
            }
            PlacementStrategyKind::FilteredRing => {
                let field = self.solver.solve(&self.occupancy(region, obstacles)?)?;
                generate_candidates(&PlacementStrategy::FilteredRing {
                    ring: self.ring_sweep.clone(),
                    field: &field,
                    frame: self.cell_placement.frame,
                })
            }
        };
        if candidates.is_empty() {
            warn!("no placement candidate for {:?}", region);
        } else {
            debug!(
                "{} placement candidates ({:?})",
                candidates.len(),
                self.strategy
            );
        }
        Ok(candidates)
    }
}
