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
//! # Placement Planning Library for Pick and Place
//!
//! Turn an allowed table region into a grid, exclude the cells around
//! occupied ones, propose placement poses on what remains, and interpolate
//! the arm between joint configurations.
//!

#![warn(rust_2018_idioms)]

mod errors;

pub mod field;

mod funcs;

pub mod grid;

mod joint;

pub mod placement;

pub mod region;

pub use crate::{
    errors::{Error, Result},
    field::{is_eligible, is_occupied, solve_field, CollisionFieldSolver, CollisionFieldSolverConfig},
    funcs::*,
    grid::{ClearanceGrid, Grid, GridCell, GridFrame, OccupancyGrid, DEFAULT_GRID_SIZE},
    joint::*,
    placement::{
        free_cells, generate_candidates, CellPlacement, PlacementCandidate, PlacementPlanner,
        PlacementPlannerConfig, PlacementStrategy, PlacementStrategyKind, RingSweep,
    },
    region::{
        rasterize, RegionDescriptor, RegionRasterizer, RegionRasterizerConfig, RegionShape,
    },
};
