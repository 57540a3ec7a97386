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

use crate::{
    errors::*,
    grid::{ClearanceGrid, OccupancyGrid},
};

/// Indices from `trunc(center - radius)` to `ceil(center + radius)` (inclusive)
///
/// The indices can be negative or beyond the grid, callers skip them.
fn scan_range(center: usize, radius: f64) -> std::ops::RangeInclusive<i64> {
    let center = center as f64;
    ((center - radius).trunc() as i64)..=((center + radius).ceil() as i64)
}

fn raise(grid: &mut ClearanceGrid, row: usize, col: i64, value: f64) {
    if col < 0 {
        return;
    }
    if let Some(cell) = grid.get_mut(row, col as usize) {
        if value > *cell {
            *cell = value;
        }
    }
}

/// Horizontal margin: every occupied cell pushes `max(radius - |dcol|, 0)`
/// into its row, so an occupied cell holds `radius` whatever its flag is.
fn row_pass(grid: &OccupancyGrid, radius: f64) -> ClearanceGrid {
    let mut horizontal = grid.map(|_| 0.0);
    for (row, col, occupancy) in grid.iter() {
        if !is_occupied(*occupancy) {
            continue;
        }
        for col_prime in scan_range(col, radius) {
            let distance = (col_prime - col as i64).abs() as f64;
            raise(&mut horizontal, row, col_prime, (radius - distance).max(0.0));
        }
    }
    horizontal
}

/// Vertical spread of the horizontal margin.
///
/// The value computed for (row', col) is written to (col, row'), i.e. the
/// result is transposed against the row pass. Only obstacles on the diagonal
/// of a square grid get a round margin, others get their horizontal stripe
/// plus a disc around the mirrored cell.
fn column_pass(horizontal: &ClearanceGrid, radius: f64) -> ClearanceGrid {
    let mut combined = horizontal.clone();
    for (row, col, value) in horizontal.iter() {
        if *value <= 0.0 {
            continue;
        }
        let column_distance = radius - *value;
        for row_prime in scan_range(row, radius) {
            let row_distance = (row_prime - row as i64) as f64;
            let distance = (column_distance * column_distance + row_distance * row_distance).sqrt();
            // transposed
            if row_prime >= 0 {
                raise(&mut combined, col, row_prime, (radius - distance).max(0.0));
            }
        }
    }
    combined
}

/// Exclude the cells around obstacles with a margin of `radius` cells
///
/// Every cell of the returned grid is in `[0, 1]`: 0 is eligible for
/// placement, anything positive is not. Occupied cells are always 1 and only
/// the presence of an obstacle matters, not the value of its flag. This is a
/// two-pass approximation and not a euclidean distance transform (see
/// `column_pass`).
/// Overlapping margins keep the largest value. Indices out of the grid are
/// skipped.
///
/// # Example
///
/// ```
/// let mut grid = pickplace_planner::OccupancyGrid::new(11, 11, 0);
/// grid.set(5, 5, 1);
/// let field = pickplace_planner::solve_field(&grid, 3.0).unwrap();
/// assert!(*field.get(5, 7).unwrap() > 0.0);
/// assert_eq!(*field.get(5, 8).unwrap(), 0.0);
/// assert_eq!(*field.get(0, 0).unwrap(), 0.0);
/// ```
pub fn solve_field(grid: &OccupancyGrid, radius: f64) -> Result<ClearanceGrid> {
    if !(radius.is_finite() && radius >= 0.0) {
        return Err(Error::InvalidRadius(radius));
    }
    let horizontal = row_pass(grid, radius);
    let mut field = column_pass(&horizontal, radius).map(|v| v.min(1.0));
    // a radius below one cell still blocks the obstacle itself
    for (row, col, occupancy) in grid.iter() {
        if is_occupied(*occupancy) {
            field.set(row, col, 1.0);
        }
    }
    debug!(
        "solved {}x{} field with radius {}: {} cells blocked",
        field.rows(),
        field.cols(),
        radius,
        field.iter().filter(|(_, _, v)| !is_eligible(**v)).count()
    );
    Ok(field)
}

/// Occupancy is a flag, any positive value is an obstacle
pub fn is_occupied(value: u8) -> bool {
    value > 0
}

/// Whether a cell value of a solved field allows placement
pub fn is_eligible(value: f64) -> bool {
    value <= 0.0
}

#[derive(Clone, Serialize, Deserialize, Debug, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct CollisionFieldSolverConfig {
    /// Safety margin [cell]
    #[serde(default = "default_radius")]
    pub radius: f64,
}

fn default_radius() -> f64 {
    3.0
}

impl Default for CollisionFieldSolverConfig {
    fn default() -> Self {
        Self {
            radius: default_radius(),
        }
    }
}

/// `solve_field` with a validated radius
#[derive(Clone, Debug)]
pub struct CollisionFieldSolver {
    radius: f64,
}

impl CollisionFieldSolver {
    pub fn new(radius: f64) -> Result<Self> {
        if !(radius.is_finite() && radius >= 0.0) {
            return Err(Error::InvalidRadius(radius));
        }
        Ok(Self { radius })
    }

    pub fn from_config(config: &CollisionFieldSolverConfig) -> Result<Self> {
        Self::new(config.radius)
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn solve(&self, grid: &OccupancyGrid) -> Result<ClearanceGrid> {
        solve_field(grid, self.radius)
    }
}
