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

use crate::errors::*;

/// Default number of rows and columns (1m x 1m at 1cm resolution)
pub const DEFAULT_GRID_SIZE: usize = 100;

/// Grid of 0 (free) / >0 (occupied) cells
pub type OccupancyGrid = Grid<u8>;

/// Grid of clearance scores, 0 is eligible for placement and >0 is not
pub type ClearanceGrid = Grid<f64>;

/// Row-major 2D grid with equal-length rows
#[derive(Clone, Debug, PartialEq)]
pub struct Grid<T> {
    rows: usize,
    cols: usize,
    cells: Vec<T>,
}

impl<T: Clone> Grid<T> {
    /// Create a `rows` x `cols` grid filled with `value`
    pub fn new(rows: usize, cols: usize, value: T) -> Self {
        Self {
            rows,
            cols,
            cells: vec![value; rows * cols],
        }
    }

    /// Create a grid from nested rows
    ///
    /// Every row must have the length of the first one.
    ///
    /// ```
    /// let grid = pickplace_planner::Grid::from_rows(vec![vec![0u8, 1], vec![1, 0]]).unwrap();
    /// assert_eq!(grid.get(0, 1), Some(&1));
    /// assert!(pickplace_planner::Grid::from_rows(vec![vec![0u8, 1], vec![1]]).is_err());
    /// ```
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        let num_rows = rows.len();
        let mut cells = Vec::with_capacity(num_rows * cols);
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != cols {
                return Err(Error::RaggedGrid {
                    row,
                    len: values.len(),
                    expected: cols,
                });
            }
            cells.extend(values);
        }
        Ok(Self {
            rows: num_rows,
            cols,
            cells,
        })
    }

    /// Set `value` at (row, col), returns false if the cell is out of the grid
    pub fn set(&mut self, row: usize, col: usize, value: T) -> bool {
        match self.index(row, col) {
            Some(index) => {
                self.cells[index] = value;
                true
            }
            None => false,
        }
    }

    /// Nested rows, the inverse of `from_rows`
    pub fn to_rows(&self) -> Vec<Vec<T>> {
        if self.cols == 0 {
            return vec![vec![]; self.rows];
        }
        self.cells.chunks(self.cols).map(<[T]>::to_vec).collect()
    }
}

impl<T> Grid<T> {
    /// Create a grid by evaluating `f(row, col)` for every cell
    pub fn from_fn<F>(rows: usize, cols: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> T,
    {
        let mut cells = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                cells.push(f(row, col));
            }
        }
        Self { rows, cols, cells }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    fn index(&self, row: usize, col: usize) -> Option<usize> {
        if row < self.rows && col < self.cols {
            Some(row * self.cols + col)
        } else {
            None
        }
    }

    /// Value at (row, col), `None` if out of the grid
    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        self.index(row, col).map(|i| &self.cells[i])
    }

    /// Value at signed (row, col), `None` if out of the grid
    pub fn get_signed(&self, row: i64, col: i64) -> Option<&T> {
        if row < 0 || col < 0 {
            return None;
        }
        self.get(row as usize, col as usize)
    }

    pub(crate) fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut T> {
        match self.index(row, col) {
            Some(i) => self.cells.get_mut(i),
            None => None,
        }
    }

    /// Iterate over `(row, col, value)` in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &T)> + '_ {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, v)| (i / cols, i % cols, v))
    }

    /// Convert every value with `f`
    pub fn map<U, F>(&self, f: F) -> Grid<U>
    where
        F: FnMut(&T) -> U,
    {
        Grid {
            rows: self.rows,
            cols: self.cols,
            cells: self.cells.iter().map(f).collect(),
        }
    }
}

impl OccupancyGrid {
    /// Occupied where `self` is free and free where it is occupied
    pub fn inverted(&self) -> Self {
        self.map(|v| u8::from(*v == 0))
    }

    /// Occupied where either grid is occupied
    pub fn union(&self, other: &Self) -> Result<Self> {
        if (self.rows, self.cols) != (other.rows, other.cols) {
            return Err(Error::GridSizeMismatch {
                rows: other.rows,
                cols: other.cols,
                expected_rows: self.rows,
                expected_cols: self.cols,
            });
        }
        Ok(Self {
            rows: self.rows,
            cols: self.cols,
            cells: self
                .cells
                .iter()
                .zip(&other.cells)
                .map(|(a, b)| u8::from(*a > 0 || *b > 0))
                .collect(),
        })
    }
}

/// Cell coordinate, `x` is the column and `y` is the row
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GridCell {
    pub x: usize,
    pub y: usize,
}

impl GridCell {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

/// Anchors a grid in the world
#[derive(Clone, Copy, Serialize, Deserialize, Debug, JsonSchema, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct GridFrame {
    /// World (x, y) of the corner of the cell (0, 0) [m]
    #[serde(default)]
    pub origin: [f64; 2],
    /// Size of one cell [m]
    #[serde(default = "default_resolution")]
    pub resolution: f64,
}

fn default_resolution() -> f64 {
    0.01
}

impl Default for GridFrame {
    fn default() -> Self {
        Self {
            origin: [0.0, 0.0],
            resolution: default_resolution(),
        }
    }
}

impl GridFrame {
    pub fn new(origin: [f64; 2], resolution: f64) -> Result<Self> {
        if !(resolution.is_finite() && resolution > 0.0) {
            return Err(Error::InvalidParameter(format!(
                "resolution must be positive: {resolution}"
            )));
        }
        Ok(Self { origin, resolution })
    }

    /// World (x, y) of the center of `cell`
    pub fn cell_center(&self, cell: GridCell) -> [f64; 2] {
        [
            self.origin[0] + (cell.x as f64 + 0.5) * self.resolution,
            self.origin[1] + (cell.y as f64 + 0.5) * self.resolution,
        ]
    }

    /// Cell containing the world point, `None` if it is out of `rows` x `cols`
    pub fn cell_at(&self, x: f64, y: f64, rows: usize, cols: usize) -> Option<GridCell> {
        let col = ((x - self.origin[0]) / self.resolution).floor();
        let row = ((y - self.origin[1]) / self.resolution).floor();
        if col < 0.0 || row < 0.0 || col >= cols as f64 || row >= rows as f64 {
            return None;
        }
        Some(GridCell::new(col as usize, row as usize))
    }
}
