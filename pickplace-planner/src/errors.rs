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

use thiserror::Error;

/// Error for `pickplace_planner`
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("Invalid region shape {:?}", .0)]
    InvalidRegionShape(String),
    #[error("Invalid region extent ({}, {}) for {}", x, y, shape)]
    InvalidRegionExtent { shape: String, x: f64, y: f64 },
    #[error("Invalid clearance radius {}", .0)]
    InvalidRadius(f64),
    #[error("Ragged grid: row {} has {} cells, expected {}", row, len, expected)]
    RaggedGrid {
        row: usize,
        len: usize,
        expected: usize,
    },
    #[error(
        "Grid size mismatch: {}x{} is given, expected {}x{}",
        rows,
        cols,
        expected_rows,
        expected_cols
    )]
    GridSizeMismatch {
        rows: usize,
        cols: usize,
        expected_rows: usize,
        expected_cols: usize,
    },
    #[error("No shared joint between start and end configurations")]
    EmptyJointSet,
    #[error("Joint {} appears more than once", .0)]
    DuplicateJoint(String),
    #[error("Joint {} not found", .0)]
    NoJoint(String),
    #[error("DoF mismatch {} != {}", .0, .1)]
    DofMismatch(usize, usize),
    #[error("Invalid parameter: {}", .0)]
    InvalidParameter(String),
}

/// Result for `pickplace_planner`
pub type Result<T> = ::std::result::Result<T, Error>;
